//! Rendering records for the terminal or for files.

use stmtx_core::{COLUMNS, TransactionRecord};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON array
    Json,
    /// CSV with header row
    Csv,
    /// Aligned table
    Text,
}

/// Columns shown in the text table; `raw` is left out.
const TABLE_COLUMNS: usize = 8;

pub fn format_records(records: &[&TransactionRecord], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Csv => format_csv(records),
        OutputFormat::Text => Ok(format_text(records)),
    }
}

fn format_csv(records: &[&TransactionRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(COLUMNS)?;
    for record in records {
        wtr.write_record(record.fields())?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(records: &[&TransactionRecord]) -> String {
    let mut widths: Vec<usize> = COLUMNS[..TABLE_COLUMNS].iter().map(|c| c.len()).collect();
    for record in records {
        for (width, field) in widths.iter_mut().zip(record.fields()) {
            *width = (*width).max(field.chars().count());
        }
    }

    let render = |cells: &[&str]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut output = String::new();
    output.push_str(&render(&COLUMNS[..TABLE_COLUMNS]));
    output.push('\n');
    for record in records {
        output.push_str(&render(&record.fields()[..TABLE_COLUMNS]));
        output.push('\n');
    }
    output
}
