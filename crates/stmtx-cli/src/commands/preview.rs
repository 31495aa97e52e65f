//! Preview command - page through stored transactions.

use std::path::PathBuf;

use clap::Args;
use console::style;

use stmtx_core::{CsvStore, search};

use super::config::load_config;
use super::output::{OutputFormat, format_records};

/// Arguments for the preview command.
#[derive(Args)]
pub struct PreviewArgs {
    /// Page to show (1-based)
    #[arg(short, long, default_value_t = 1)]
    page: usize,

    /// Rows per page
    #[arg(long, default_value_t = 100)]
    per_page: usize,

    /// CSV file to read (default: store.csv_path from config)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

pub async fn run(args: PreviewArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let csv_path = args
        .csv
        .unwrap_or_else(|| config.store.csv_path.clone());
    let store = CsvStore::new(&csv_path);
    if !store.exists() {
        anyhow::bail!("No transactions stored at {}", csv_path.display());
    }

    let records = store.load()?;
    let page = search::paginate(&records, args.page, args.per_page);

    let rows: Vec<_> = page.rows.iter().collect();
    if !rows.is_empty() {
        print!("{}", format_records(&rows, args.format)?);
    }

    println!(
        "{} Page {} of {} ({} rows)",
        style("ℹ").blue(),
        page.page,
        page.total_pages.max(1),
        page.total_rows
    );
    if page.has_next() {
        println!("Use --page {} for more.", page.page + 1);
    }

    Ok(())
}
