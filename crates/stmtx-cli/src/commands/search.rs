//! Search command - look up stored transactions.

use std::path::PathBuf;

use clap::{ArgGroup, Args};
use console::style;
use tracing::debug;

use stmtx_core::{CsvStore, search};

use super::config::load_config;
use super::output::{OutputFormat, format_records};

/// Arguments for the search command.
#[derive(Args)]
#[command(group(ArgGroup::new("query").required(true).args(["date", "amount", "id"])))]
pub struct SearchArgs {
    /// Match the date or ISO date (e.g. "02 JUL", "2024-07")
    #[arg(long)]
    date: Option<String>,

    /// Match the debit or credit amount (e.g. "1,000.00")
    #[arg(long)]
    amount: Option<String>,

    /// Match the transaction identifier
    #[arg(long)]
    id: Option<String>,

    /// CSV file to search (default: store.csv_path from config)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

pub async fn run(args: SearchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let csv_path = args
        .csv
        .unwrap_or_else(|| config.store.csv_path.clone());
    let store = CsvStore::new(&csv_path);
    if !store.exists() {
        anyhow::bail!("No transactions stored at {}", csv_path.display());
    }

    let records = store.load()?;

    let results = if let Some(query) = &args.date {
        search::by_date(&records, query)
    } else if let Some(query) = &args.amount {
        search::by_amount(&records, query)
    } else if let Some(query) = &args.id {
        search::by_id(&records, query)
    } else {
        Vec::new()
    };

    debug!("{} of {} records matched", results.len(), records.len());

    if results.is_empty() {
        println!("{} No results found", style("ℹ").blue());
        return Ok(());
    }

    print!("{}", format_records(&results, args.format)?);
    println!("{} {} matching transactions", style("✓").green(), results.len());

    Ok(())
}
