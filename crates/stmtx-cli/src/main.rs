//! CLI application for bank statement transaction extraction.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, extract, parse, preview, search};

/// Statement text extraction - Recover transactions from bank statements
#[derive(Parser)]
#[command(name = "stmtx")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a statement and append new transactions to the CSV store
    Parse(parse::ParseArgs),

    /// Parse a statement and print the transactions without storing them
    Extract(extract::ExtractArgs),

    /// Search stored transactions by date, amount or id
    Search(search::SearchArgs),

    /// Page through stored transactions
    Preview(preview::PreviewArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Parse(args) => parse::run(args, config_path).await,
        Commands::Extract(args) => extract::run(args, config_path).await,
        Commands::Search(args) => search::run(args, config_path).await,
        Commands::Preview(args) => preview::run(args, config_path).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
