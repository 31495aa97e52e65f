//! Parse command - extract transactions from a statement and sync the CSV store.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use stmtx_core::{
    CsvStore, PageSource, ParseResult, PdfExtractor, StatementParser, StmtxConfig, SyncOutcome,
    TextPages,
};

use super::config::load_config;

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input statement (PDF, or text with form feeds between pages)
    #[arg(required = true)]
    input: PathBuf,

    /// CSV file to sync (default: store.csv_path from config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report what would be written without touching the CSV file
    #[arg(long)]
    dry_run: bool,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let pb = progress_bar()?;
    let result = parse_input(&args.input, &config, &pb)?;
    pb.finish_and_clear();

    print_warnings(&result);

    let csv_path = args
        .output
        .clone()
        .unwrap_or_else(|| config.store.csv_path.clone());
    let store = CsvStore::new(&csv_path);

    let outcome = if args.dry_run {
        store.dry_run(&result.records, config.store.merge)?
    } else {
        store.sync(&result.records, config.store.merge)?
    };

    print_outcome(outcome, store.path(), args.dry_run);

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn progress_bar() -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );
    Ok(pb)
}

/// Read a statement file and run it through the parser.
pub fn parse_input(input: &Path, config: &StmtxConfig, pb: &ProgressBar) -> anyhow::Result<ParseResult> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    info!("Processing file: {}", input.display());

    let parser = StatementParser::from_config(&config.parser).with_max_pages(config.pdf.max_pages);

    let source: Box<dyn PageSource> = match extension.as_str() {
        "pdf" => Box::new(load_pdf(input, pb)?),
        "txt" | "text" => {
            pb.set_message("Reading text...");
            pb.set_position(20);
            Box::new(TextPages::from_text(&fs::read_to_string(input)?))
        }
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    };

    let text_len = source.text_len();
    if text_len < config.pdf.min_text_length {
        anyhow::bail!(
            "Too little text in {} ({} characters, need {}). Scanned statements are not supported.",
            input.display(),
            text_len,
            config.pdf.min_text_length
        );
    }

    pb.set_message("Extracting transactions...");
    pb.set_position(60);
    let result = parser.parse_source(source.as_ref())?;

    pb.set_position(100);

    info!(
        "Found {} transactions on {} pages in {}ms",
        result.records.len(),
        result.pages,
        result.processing_time_ms
    );
    debug!(
        "{} lines, {} noise, {} before first transaction, {} blocks, {} dropped",
        result.lines_seen, result.noise_lines, result.orphan_lines, result.blocks, result.dropped
    );

    Ok(result)
}

fn load_pdf(input: &Path, pb: &ProgressBar) -> anyhow::Result<PdfExtractor> {
    pb.set_message("Loading PDF...");
    pb.set_position(10);

    let data = fs::read(input)?;
    let mut extractor = PdfExtractor::new();
    extractor.load(&data)?;

    debug!("PDF has {} pages", extractor.page_count());

    Ok(extractor)
}

fn print_warnings(result: &ParseResult) {
    if result.warnings.is_empty() {
        return;
    }

    eprintln!("{}", style("Balance check:").yellow());
    for warning in &result.warnings {
        eprintln!("  - {}", warning);
    }
}

fn print_outcome(outcome: SyncOutcome, path: &Path, dry_run: bool) {
    let prefix = if dry_run { "Would write" } else { "Wrote" };

    match outcome {
        SyncOutcome::Created { rows } => println!(
            "{} {} {} rows to new file {}",
            style("✓").green(),
            prefix,
            rows,
            path.display()
        ),
        SyncOutcome::Appended { added, total } => println!(
            "{} {} {} new rows to {} ({} total)",
            style("✓").green(),
            prefix,
            added,
            path.display(),
            total
        ),
        SyncOutcome::UpToDate { total } => println!(
            "{} {} is up to date ({} rows)",
            style("ℹ").blue(),
            path.display(),
            total
        ),
    }
}
