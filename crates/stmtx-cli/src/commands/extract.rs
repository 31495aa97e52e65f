//! Extract command - print the transactions of a statement without storing them.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use super::config::load_config;
use super::output::{OutputFormat, format_records};
use super::parse::{parse_input, progress_bar};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input statement (PDF or text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let pb = progress_bar()?;
    let result = parse_input(&args.input, &config, &pb)?;
    pb.finish_and_clear();

    for warning in &result.warnings {
        eprintln!("{} {}", style("!").yellow(), warning);
    }

    let records: Vec<_> = result.records.iter().collect();
    let output = format_records(&records, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} {} transactions written to {}",
            style("✓").green(),
            records.len(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}
