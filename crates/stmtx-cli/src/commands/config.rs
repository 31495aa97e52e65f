//! Config command - inspect and edit the JSON configuration.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;
use tracing::debug;

use stmtx_core::StmtxConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Write a configuration file with default values
    Init {
        /// Where to write (default: the config path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print one value by dotted key (e.g. "store.merge")
    Get { key: String },

    /// Change one value by dotted key and save
    Set { key: String, value: String },

    /// Print the configuration file location
    Path,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let target = config_path.map(PathBuf::from).unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show => {
            if !target.exists() {
                println!("{} No config file at {}, showing defaults.", style("ℹ").blue(), target.display());
            }
            let config = load_or_default(&target)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigCommand::Init { output, force } => init(output.unwrap_or(target), force)?,
        ConfigCommand::Get { key } => {
            let tree = serde_json::to_value(load_or_default(&target)?)?;
            let value = lookup(&tree, &key).ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", key))?;
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        ConfigCommand::Set { key, value } => set(&target, &key, &value)?,
        ConfigCommand::Path => {
            let status = if target.exists() {
                style("exists").green()
            } else {
                style("not created (run 'stmtx config init')").yellow()
            };
            println!("{} [{}]", target.display(), status);
        }
    }

    Ok(())
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stmtx")
        .join("config.json")
}

/// Configuration for a pipeline command. A file given with `--config` must
/// exist; the default file is optional.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<StmtxConfig> {
    match config_path {
        Some(path) => {
            let path = Path::new(path);
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            debug!("Using config {}", path.display());
            Ok(StmtxConfig::from_file(path)?)
        }
        None => load_or_default(&default_config_path()),
    }
}

fn load_or_default(path: &Path) -> anyhow::Result<StmtxConfig> {
    if path.exists() {
        debug!("Using config {}", path.display());
        Ok(StmtxConfig::from_file(path)?)
    } else {
        Ok(StmtxConfig::default())
    }
}

fn init(path: PathBuf, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists. Use --force to overwrite.", path.display());
    }

    save(&StmtxConfig::default(), &path)?;
    println!("{} Wrote default configuration to {}", style("✓").green(), path.display());
    Ok(())
}

fn set(path: &Path, key: &str, raw: &str) -> anyhow::Result<()> {
    let mut tree = serde_json::to_value(load_or_default(path)?)?;

    // Bare words such as `fingerprint` are taken as strings
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));

    let slot = lookup_mut(&mut tree, key).ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", key))?;
    if slot.is_object() {
        anyhow::bail!("{} is a section, set one of its keys instead", key);
    }
    *slot = value.clone();

    // Rejects values of the wrong type before anything is written
    let config: StmtxConfig = serde_json::from_value(tree)?;
    save(&config, path)?;

    println!("{} {} = {}", style("✓").green(), key, value);
    Ok(())
}

fn save(config: &StmtxConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;
    Ok(())
}

fn lookup<'a>(tree: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(tree, |node, part| node.get(part))
}

fn lookup_mut<'a>(tree: &'a mut Value, key: &str) -> Option<&'a mut Value> {
    key.split('.').try_fold(tree, |node, part| node.get_mut(part))
}
