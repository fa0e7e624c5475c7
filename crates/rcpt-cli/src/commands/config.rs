//! Config command - inspect and edit the rcpt configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use rcpt_core::RcptConfig;

use super::default_config_path;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init {
        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Get a configuration value
    Get {
        /// Dotted key (e.g., "extraction.date_window.max_year")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Dotted key
        key: String,
        /// New value (JSON, or a bare string)
        value: String,
    },

    /// List the business rules in precedence order
    Rules,

    /// Show configuration file path
    Path,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show => show_config(&path),
        ConfigCommand::Init { force } => init_config(&path, force),
        ConfigCommand::Get { key } => get_config(&path, &key),
        ConfigCommand::Set { key, value } => set_config(&path, &key, &value),
        ConfigCommand::Rules => show_rules(&path),
        ConfigCommand::Path => show_path(&path),
    }
}

fn load_or_default(path: &Path) -> anyhow::Result<RcptConfig> {
    if path.exists() {
        Ok(RcptConfig::from_file(path)?)
    } else {
        Ok(RcptConfig::default())
    }
}

fn show_config(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        eprintln!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
    }
    let config = load_or_default(path)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn init_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    RcptConfig::default().save(path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        path.display()
    );
    Ok(())
}

fn get_config(path: &Path, key: &str) -> anyhow::Result<()> {
    let json = serde_json::to_value(load_or_default(path)?)?;

    let value = key
        .split('.')
        .try_fold(&json, |current, part| current.get(part))
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;

    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn set_config(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let mut json = serde_json::to_value(load_or_default(path)?)?;

    let parsed: Value =
        serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));

    let (parents, last) = match key.rsplit_once('.') {
        Some((parents, last)) => (Some(parents), last),
        None => (None, key),
    };

    let mut target = &mut json;
    for part in parents.into_iter().flat_map(|p| p.split('.')) {
        target = target
            .get_mut(part)
            .ok_or_else(|| anyhow::anyhow!("Configuration path not found: {}", key))?;
    }

    let object = target
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("Cannot set value at non-object path: {}", key))?;
    object.insert(last.to_string(), parsed.clone());

    // Round-trip through the typed config so invalid values are rejected.
    let config: RcptConfig = serde_json::from_value(json)
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        serde_json::to_string(&parsed)?
    );
    Ok(())
}

fn show_rules(path: &Path) -> anyhow::Result<()> {
    let config = load_or_default(path)?;
    let table = config.extraction.rule_table();

    if table.is_empty() {
        println!("{} No business rules configured", style("ℹ").blue());
        return Ok(());
    }

    println!("{} rules, first match wins:", table.len());
    for (i, rule) in table.iter().enumerate() {
        println!(
            "{:>3}. {} {} {}",
            i + 1,
            style(&rule.canonical_name).cyan(),
            style("<-").dim(),
            rule.location_pattern
        );
    }
    Ok(())
}

fn show_path(path: &Path) -> anyhow::Result<()> {
    println!("Configuration file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'rcpt config init' to create a configuration file.");
    }
    Ok(())
}
