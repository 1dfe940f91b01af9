//! Configuration command handlers

use crate::cli::{ConfigAction, ConfigArgs, ConfigFormat, ConfigInitArgs, ConfigShowArgs};
use crate::config::{Config, FileFormat};
use crate::error::Result;
use crate::output::OutputWriter;
use std::path::PathBuf;

/// File written by `config init` when no path is given
const DEFAULT_INIT_PATH: &str = ".arloc.yaml";

/// Handle the config command
pub fn handle_config(args: ConfigArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    match args.action {
        ConfigAction::Show(show_args) => handle_config_show(show_args, config, output),
        ConfigAction::Init(init_args) => handle_config_init(init_args, output),
        ConfigAction::Path => handle_config_path(config, output),
    }
}

/// Handle config show subcommand
fn handle_config_show(args: ConfigShowArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    output.info(&format!("Configuration from {}", config.source_display()))?;

    let format = match args.format {
        ConfigFormat::Toml => FileFormat::Toml,
        ConfigFormat::Json => FileFormat::Json,
        ConfigFormat::Yaml => FileFormat::Yaml,
    };
    let content = config.render(format)?;
    output.write(&content)?;
    if !content.ends_with('\n') {
        output.writeln("")?;
    }
    Ok(())
}

/// Handle config init subcommand
fn handle_config_init(args: ConfigInitArgs, output: &mut OutputWriter) -> Result<()> {
    let path = args.path.unwrap_or_else(|| PathBuf::from(DEFAULT_INIT_PATH));

    if path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        ))?;
        return Ok(());
    }

    Config::starter().save(&path)?;
    output.success(&format!("✓ Created config at {}", path.display()))?;
    output.info("Edit it to add rule overrides and defaults for your project.")?;
    Ok(())
}

/// Handle config path subcommand
fn handle_config_path(config: &Config, output: &mut OutputWriter) -> Result<()> {
    match &config.source {
        Some(path) => output.writeln(&path.display().to_string()),
        None => {
            output.warning("No configuration file found; using defaults")?;
            output.section("Searched Locations")?;
            for path in Config::default_config_paths() {
                output.info(&path.display().to_string())?;
            }
            Ok(())
        }
    }
}
