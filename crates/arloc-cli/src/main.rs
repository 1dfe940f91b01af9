//! Arloc CLI - Command-line interface for ActiveRecord-style localization keys
//!
//! This is the main entry point for the arloc CLI application, providing
//! commands for transforming model localization files, inspecting the
//! effective rule table, and managing configuration.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands, OutputFormat};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Set up colored output
    control::set_override(cli.use_color());

    // Configuration also carries logging settings, so load it first and
    // report a failure once logging is up
    let config = Config::load_with_file(cli.config.as_deref());

    // Initialize logging; the guard flushes file output on exit
    let _log_guard = match init_logging(&cli, config.as_ref().ok()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    };

    // Run the application
    let result = config.and_then(|config| run(cli, config));

    // Handle the result
    match result {
        Ok(()) => {}
        Err(e) => {
            eprintln!("{}", error::format_error(&e, control::SHOULD_COLORIZE.should_colorize()));

            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }

            drop(_log_guard);
            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
#[instrument(skip(cli, config), fields(command = ?cli.command))]
fn run(cli: Cli, config: Config) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let use_color = cli.use_color() && config.output.color;
    let mut output = OutputWriter::new(
        effective_output_format(&cli, &config),
        use_color,
        cli.quiet,
        cli.verbosity_level(),
    );

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        config = %config.source_display(),
        "Executing command"
    );

    // Handle the subcommand
    match cli.command {
        Commands::Transform(args) => handlers::handle_transform(args, &config, &mut output),
        Commands::Rules(args) => handlers::handle_rules(args, &config, &mut output),
        Commands::Config(args) => handlers::handle_config(args, &config, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// `-o` wins when given; otherwise the configured `output.format` applies
fn effective_output_format(cli: &Cli, config: &Config) -> OutputFormat {
    if let Some(format) = cli.output {
        return format;
    }
    match config.output.format.as_str() {
        "json" => OutputFormat::Json,
        "json-pretty" => OutputFormat::JsonPretty,
        "yaml" => OutputFormat::Yaml,
        _ => OutputFormat::Human,
    }
}

/// Initialize the logging system
fn init_logging(
    cli: &Cli,
    config: Option<&Config>,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    // Create logging configuration from CLI args, the config file and environment
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());

    if let Some(config) = config {
        logging_config.merge_with_file_config(&config.logging, cli.verbosity_level());
    }

    // Apply environment overrides
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    // Initialize the logging system
    logging::init_logging(logging_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        // Test verbose flag
        let cli = Cli::parse_from(["arloc", "-vv", "rules"]);
        assert_eq!(cli.verbosity_level(), 2);

        // Test quiet flag
        let cli = Cli::parse_from(["arloc", "--quiet", "rules", "--lint"]);
        assert_eq!(cli.verbosity_level(), 0);
    }

    #[test]
    fn test_output_flag_overrides_config() {
        let mut config = Config::default();
        config.output.format = "yaml".to_string();

        let cli = Cli::parse_from(["arloc", "rules"]);
        assert_eq!(effective_output_format(&cli, &config), OutputFormat::Yaml);

        let cli = Cli::parse_from(["arloc", "-o", "json", "rules"]);
        assert_eq!(effective_output_format(&cli, &config), OutputFormat::Json);

        let cli = Cli::parse_from(["arloc", "-o", "human", "rules"]);
        assert_eq!(effective_output_format(&cli, &config), OutputFormat::Human);

        let cli = Cli::parse_from(["arloc", "rules"]);
        assert_eq!(effective_output_format(&cli, &Config::default()), OutputFormat::Human);
    }
}
