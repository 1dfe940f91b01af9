//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use std::path::PathBuf;

/// Arloc CLI - ActiveRecord-style localization key generator
///
/// Reads human-authored localization data for a model (names, plurals,
/// attribute labels, error messages) and rewrites it into the nested i18n
/// key tree a lookup store expects.
#[derive(Parser, Debug)]
#[command(
    name = "arloc",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "ARLOC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results (defaults to the configured format, else human)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transform a model's localization file into i18n keys
    Transform(TransformArgs),

    /// Show the effective rule table
    Rules(RulesArgs),

    /// Manage configuration files and settings
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the transform command
#[derive(Parser, Debug)]
pub struct TransformArgs {
    /// Path to the localization data file (JSON or YAML)
    #[arg(value_name = "DATA_FILE")]
    pub data_file: PathBuf,

    /// Model name used for the `model` token (e.g. post, admin/user)
    #[arg(short, long, value_name = "NAME")]
    pub entity: String,

    /// Language code the result is rooted at (defaults to the configured language)
    #[arg(short, long, value_name = "CODE")]
    pub language: Option<String>,

    /// Rule overrides file (JSON or YAML), merged over defaults and config rules
    #[arg(short, long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Treat --entity as a type path and derive the model name (Admin::UserProfile)
    #[arg(long)]
    pub type_name: bool,

    /// Print the flat dotted keys instead of the nested tree
    #[arg(long)]
    pub flat: bool,

    /// Save the result to a file (format from its extension)
    #[arg(long = "save-to", value_name = "OUTPUT_FILE")]
    pub save_to: Option<PathBuf>,
}

/// Arguments for the rules command
#[derive(Parser, Debug)]
pub struct RulesArgs {
    /// Rule overrides file (JSON or YAML) to merge before printing
    #[arg(short, long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Report templates that use tokens their pattern never binds
    #[arg(long)]
    pub lint: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration values
    Show(ConfigShowArgs),

    /// Write a default configuration file
    Init(ConfigInitArgs),

    /// Print the configuration file in use
    Path,
}

/// Arguments for config init
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Destination file (defaults to .arloc.yaml in the current directory)
    #[arg(value_name = "FILE")]
    pub path: Option<PathBuf>,

    /// Force overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for config show
#[derive(Parser, Debug)]
pub struct ConfigShowArgs {
    /// Show configuration in specified format
    #[arg(short, long, value_enum, default_value = "yaml")]
    pub format: ConfigFormat,
}

/// Configuration file formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}
