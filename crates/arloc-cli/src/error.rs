//! Error types and handling for the CLI
//!
//! This module provides error types and utilities for handling
//! various failure modes in the CLI application.

use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from arloc-core library
    #[error("{0}")]
    Core(#[from] arloc_core::Error),

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Invalid file format
    #[error("Invalid file format for {}: expected {} ({})", path.display(), expected, reason)]
    InvalidFormat {
        path: PathBuf,
        expected: String,
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument combination
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid arguments error
    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::InvalidArgs(message.into())
    }

    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Core(core) => match core {
                arloc_core::Error::MissingReplacement { .. } => 7,
                arloc_core::Error::InvalidEntity { .. } => 8,
                arloc_core::Error::InvalidLanguage { .. } => 9,
                arloc_core::Error::RuleConfiguration { .. } => 10,
            },
            Self::FileNotFound { .. } => 3,
            Self::InvalidFormat { .. } => 4,
            Self::Config(_) => 5,
            Self::InvalidArgs(_) => 6,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
            Self::Other { .. } => 99,
        }
    }

    /// Check if this error should display usage help
    pub fn should_show_help(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgs(_)
                | Self::Core(arloc_core::Error::InvalidEntity { .. })
                | Self::Core(arloc_core::Error::InvalidLanguage { .. })
        )
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_per_core_kind() {
        let missing = Error::from(arloc_core::Error::MissingReplacement {
            token: "attr".into(),
            template: "x.%{attr}".into(),
            path: "name".into(),
        });
        let entity = Error::from(arloc_core::Error::invalid_entity("empty"));
        let rules = Error::from(arloc_core::Error::rule_configuration("name", "bad"));

        assert_eq!(missing.exit_code(), 7);
        assert_eq!(entity.exit_code(), 8);
        assert_eq!(rules.exit_code(), 10);
        let language = Error::from(arloc_core::LanguageCode::parse("  ").unwrap_err());
        assert_eq!(language.exit_code(), 9);
        assert_eq!(Error::config("x").exit_code(), 5);
        assert_eq!(Error::other("x").exit_code(), 99);
    }

    #[test]
    fn test_help_hint() {
        assert!(Error::invalid_args("x").should_show_help());
        assert!(Error::from(arloc_core::Error::invalid_entity("x")).should_show_help());
        assert!(!Error::config("x").should_show_help());
    }

    #[test]
    fn test_format_error_plain() {
        let formatted = format_error(&Error::FileNotFound { path: "post.yml".into() }, false);
        assert_eq!(formatted, "Error: File not found: post.yml");
    }
}
