//! Error types for the arloc core library
//!
//! This module defines the error handling for rule assembly and transformation,
//! using thiserror for the error definitions.

use thiserror::Error;

/// Main error type for arloc operations
#[derive(Error, Debug)]
pub enum Error {
    /// A template referenced a `%{token}` that was never bound during descent
    #[error("Missing replacement for token '%{{{token}}}' in template '{template}' (rule path: {path})")]
    MissingReplacement {
        token: String,
        template: String,
        path: String,
    },

    /// The entity name could not be derived
    #[error("Invalid entity: {message}")]
    InvalidEntity { message: String },

    /// The language code was empty or unusable
    #[error("Invalid language code: '{value}'")]
    InvalidLanguage { value: String },

    /// A rule document could not be turned into a rule table
    #[error("Invalid rule for pattern '{pattern}': {message}")]
    RuleConfiguration { pattern: String, message: String },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid entity error
    pub fn invalid_entity(message: impl Into<String>) -> Self {
        Self::InvalidEntity {
            message: message.into(),
        }
    }

    /// Create a rule configuration error
    pub fn rule_configuration(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RuleConfiguration {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Whether this error points at a broken rule table rather than bad input data
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::MissingReplacement { .. } | Self::RuleConfiguration { .. }
        )
    }
}
