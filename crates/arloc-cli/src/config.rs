//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (YAML/JSON/TOML)
//! - Environment variables (logging only, see `logging`)
//!
//! The `rules` section is a rule document merged over the default rule
//! table before any `--rules` file given on the command line.

use crate::error::{Error, Result};
use arloc_core::RuleTable;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Language used when `transform` is run without `--language`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_language: Option<String>,

    /// Rule overrides, in rule-document form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Value>,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// File this configuration was loaded from
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: String,

    /// Use colored output by default
    pub color: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (compact, full, json)
    pub format: String,

    /// Log file path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
            color: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
            file: None,
        }
    }
}

/// Serialization format, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
    Toml,
}

impl FileFormat {
    /// Format for `path`; anything unrecognised is read as JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Self::Yaml,
            Some("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;

        let mut config: Config = match FileFormat::from_path(path) {
            FileFormat::Yaml => serde_yaml::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)
                .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))?,
            FileFormat::Json => serde_json::from_str(&content)?,
        };
        config.source = Some(path.to_path_buf());

        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        warn!("Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }

        // Return default config if no config file found
        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Get default configuration file paths to check, in priority order
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            // Current directory
            PathBuf::from(".arloc.yaml"),
            PathBuf::from(".arloc.json"),
            PathBuf::from("arloc.yaml"),
            PathBuf::from("arloc.json"),
        ];

        // User config directory
        if let Some(config_dir) = Self::user_config_dir() {
            paths.push(config_dir.join("config.yaml"));
            paths.push(config_dir.join("config.json"));
        }

        paths
    }

    /// Per-user configuration directory
    pub fn user_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("arloc"))
    }

    /// Rule table described by the `rules` section, empty when absent
    pub fn rule_overrides(&self) -> Result<RuleTable> {
        match &self.rules {
            Some(doc) => RuleTable::from_document(doc).map_err(|e| {
                Error::config(format!(
                    "invalid rules in {}: {}",
                    self.source_display(),
                    e
                ))
            }),
            None => Ok(RuleTable::new()),
        }
    }

    /// Check the configuration for errors that would only surface later
    pub fn validate(&self) -> Result<()> {
        self.rule_overrides()?;

        if let Some(language) = &self.default_language {
            arloc_core::LanguageCode::parse(language)
                .map_err(|e| Error::config(format!("default_language: {}", e)))?;
        }

        match self.output.format.as_str() {
            "human" | "json" | "json-pretty" | "yaml" => {}
            other => return Err(Error::config(format!("unknown output.format '{}'", other))),
        }

        match self.logging.format.as_str() {
            "compact" | "full" | "json" => Ok(()),
            other => Err(Error::config(format!("unknown logging.format '{}'", other))),
        }
    }

    /// Human-readable origin of this configuration
    pub fn source_display(&self) -> String {
        self.source
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<defaults>".to_string())
    }

    /// Render the configuration in the given file format
    pub fn render(&self, format: FileFormat) -> Result<String> {
        Ok(match format {
            FileFormat::Yaml => serde_yaml::to_string(self)?,
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)
                .map_err(|e| Error::config(format!("Failed to serialize as TOML: {}", e)))?,
        })
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.render(FileFormat::from_path(path))?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Starter configuration written by `config init`
    pub fn starter() -> Self {
        Self {
            rules: Some(serde_json::json!({
                "attributes/:attr/hint": "helpers.hint.%{model}.%{attr}"
            })),
            default_language: Some("en".to_string()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    fn write_temp(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_yaml_config() {
        let file = write_temp(
            ".yaml",
            r#"
default_language: de
rules:
  "attributes/:attr/hint": "helpers.hint.%{model}.%{attr}"
  name:
    key: "activerecord.models.%{model}"
    transform: capitalize
output:
  format: json
"#,
        );
        let config = Config::from_file(file.path()).unwrap();

        assert_eq!(config.default_language.as_deref(), Some("de"));
        assert_eq!(config.output.format, "json");
        assert!(config.output.color);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.source.as_deref(), Some(file.path()));

        let rules = config.rule_overrides().unwrap();
        assert_eq!(rules.len(), 2);
        assert!(rules.contains("attributes/:attr/hint"));
        config.validate().unwrap();
    }

    #[test]
    fn test_load_json_and_toml_config() {
        let json = write_temp(".json", r#"{"default_language": "fr", "logging": {"format": "json"}}"#);
        let config = Config::from_file(json.path()).unwrap();
        assert_eq!(config.default_language.as_deref(), Some("fr"));
        assert_eq!(config.logging.format, "json");

        let toml_file = write_temp(".toml", "default_language = \"pt-BR\"\n[output]\ncolor = false\n");
        let config = Config::from_file(toml_file.path()).unwrap();
        assert_eq!(config.default_language.as_deref(), Some("pt-BR"));
        assert!(!config.output.color);
        assert!(config.rules.is_none());
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_invalid_rules_are_config_errors() {
        let file = write_temp(".json", r#"{"rules": {"name": {"transform": "upcase"}}}"#);
        let config = Config::from_file(file.path()).unwrap();
        let err = config.rule_overrides().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_formats() {
        let mut config = Config::default();
        config.validate().unwrap();

        config.output.format = "xml".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.default_language = Some("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_roundtrip() {
        let dir = tempdir().unwrap();
        for name in ["nested/config.yaml", "config.json", "config.toml"] {
            let path = dir.path().join(name);
            Config::starter().save(&path).unwrap();

            let loaded = Config::from_file(&path).unwrap();
            assert_eq!(loaded.default_language.as_deref(), Some("en"));
            assert_eq!(loaded.rule_overrides().unwrap().len(), 1, "{}", name);
        }
    }

    #[test]
    fn test_default_paths_prefer_project_files() {
        let paths = Config::default_config_paths();
        assert_eq!(paths[0], PathBuf::from(".arloc.yaml"));
        assert_eq!(paths[3], PathBuf::from("arloc.json"));
    }
}
