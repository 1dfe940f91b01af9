//! Shared utilities for command handlers

use crate::config::{Config, FileFormat};
use crate::error::{Error, Result};
use arloc_core::{default_rules, RuleTable};
use serde_json::{Map, Number, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read a JSON or YAML document, format chosen by extension
///
/// YAML mappings may use non-string scalar keys (`1:`, `true:`); those are
/// stringified so every document becomes plain JSON.
pub fn load_document(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = content.len(), "Read document");

    match FileFormat::from_path(path) {
        FileFormat::Yaml => {
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(&content).map_err(|e| invalid_format(path, "YAML", e))?;
            yaml_to_json(yaml).map_err(|reason| invalid_format(path, "YAML", reason))
        }
        FileFormat::Toml => {
            toml::from_str(&content).map_err(|e| invalid_format(path, "TOML", e))
        }
        FileFormat::Json => {
            serde_json::from_str(&content).map_err(|e| invalid_format(path, "JSON", e))
        }
    }
}

fn invalid_format(path: &Path, expected: &str, reason: impl ToString) -> Error {
    Error::InvalidFormat {
        path: path.to_path_buf(),
        expected: expected.to_string(),
        reason: reason.to_string(),
    }
}

/// Convert a YAML value to JSON, stringifying scalar mapping keys
pub fn yaml_to_json(value: serde_yaml::Value) -> std::result::Result<Value, String> {
    use serde_yaml::Value as Yaml;

    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => yaml_number(&n)?,
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<std::result::Result<_, _>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut map = Map::new();
            for (key, value) in mapping {
                map.insert(yaml_key(key)?, yaml_to_json(value)?);
            }
            Value::Object(map)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn yaml_number(n: &serde_yaml::Number) -> std::result::Result<Value, String> {
    if let Some(i) = n.as_i64() {
        Ok(Value::from(i))
    } else if let Some(u) = n.as_u64() {
        Ok(Value::from(u))
    } else {
        n.as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| format!("number {} has no JSON representation", n))
    }
}

fn yaml_key(key: serde_yaml::Value) -> std::result::Result<String, String> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Null => Ok(String::new()),
        Yaml::Tagged(tagged) => yaml_key(tagged.value),
        Yaml::Sequence(_) | Yaml::Mapping(_) => {
            Err("mapping keys must be scalars".to_string())
        }
    }
}

/// Load a rule override file into a rule table
pub fn load_rule_file(path: &Path) -> Result<RuleTable> {
    let doc = load_document(path)?;
    RuleTable::from_document(&doc).map_err(|e| {
        Error::config(format!("invalid rules in {}: {}", path.display(), e))
    })
}

/// Defaults, then config `rules`, then the `--rules` file; later wins
pub fn effective_rules(config: &Config, rules_file: Option<&Path>) -> Result<RuleTable> {
    let mut rules = default_rules().merge(&config.rule_overrides()?);

    if let Some(path) = rules_file {
        rules.extend(&load_rule_file(path)?);
    }

    debug!(rules = rules.len(), "Assembled effective rule table");
    Ok(rules)
}

/// Write `value` to `path`, format chosen by extension
pub fn save_document(path: &Path, value: &Value) -> Result<()> {
    let content = match FileFormat::from_path(path) {
        FileFormat::Yaml => serde_yaml::to_string(value)?,
        FileFormat::Toml => toml::to_string_pretty(value)
            .map_err(|e| Error::other(format!("Failed to serialize as TOML: {}", e)))?,
        FileFormat::Json => serde_json::to_string_pretty(value)?,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;
    Ok(())
}
