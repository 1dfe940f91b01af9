//! Rule targets: the template(s) a pattern resolves to
//!
//! Copyright (c) 2025 Arloc Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use super::template::Template;
use super::transforms::ValueTransform;
use serde_json::{json, Value};

/// Key holding the template string in an object-form rule document
const DOC_KEY: &str = "key";
/// Key holding the built-in transform name in an object-form rule document
const DOC_TRANSFORM: &str = "transform";

/// One or more templates attached to a pattern
///
/// Every template of a list is emitted independently for the same matched
/// leaf, each with its own transform applied.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleTarget {
    Single(Template),
    List(Vec<Template>),
}

impl RuleTarget {
    /// View the target as a list of templates
    pub fn templates(&self) -> &[Template] {
        match self {
            Self::Single(template) => std::slice::from_ref(template),
            Self::List(templates) => templates,
        }
    }

    /// Parse a target from its rule-document form
    ///
    /// Accepted shapes: a template string, an object `{"key": ..., "transform": ...}`
    /// naming a built-in transform, or a list of either.
    pub fn from_document(pattern: &str, doc: &Value) -> Result<Self> {
        match doc {
            Value::Array(items) => items
                .iter()
                .map(|item| template_from_document(pattern, item))
                .collect::<Result<Vec<_>>>()
                .map(Self::List),
            other => template_from_document(pattern, other).map(Self::Single),
        }
    }

    /// Render the target back into its rule-document form
    pub fn to_document(&self) -> Value {
        match self {
            Self::Single(template) => template_to_document(template),
            Self::List(templates) => Value::Array(templates.iter().map(template_to_document).collect()),
        }
    }
}

fn template_from_document(pattern: &str, doc: &Value) -> Result<Template> {
    match doc {
        Value::String(key) => Ok(Template::new(key.as_str())),
        Value::Object(map) => {
            let key = map
                .get(DOC_KEY)
                .and_then(Value::as_str)
                .ok_or_else(|| Error::rule_configuration(pattern, "object target requires a string 'key'"))?;
            let template = Template::new(key);

            match map.get(DOC_TRANSFORM) {
                None | Some(Value::Null) => Ok(template),
                Some(Value::String(name)) => {
                    let transform = ValueTransform::builtin(name).ok_or_else(|| {
                        Error::rule_configuration(pattern, format!("unknown transform '{}'", name))
                    })?;
                    Ok(template.with_transform(transform))
                }
                Some(_) => Err(Error::rule_configuration(pattern, "'transform' must be a transform name")),
            }
        }
        _ => Err(Error::rule_configuration(
            pattern,
            "target must be a template string, an object with 'key', or a list of those",
        )),
    }
}

fn template_to_document(template: &Template) -> Value {
    match template.transform() {
        Some(transform) => json!({ DOC_KEY: template.key(), DOC_TRANSFORM: transform.name() }),
        None => Value::String(template.key().to_string()),
    }
}

impl From<Template> for RuleTarget {
    fn from(template: Template) -> Self {
        Self::Single(template)
    }
}

impl From<&str> for RuleTarget {
    fn from(key: &str) -> Self {
        Self::Single(Template::new(key))
    }
}

impl From<String> for RuleTarget {
    fn from(key: String) -> Self {
        Self::Single(Template::new(key))
    }
}

impl From<Vec<Template>> for RuleTarget {
    fn from(templates: Vec<Template>) -> Self {
        Self::List(templates)
    }
}
