//! Output-key templates with `%{token}` placeholders
//!
//! Copyright (c) 2025 Arloc Team
//! Licensed under the Apache-2.0 license

use crate::context::ReplacementContext;
use crate::error::{Error, Result};
use super::transforms::ValueTransform;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

/// Matches `%{token}` where the token is a run of ASCII word characters.
/// Anything else that merely looks like a placeholder is left verbatim.
fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"%\{([A-Za-z0-9_]+)\}").unwrap())
}

/// A dotted output-key template, optionally paired with a value transform
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    key: String,
    transform: Option<ValueTransform>,
}

impl Template {
    /// Create a template without a value transform
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            transform: None,
        }
    }

    /// Attach a value transform
    pub fn with_transform(mut self, transform: ValueTransform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// The raw, unsubstituted key
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn transform(&self) -> Option<&ValueTransform> {
        self.transform.as_ref()
    }

    /// Placeholder tokens referenced by this template, in order of appearance
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        placeholder_regex()
            .captures_iter(&self.key)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Value to emit for a matched leaf
    pub fn apply(&self, value: &Value) -> Value {
        match &self.transform {
            Some(transform) => transform.apply(value),
            None => value.clone(),
        }
    }

    /// Substitute every placeholder from the context
    ///
    /// `rule_path` is only used to give a missing-token error its location.
    pub fn render(&self, context: &ReplacementContext, rule_path: &str) -> Result<String> {
        let mut rendered = String::with_capacity(self.key.len());
        let mut last = 0;

        for caps in placeholder_regex().captures_iter(&self.key) {
            let (Some(whole), Some(token)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let value = context.get(token.as_str()).ok_or_else(|| Error::MissingReplacement {
                token: token.as_str().to_string(),
                template: self.key.clone(),
                path: rule_path.to_string(),
            })?;

            rendered.push_str(&self.key[last..whole.start()]);
            rendered.push_str(value);
            last = whole.end();
        }

        rendered.push_str(&self.key[last..]);
        Ok(rendered)
    }
}

impl From<&str> for Template {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for Template {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}
