//! Value transforms attached to rule templates
//!
//! A transform rewrites a matched leaf value before it is emitted. Transforms
//! are plain function pointers and must be pure; the output of a transform
//! call is only deterministic if every transform in the table is.
//!
//! Built-in transforms are registered by name so rule documents loaded from
//! configuration files can refer to them.
//!
//! Copyright (c) 2025 Arloc Team
//! Licensed under the Apache-2.0 license

use serde_json::Value;
use std::fmt;

/// A function that rewrites a leaf value
pub type TransformFn = fn(&Value) -> Value;

/// A named value transform
#[derive(Clone)]
pub struct ValueTransform {
    name: String,
    apply: TransformFn,
}

impl ValueTransform {
    /// Wrap a custom transform function under a name
    pub fn new(name: impl Into<String>, apply: TransformFn) -> Self {
        Self {
            name: name.into(),
            apply,
        }
    }

    /// Look up a built-in transform by name
    pub fn builtin(name: &str) -> Option<Self> {
        BUILTINS
            .iter()
            .find(|(builtin, _)| *builtin == name)
            .map(|(builtin, apply)| Self::new(*builtin, *apply))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Apply the transform to a value
    pub fn apply(&self, value: &Value) -> Value {
        (self.apply)(value)
    }
}

// Function pointers have no meaningful identity, so transforms compare by name.
impl PartialEq for ValueTransform {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for ValueTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueTransform")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

const BUILTINS: &[(&str, TransformFn)] = &[
    ("upcase", upcase),
    ("downcase", downcase),
    ("capitalize", capitalize),
    ("titleize", titleize),
    ("strip", strip),
];

/// Names of all built-in transforms
pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|(name, _)| *name)
}

/// Apply a string rewrite to strings, and element-wise to arrays of strings.
/// Other values pass through unchanged.
fn map_strings(value: &Value, f: impl Fn(&str) -> String + Copy) -> Value {
    match value {
        Value::String(s) => Value::String(f(s)),
        Value::Array(items) => Value::Array(items.iter().map(|v| map_strings(v, f)).collect()),
        other => other.clone(),
    }
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let rest = chars.as_str().to_lowercase();
            first.to_uppercase().chain(rest.chars()).collect()
        }
        None => String::new(),
    }
}

/// Uppercase the whole string
pub fn upcase(value: &Value) -> Value {
    map_strings(value, str::to_uppercase)
}

/// Lowercase the whole string
pub fn downcase(value: &Value) -> Value {
    map_strings(value, str::to_lowercase)
}

/// Uppercase the first character, lowercase the rest
pub fn capitalize(value: &Value) -> Value {
    map_strings(value, capitalize_word)
}

/// Capitalize every word; underscores separate words like whitespace does
pub fn titleize(value: &Value) -> Value {
    map_strings(value, |s| {
        s.split(|c: char| c.is_whitespace() || c == '_')
            .filter(|w| !w.is_empty())
            .map(capitalize_word)
            .collect::<Vec<_>>()
            .join(" ")
    })
}

/// Trim surrounding whitespace
pub fn strip(value: &Value) -> Value {
    map_strings(value, |s| s.trim().to_string())
}
