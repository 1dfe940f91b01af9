//! Replacement context for `%{token}` substitution
//!
//! Copyright (c) 2025 Arloc Team
//! Licensed under the Apache-2.0 license

use std::collections::BTreeMap;

/// Token name bound to the entity name in every fresh context
pub const MODEL_TOKEN: &str = "model";

/// Token bindings accumulated while descending through the input tree
///
/// A context is never mutated once shared: binding a wildcard produces an
/// extended copy, so sibling keys at the same level only ever see the
/// bindings of their common ancestors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementContext {
    bindings: BTreeMap<String, String>,
}

impl ReplacementContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context seeded with the `model` token
    pub fn for_model(model: impl Into<String>) -> Self {
        Self::new().with_binding(MODEL_TOKEN, model)
    }

    /// Return a copy of this context with one more binding
    ///
    /// An existing binding of the same token is shadowed in the copy only.
    pub fn with_binding(&self, token: impl Into<String>, value: impl Into<String>) -> Self {
        let mut bindings = self.bindings.clone();
        bindings.insert(token.into(), value.into());
        Self { bindings }
    }

    /// Look up the value bound to a token
    pub fn get(&self, token: &str) -> Option<&str> {
        self.bindings.get(token).map(String::as_str)
    }

    /// Check if a token is bound
    pub fn is_bound(&self, token: &str) -> bool {
        self.bindings.contains_key(token)
    }

    /// Iterate over bindings in token order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
