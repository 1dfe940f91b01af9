//! Rule table assembly
//!
//! A rule table maps pattern strings to targets and remembers declaration
//! order, which listings and rendered rule documents follow.
//!
//! Copyright (c) 2025 Arloc Team
//! Licensed under the Apache-2.0 license

use crate::context::MODEL_TOKEN;
use crate::error::{Error, Result};
use super::pattern::RulePattern;
use super::target::RuleTarget;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

/// An ordered, immutable-after-assembly mapping of pattern to target
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleTable {
    entries: Vec<(RulePattern, RuleTarget)>,
    /// Pattern string to position in `entries`
    index: HashMap<String, usize>,
}

/// A template token that no enclosing wildcard (nor `model`) can bind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnboundToken {
    pub pattern: String,
    pub template: String,
    pub token: String,
}

impl RuleTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the target for a pattern
    ///
    /// A replaced pattern keeps its original position; new patterns are appended.
    pub fn insert(&mut self, pattern: impl Into<RulePattern>, target: impl Into<RuleTarget>) {
        let pattern = pattern.into();
        let target = target.into();
        match self.index.get(pattern.as_str()) {
            Some(&position) => self.entries[position].1 = target,
            None => {
                self.index.insert(pattern.as_str().to_string(), self.entries.len());
                self.entries.push((pattern, target));
            }
        }
    }

    /// Target registered under the exact pattern string
    pub fn get(&self, pattern: &str) -> Option<&RuleTarget> {
        self.index.get(pattern).map(|&position| &self.entries[position].1)
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.index.contains_key(pattern)
    }

    /// Iterate over entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&RulePattern, &RuleTarget)> {
        self.entries.iter().map(|(p, t)| (p, t))
    }

    /// Iterate over pattern strings in declaration order
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(p, _)| p.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Shallow merge: every pattern in `overrides` replaces this table's entry
    ///
    /// Target lists are replaced whole, never merged. Neither input is modified.
    pub fn merge(&self, overrides: &RuleTable) -> RuleTable {
        let mut merged = self.clone();
        merged.extend(overrides);
        merged
    }

    /// In-place form of [`RuleTable::merge`]
    pub fn extend(&mut self, overrides: &RuleTable) {
        for (pattern, target) in overrides.iter() {
            self.insert(pattern.clone(), target.clone());
        }
    }

    /// Build a table from a rule document
    ///
    /// The document is an object keyed by pattern string; see
    /// [`RuleTarget::from_document`] for the accepted values. Pattern syntax
    /// itself is not validated.
    pub fn from_document(doc: &Value) -> Result<Self> {
        let map = doc.as_object().ok_or_else(|| {
            Error::rule_configuration("<root>", "rule document must be an object keyed by pattern")
        })?;

        let mut table = RuleTable::new();
        for (pattern, target) in map {
            table.insert(pattern.as_str(), RuleTarget::from_document(pattern, target)?);
        }
        Ok(table)
    }

    /// Render the table as a rule document, in declaration order
    pub fn to_document(&self) -> Value {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(pattern, target)| (pattern.as_str().to_string(), target.to_document()))
            .collect();
        Value::Object(map)
    }

    /// Find template tokens that can never be bound when the pattern matches
    ///
    /// Assembly never fails on these; a transform that reaches such a rule
    /// fails with [`Error::MissingReplacement`]. This is an opt-in check for
    /// tooling that wants to report broken tables up front.
    pub fn unbound_tokens(&self) -> Vec<UnboundToken> {
        let mut problems = Vec::new();
        for (pattern, target) in &self.entries {
            let bound: HashSet<&str> = pattern
                .bound_tokens()
                .chain(std::iter::once(MODEL_TOKEN))
                .collect();
            for template in target.templates() {
                for token in template.tokens() {
                    if !bound.contains(token) {
                        problems.push(UnboundToken {
                            pattern: pattern.as_str().to_string(),
                            template: template.key().to_string(),
                            token: token.to_string(),
                        });
                    }
                }
            }
        }
        problems
    }
}

impl<P, T> FromIterator<(P, T)> for RuleTable
where
    P: Into<RulePattern>,
    T: Into<RuleTarget>,
{
    fn from_iter<I: IntoIterator<Item = (P, T)>>(iter: I) -> Self {
        let mut table = RuleTable::new();
        for (pattern, target) in iter {
            table.insert(pattern, target);
        }
        table
    }
}
