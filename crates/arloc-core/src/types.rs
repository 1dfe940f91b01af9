//! Core types and data structures for the arloc rule engine
//!
//! This module defines the input tree handed in by callers, the flat entry
//! collection produced by the matcher, and the normalised language code.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A node of caller-supplied localization data
///
/// Objects become branches; every other JSON value (strings, numbers,
/// arrays, null) is a leaf payload. Branch keys keep their insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum L10nNode {
    /// A plain payload emitted under a resolved output key
    Leaf(Value),
    /// A nested mapping of key to child node
    Branch(Vec<(String, L10nNode)>),
}

impl L10nNode {
    /// Create a leaf node
    pub fn leaf(value: impl Into<Value>) -> Self {
        Self::Leaf(value.into())
    }

    /// Create a branch node from key/child pairs
    pub fn branch<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, L10nNode)>,
    {
        Self::Branch(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Check if this node is a branch
    pub fn is_branch(&self) -> bool {
        matches!(self, Self::Branch(_))
    }

    /// Look up a direct child by key
    pub fn get(&self, key: &str) -> Option<&L10nNode> {
        match self {
            Self::Branch(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            Self::Leaf(_) => None,
        }
    }

    /// Number of leaves below (and including) this node
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Branch(entries) => entries.iter().map(|(_, v)| v.leaf_count()).sum(),
        }
    }
}

impl From<Value> for L10nNode {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Branch(
                map.into_iter()
                    .map(|(k, v)| (k, L10nNode::from(v)))
                    .collect(),
            ),
            other => Self::Leaf(other),
        }
    }
}

impl From<L10nNode> for Value {
    fn from(node: L10nNode) -> Self {
        match node {
            L10nNode::Leaf(value) => value,
            L10nNode::Branch(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Ordered collection of resolved `(output key, value)` pairs
///
/// Inserting a key that is already present replaces its value in place, so
/// later writes win while the first write's position is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlatEntries(Map<String, Value>);

impl FlatEntries {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an entry, returning the value it replaced
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Merge another collection into this one; its entries win on collision
    pub fn merge(&mut self, other: FlatEntries) {
        for (key, value) in other.0 {
            self.0.insert(key, value);
        }
    }

    /// Get the value for an output key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Check if an output key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Iterate over entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Iterate over output keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume into the underlying JSON map
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl FromIterator<(String, Value)> for FlatEntries {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut entries = FlatEntries::new();
        for (key, value) in iter {
            entries.insert(key, value);
        }
        entries
    }
}

/// Normalised language identifier used as the result tree's root key
///
/// The symbolic form is the caller's code with surrounding whitespace
/// removed (`"en"`, `"pt-BR"`); case and separators are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Normalise a raw language code
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidLanguage {
                value: raw.to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for LanguageCode {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_from_value_keeps_order() {
        let node = L10nNode::from(json!({
            "name": {"singular": "Post", "plural": "Posts"},
            "attributes": {"title": "Title"}
        }));

        let L10nNode::Branch(entries) = &node else {
            panic!("expected branch");
        };
        let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["name", "attributes"]);
        assert_eq!(node.leaf_count(), 3);
        assert_eq!(
            node.get("attributes").and_then(|n| n.get("title")),
            Some(&L10nNode::leaf("Title"))
        );
    }

    #[test]
    fn test_arrays_are_leaves() {
        let node = L10nNode::from(json!({"name": ["a", "b"]}));
        assert_eq!(node.get("name"), Some(&L10nNode::Leaf(json!(["a", "b"]))));
    }

    #[test]
    fn test_node_deserialize_roundtrip() {
        let node: L10nNode = serde_json::from_str(r#"{"errors": {"blank": "empty"}}"#).unwrap();
        assert!(node.is_branch());
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({"errors": {"blank": "empty"}})
        );
    }

    #[test]
    fn test_flat_entries_later_write_wins_in_place() {
        let mut entries = FlatEntries::new();
        entries.insert("a.b", json!(1));
        entries.insert("c", json!(2));
        let replaced = entries.insert("a.b", json!(3));

        assert_eq!(replaced, Some(json!(1)));
        let keys: Vec<&String> = entries.keys().collect();
        assert_eq!(keys, vec!["a.b", "c"]);
        assert_eq!(entries.get("a.b"), Some(&json!(3)));
    }

    #[test]
    fn test_language_code_normalisation() {
        assert_eq!(LanguageCode::parse(" en ").unwrap().as_str(), "en");
        assert_eq!(LanguageCode::parse("pt-BR").unwrap().to_string(), "pt-BR");
        assert!(matches!(
            LanguageCode::parse("   "),
            Err(Error::InvalidLanguage { .. })
        ));
    }
}
