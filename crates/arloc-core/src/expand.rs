//! Flat-to-nested expansion of dotted output keys
//!
//! Each dotted key is split on `.` and its value is assigned at the end of
//! the resulting path, creating intermediate maps as needed. Writes are
//! applied in entry order and the last write to any node wins, including
//! when a key is a strict prefix of another:
//!
//! - `a.b` then `a.b.c`: the leaf at `a.b` is replaced by a map holding `c`.
//! - `a.b.c` then `a.b`: the map at `a.b` is replaced by the leaf.
//!
//! Copyright (c) 2025 Arloc Team
//! Licensed under the Apache-2.0 license

use crate::types::FlatEntries;
use serde_json::{Map, Value};

/// Separator between levels of an output key
pub const KEY_SEPARATOR: char = '.';

/// Expand flat dotted entries into a freshly allocated nested map
pub fn expand(entries: &FlatEntries) -> Map<String, Value> {
    let mut root = Map::new();
    for (key, value) in entries.iter() {
        assign(&mut root, key, value.clone());
    }
    root
}

/// Assign `value` at the dotted `key` below `root`
pub fn assign(root: &mut Map<String, Value>, key: &str, value: Value) {
    let mut segments: Vec<&str> = key.split(KEY_SEPARATOR).collect();
    // split always yields at least one segment
    let last = segments.pop().unwrap_or(key);

    let mut target = root;
    for segment in segments {
        let slot = target
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        target = match slot {
            Value::Object(map) => map,
            _ => unreachable!("slot was just made an object"),
        };
    }

    target.insert(last.to_string(), value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entries(pairs: &[(&str, Value)]) -> FlatEntries {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn test_expand_shares_prefixes() {
        let flat = entries(&[
            ("activerecord.models.post.one", json!("Post")),
            ("activerecord.models.post.other", json!("Posts")),
            ("activerecord.attributes.post.title", json!("Title")),
        ]);
        assert_eq!(
            Value::Object(expand(&flat)),
            json!({
                "activerecord": {
                    "models": {"post": {"one": "Post", "other": "Posts"}},
                    "attributes": {"post": {"title": "Title"}}
                }
            })
        );
    }

    #[test]
    fn test_expand_leaf_then_deeper_key() {
        let flat = entries(&[
            ("activerecord.models.post", json!("Post")),
            ("activerecord.models.post.one", json!("Post")),
        ]);
        assert_eq!(
            Value::Object(expand(&flat)),
            json!({"activerecord": {"models": {"post": {"one": "Post"}}}})
        );
    }

    #[test]
    fn test_expand_deeper_key_then_leaf() {
        let flat = entries(&[
            ("activerecord.models.post.one", json!("Post")),
            ("activerecord.models.post", json!("Post")),
        ]);
        assert_eq!(
            Value::Object(expand(&flat)),
            json!({"activerecord": {"models": {"post": "Post"}}})
        );
    }

    #[test]
    fn test_expand_single_segment_and_empty_segments() {
        let flat = entries(&[("title", json!(1)), ("a..b", json!(2))]);
        assert_eq!(
            Value::Object(expand(&flat)),
            json!({"title": 1, "a": {"": {"b": 2}}})
        );
    }

    #[test]
    fn test_expand_does_not_consume_input() {
        let flat = entries(&[("a.b", json!("x"))]);
        let _ = expand(&flat);
        assert_eq!(flat.get("a.b"), Some(&json!("x")));
    }
}
