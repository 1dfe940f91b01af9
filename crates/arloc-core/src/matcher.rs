//! Recursive path matcher
//!
//! The matcher walks the input tree depth-first. At each level it narrows the
//! rule table to patterns under the current path, extracts the set of
//! possible next segments, and matches every input key against them:
//!
//! 1. Literal segments are tried before wildcard segments. Within each
//!    group, segments are ordered by descending string order.
//! 2. The first matching segment wins. Keys with no matching segment are
//!    dropped together with their subtree; this is filtering, not an error.
//! 3. A wildcard match binds the key to the wildcard's token in a copy of
//!    the context, visible only below that key.
//! 4. Branches recurse one level deeper; leaves emit one entry per template
//!    registered under the exact matched path.
//!
//! There is no backtracking: once a key has been routed to a segment, a
//! failure further down is never retried against another segment.
//!
//! Copyright (c) 2025 Arloc Team
//! Licensed under the Apache-2.0 license

use crate::context::ReplacementContext;
use crate::error::Result;
use crate::rules::pattern::{Segment, SEGMENT_SEPARATOR, WILDCARD_PREFIX};
use crate::rules::RuleTable;
use crate::types::{FlatEntries, L10nNode};
use serde_json::Value;
use tracing::{debug, trace};

/// Matcher over a borrowed, read-only rule table
#[derive(Debug, Clone, Copy)]
pub struct PathMatcher<'a> {
    rules: &'a RuleTable,
}

impl<'a> PathMatcher<'a> {
    pub fn new(rules: &'a RuleTable) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'a RuleTable {
        self.rules
    }

    /// Resolve every leaf below `node` into output entries
    ///
    /// `current_path` is the slash-joined pattern prefix matched so far; it is
    /// empty at the root and otherwise ends with `/`.
    pub fn parse(
        &self,
        node: &L10nNode,
        context: &ReplacementContext,
        current_path: &str,
    ) -> Result<FlatEntries> {
        let mut result = FlatEntries::new();
        let L10nNode::Branch(children) = node else {
            return Ok(result);
        };

        let candidates = self.candidate_segments(current_path);

        for (key, child) in children {
            let Some(segment) = candidates.iter().find(|s| s.matches(key)) else {
                trace!(path = current_path, key = %key, "no rule matches key, dropping");
                continue;
            };

            let bound;
            let scoped = match segment {
                Segment::Wildcard(token) => {
                    bound = context.with_binding(token.as_str(), key.as_str());
                    &bound
                }
                Segment::Literal(_) => context,
            };

            let matched_path = format!("{}{}", current_path, segment);
            trace!(key = %key, path = %matched_path, "matched key");

            match child {
                L10nNode::Branch(_) => {
                    let nested_path = format!("{}{}", matched_path, SEGMENT_SEPARATOR);
                    result.merge(self.parse(child, scoped, &nested_path)?);
                }
                L10nNode::Leaf(value) => {
                    self.emit(&matched_path, value, scoped, &mut result)?;
                }
            }
        }

        Ok(result)
    }

    /// Possible next segments below `current_path`, in match order
    pub fn candidate_segments(&self, current_path: &str) -> Vec<Segment> {
        let mut literals: Vec<&str> = Vec::new();
        let mut wildcards: Vec<&str> = Vec::new();

        for pattern in self.rules.patterns() {
            let Some(rest) = pattern.strip_prefix(current_path) else {
                continue;
            };
            let next = rest.split(SEGMENT_SEPARATOR).next().unwrap_or(rest);
            let bucket = if next.starts_with(WILDCARD_PREFIX) {
                &mut wildcards
            } else {
                &mut literals
            };
            if !bucket.contains(&next) {
                bucket.push(next);
            }
        }

        literals.sort_unstable_by(|a, b| b.cmp(a));
        wildcards.sort_unstable_by(|a, b| b.cmp(a));

        literals
            .into_iter()
            .chain(wildcards)
            .map(Segment::parse)
            .collect()
    }

    /// Emit entries for a leaf matched at `rule_path`
    fn emit(
        &self,
        rule_path: &str,
        value: &Value,
        context: &ReplacementContext,
        result: &mut FlatEntries,
    ) -> Result<()> {
        let Some(target) = self.rules.get(rule_path) else {
            debug!(path = rule_path, "leaf matched an intermediate path with no rule, skipping");
            return Ok(());
        };

        for template in target.templates() {
            let emitted = template.apply(value);
            let key = template.render(context, rule_path)?;
            trace!(path = rule_path, key = %key, "emitting entry");
            result.insert(key, emitted);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{default_rules, RuleTableBuilder};
    use crate::Error;
    use serde_json::json;

    fn parse(rules: &RuleTable, model: &str, data: Value) -> Result<FlatEntries> {
        PathMatcher::new(rules).parse(
            &L10nNode::from(data),
            &ReplacementContext::for_model(model),
            "",
        )
    }

    #[test]
    fn test_candidate_segments_at_root() {
        let matcher = PathMatcher::new(default_rules());
        let segments: Vec<String> = matcher
            .candidate_segments("")
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(segments, vec!["name", "errors", "attributes"]);
    }

    #[test]
    fn test_candidate_segments_literals_before_wildcards() {
        let matcher = PathMatcher::new(default_rules());
        let segments: Vec<String> = matcher
            .candidate_segments("name/")
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(segments, vec!["singular", "plural", ":key"]);

        let segments: Vec<String> = matcher
            .candidate_segments("attributes/:attr/")
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(segments, vec!["name", "errors"]);
    }

    #[test]
    fn test_candidate_wildcards_sorted_descending() {
        let rules = RuleTableBuilder::new()
            .rule("name/:alpha", "a.%{alpha}")
            .rule("name/Zulu", "zulu")
            .rule("name/:zeta", "z.%{zeta}")
            .build()
            .unwrap();
        let segments: Vec<String> = PathMatcher::new(&rules)
            .candidate_segments("name/")
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(segments, vec!["Zulu", ":zeta", ":alpha"]);
    }

    #[test]
    fn test_later_sorting_wildcard_wins_regardless_of_declaration() {
        let rules = RuleTableBuilder::new()
            .rule("name/:alpha", "a.%{alpha}")
            .rule("name/:zeta", "z.%{zeta}")
            .build()
            .unwrap();
        let entries = parse(&rules, "post", json!({"name": {"few": "x"}})).unwrap();
        assert_eq!(entries.get("z.few"), Some(&json!("x")));
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_sibling_bindings_are_isolated() {
        let rules = RuleTableBuilder::new()
            .rule("name/:key", "m.%{key}")
            .rule("name/singular", "s.%{key}")
            .build()
            .unwrap();
        let err = parse(&rules, "post", json!({"name": {"few": "x", "singular": "y"}})).unwrap_err();
        match err {
            Error::MissingReplacement { token, template, path } => {
                assert_eq!(token, "key");
                assert_eq!(template, "s.%{key}");
                assert_eq!(path, "name/singular");
            }
            other => panic!("expected MissingReplacement, got {:?}", other),
        }
    }

    #[test]
    fn test_plain_name_leaf() {
        let entries = parse(default_rules(), "post", json!({"name": "Post"})).unwrap();
        assert_eq!(entries.get("activerecord.models.post"), Some(&json!("Post")));
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_name_wildcard_key() {
        let entries = parse(
            default_rules(),
            "post",
            json!({"name": {"singular": "Post", "few": "Posty"}}),
        )
        .unwrap();
        assert_eq!(entries.get("activerecord.models.post.one"), Some(&json!("Post")));
        assert_eq!(entries.get("activerecord.models.post.few"), Some(&json!("Posty")));
    }

    #[test]
    fn test_attribute_shapes() {
        let entries = parse(
            default_rules(),
            "user",
            json!({
                "attributes": {
                    "email": "E-mail",
                    "name": {
                        "name": "Full name",
                        "errors": {"blank": "is required", "too_long": "is too long"}
                    }
                }
            }),
        )
        .unwrap();

        assert_eq!(entries.get("activerecord.attributes.user.email"), Some(&json!("E-mail")));
        assert_eq!(entries.get("activerecord.attributes.user.name"), Some(&json!("Full name")));
        assert_eq!(
            entries.get("activerecord.errors.models.user.attributes.name.blank"),
            Some(&json!("is required"))
        );
        assert_eq!(
            entries.get("activerecord.errors.models.user.attributes.name.too_long"),
            Some(&json!("is too long"))
        );
        assert_eq!(entries.len(), 4);
    }

    #[test]
    fn test_nested_wildcards_bind_per_level() {
        let rules = RuleTableBuilder::new()
            .rule("errors/:error", "e.%{error}")
            .rule("errors/:error/:detail", "d.%{error}.%{detail}")
            .build()
            .unwrap();
        let entries = parse(
            &rules,
            "user",
            json!({"errors": {"blank": "b", "format": {"email": "bad"}}}),
        )
        .unwrap();
        assert_eq!(entries.get("e.blank"), Some(&json!("b")));
        assert_eq!(entries.get("d.format.email"), Some(&json!("bad")));
    }

    #[test]
    fn test_unknown_keys_dropped() {
        let entries = parse(
            default_rules(),
            "post",
            json!({"colour": "red", "name": {"singular": "Post"}, "extra": {"deep": "x"}}),
        )
        .unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries.contains_key("activerecord.models.post.one"));
    }

    #[test]
    fn test_leaf_at_intermediate_path_emits_nothing() {
        // `attributes/:attr/errors` exists only as a prefix, never as a rule
        let entries = parse(
            default_rules(),
            "post",
            json!({"attributes": {"title": {"errors": "oops"}}}),
        )
        .unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_leaf_root_yields_nothing() {
        let entries = parse(default_rules(), "post", json!("just a string")).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_unbound_token_aborts() {
        let rules = default_rules().merge(
            &RuleTableBuilder::new()
                .rule("errors/:error", "activerecord.%{model}.%{attr}")
                .build()
                .unwrap(),
        );
        let err = parse(&rules, "post", json!({"name": "Post", "errors": {"blank": "x"}})).unwrap_err();
        assert!(matches!(err, Error::MissingReplacement { ref token, .. } if token == "attr"));
    }

    #[test]
    fn test_malformed_wildcard_never_matches() {
        let rules = RuleTableBuilder::new()
            .rule("errors/:", "broken")
            .build()
            .unwrap();
        let entries = parse(&rules, "post", json!({"errors": {"blank": "x"}})).unwrap();
        assert!(entries.is_empty());
    }
}
