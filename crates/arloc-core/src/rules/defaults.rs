//! The default rule table
//!
//! Copyright (c) 2025 Arloc Team
//! Licensed under the Apache-2.0 license

use super::table::RuleTable;
use std::sync::OnceLock;

/// Default patterns and templates, in declaration order
pub const DEFAULT_RULES: &[(&str, &str)] = &[
    // per-model
    ("name", "activerecord.models.%{model}"),
    ("name/singular", "activerecord.models.%{model}.one"),
    ("name/plural", "activerecord.models.%{model}.other"),
    ("name/:key", "activerecord.models.%{model}.%{key}"),
    ("errors/:error", "activerecord.errors.models.%{model}.%{error}"),
    // per-attribute; a bare value is the attribute's display name
    ("attributes/:attr", "activerecord.attributes.%{model}.%{attr}"),
    ("attributes/:attr/name", "activerecord.attributes.%{model}.%{attr}"),
    (
        "attributes/:attr/errors/:error",
        "activerecord.errors.models.%{model}.attributes.%{attr}.%{error}",
    ),
];

static DEFAULT_TABLE: OnceLock<RuleTable> = OnceLock::new();

/// The default rule table, built once per process
pub fn default_rules() -> &'static RuleTable {
    DEFAULT_TABLE.get_or_init(|| DEFAULT_RULES.iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::target::RuleTarget;

    #[test]
    fn test_default_table_contents() {
        let rules = default_rules();
        assert_eq!(rules.len(), 8);
        for (pattern, template) in DEFAULT_RULES {
            assert_eq!(rules.get(pattern), Some(&RuleTarget::from(*template)));
        }
    }

    #[test]
    fn test_default_table_has_no_unbound_tokens() {
        assert!(default_rules().unbound_tokens().is_empty());
    }
}
