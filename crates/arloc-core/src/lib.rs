//! Arloc Core - Rule engine for ActiveRecord-style localization keys
//!
//! This crate rewrites a small nested mapping of human-authored localization
//! data for one model (names, pluralizations, attribute labels, error messages)
//! into the nested i18n key structure a lookup store expects, rooted at a
//! language code.
//!
//! # Main Components
//!
//! - **Error Handling**: Error types using `thiserror`
//! - **Rule Tables**: Patterns mapped to output-key templates, with defaults
//! - **Path Matcher**: Recursive, wildcard-aware walk over the input tree
//! - **Expansion**: Dotted output keys re-nested into a result tree
//! - **Localizer**: The façade tying rules, matching and expansion together
//!
//! # Example
//!
//! ```
//! use arloc_core::transform;
//! use serde_json::json;
//!
//! let result = transform(
//!     "post",
//!     "en",
//!     &json!({
//!         "name": {"singular": "Post", "plural": "Posts"},
//!         "attributes": {"title": "Title"}
//!     }),
//! )
//! .unwrap();
//!
//! assert_eq!(result, json!({
//!     "en": {
//!         "activerecord": {
//!             "models": {"post": {"one": "Post", "other": "Posts"}},
//!             "attributes": {"post": {"title": "Title"}}
//!         }
//!     }
//! }));
//! ```

pub mod context;
pub mod error;
pub mod expand;
pub mod localizer;
pub mod matcher;
pub mod rules;
pub mod types;

// Re-export main types for convenience
pub use context::ReplacementContext;
pub use error::{Error, Result};
pub use localizer::{EntityNamer, Localizer, TypeName};
pub use matcher::PathMatcher;
pub use rules::{
    default_rules, RulePattern, RuleTable, RuleTableBuilder, RuleTarget, Segment, Template,
    ValueTransform,
};
pub use types::{FlatEntries, L10nNode, LanguageCode};

use serde_json::Value;
use std::sync::OnceLock;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

static DEFAULT_LOCALIZER: OnceLock<Localizer> = OnceLock::new();

/// Process-wide localizer using the default rule table
pub fn default_localizer() -> &'static Localizer {
    DEFAULT_LOCALIZER.get_or_init(Localizer::new)
}

/// Transform localization data with the default rule table
///
/// See [`Localizer::transform`] to use custom rules.
pub fn transform<E: EntityNamer + ?Sized>(entity: &E, language: &str, data: &Value) -> Result<Value> {
    default_localizer().transform_value(entity, language, data)
}
