//! Localizer façade: entity naming, rule selection and the full transform
//!
//! Copyright (c) 2025 Arloc Team
//! Licensed under the Apache-2.0 license

use crate::context::ReplacementContext;
use crate::error::{Error, Result};
use crate::expand::expand;
use crate::matcher::PathMatcher;
use crate::rules::{default_rules, RuleTable};
use crate::types::{FlatEntries, L10nNode, LanguageCode};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;
use tracing::{debug, instrument};

/// Derives the model name that seeds the `model` token
///
/// Host integrations implement this for whatever they use to identify a
/// model; the matcher itself only ever sees the resulting string.
pub trait EntityNamer {
    fn entity_name(&self) -> Result<String>;
}

impl EntityNamer for str {
    fn entity_name(&self) -> Result<String> {
        let name = self.trim();
        if name.is_empty() {
            return Err(Error::invalid_entity("entity name is empty"));
        }
        Ok(name.to_string())
    }
}

impl EntityNamer for String {
    fn entity_name(&self) -> Result<String> {
        self.as_str().entity_name()
    }
}

impl<T: EntityNamer + ?Sized> EntityNamer for &T {
    fn entity_name(&self) -> Result<String> {
        (**self).entity_name()
    }
}

/// A qualified type path whose entity name is derived by underscoring
///
/// `BlogPost` becomes `blog_post` and `Admin::UserProfile` becomes
/// `admin/user_profile`. Leading lowercase segments are treated as Rust
/// module paths and dropped, so `my_app::models::BlogPost` is `blog_post`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName(String);

static HUMP_ACRONYM_REGEX: OnceLock<Regex> = OnceLock::new();
static HUMP_REGEX: OnceLock<Regex> = OnceLock::new();
static IDENT_REGEX: OnceLock<Regex> = OnceLock::new();

impl TypeName {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Type path of `T` as reported by the compiler
    pub fn of<T: ?Sized>() -> Self {
        Self::new(std::any::type_name::<T>())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl EntityNamer for TypeName {
    fn entity_name(&self) -> Result<String> {
        let ident = IDENT_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

        let segments: Vec<&str> = self.0.trim().split("::").collect();
        if let Some(bad) = segments.iter().find(|s| !ident.is_match(s)) {
            return Err(Error::invalid_entity(format!(
                "cannot derive a name from type '{}': segment '{}' is not an identifier",
                self.0, bad
            )));
        }

        let namespaced: Vec<String> = segments
            .iter()
            .skip_while(|s| s.starts_with(|c: char| c.is_ascii_lowercase()))
            .map(|s| underscore(s))
            .collect();
        if namespaced.is_empty() {
            return Err(Error::invalid_entity(format!(
                "type path '{}' has no type segment",
                self.0
            )));
        }

        Ok(namespaced.join("/"))
    }
}

/// Split camel humps with `_` and lowercase, ActiveSupport-style
fn underscore(word: &str) -> String {
    let acronym = HUMP_ACRONYM_REGEX.get_or_init(|| Regex::new(r"([A-Z\d]+)([A-Z][a-z])").unwrap());
    let hump = HUMP_REGEX.get_or_init(|| Regex::new(r"([a-z\d])([A-Z])").unwrap());

    let word = acronym.replace_all(word, "${1}_${2}");
    let word = hump.replace_all(&word, "${1}_${2}");
    word.replace('-', "_").to_lowercase()
}

/// Transforms localization data using an immutable rule table
///
/// A `Localizer` is cheap to share: it is never mutated after construction,
/// so concurrent transforms can use one instance without locking.
#[derive(Debug, Clone)]
pub struct Localizer {
    rules: RuleTable,
}

impl Localizer {
    /// Localizer using the default rule table
    pub fn new() -> Self {
        Self::from_table(default_rules().clone())
    }

    /// Localizer using the default table with `overrides` merged over it
    pub fn with_rules(overrides: &RuleTable) -> Self {
        Self::from_table(default_rules().merge(overrides))
    }

    /// Localizer using exactly `rules`, without the defaults
    pub fn from_table(rules: RuleTable) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Resolve data into flat dotted entries without nesting or a language root
    pub fn flatten<E: EntityNamer + ?Sized>(&self, entity: &E, data: &L10nNode) -> Result<FlatEntries> {
        let model = entity.entity_name()?;
        let context = ReplacementContext::for_model(model);
        PathMatcher::new(&self.rules).parse(data, &context, "")
    }

    /// Transform data into `{ language: { ...nested i18n keys... } }`
    #[instrument(level = "debug", skip(self, entity, data), fields(model = tracing::field::Empty))]
    pub fn transform<E: EntityNamer + ?Sized>(
        &self,
        entity: &E,
        language: &str,
        data: &L10nNode,
    ) -> Result<Value> {
        let model = entity.entity_name()?;
        tracing::Span::current().record("model", model.as_str());
        let language = LanguageCode::parse(language)?;

        let context = ReplacementContext::for_model(model);
        let entries = PathMatcher::new(&self.rules).parse(data, &context, "")?;
        debug!(
            entries = entries.len(),
            leaves = data.leaf_count(),
            "resolved localization entries"
        );

        let mut root = Map::new();
        root.insert(language.into(), Value::Object(expand(&entries)));
        Ok(Value::Object(root))
    }

    /// [`Localizer::transform`] for raw JSON data
    pub fn transform_value<E: EntityNamer + ?Sized>(
        &self,
        entity: &E,
        language: &str,
        data: &Value,
    ) -> Result<Value> {
        self.transform(entity, language, &L10nNode::from(data.clone()))
    }

    /// [`Localizer::transform`] naming the entity after the type `T`
    pub fn transform_type<T: ?Sized>(&self, language: &str, data: &L10nNode) -> Result<Value> {
        self.transform(&TypeName::of::<T>(), language, data)
    }
}

impl Default for Localizer {
    fn default() -> Self {
        Self::new()
    }
}
