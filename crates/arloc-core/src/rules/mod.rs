//! Rule tables mapping input paths to dotted i18n keys
//!
//! A rule pairs a slash-delimited pattern (`attributes/:attr/errors/:error`)
//! with one or more output-key templates
//! (`activerecord.errors.models.%{model}.attributes.%{attr}.%{error}`).
//!
//! # Module Organization
//!
//! - [`pattern`] - Pattern and segment parsing
//! - [`template`] - `%{token}` templates and substitution
//! - [`transforms`] - Named value transforms, including the built-ins
//! - [`target`] - Single or multi-template rule targets
//! - [`table`] - The ordered rule table and its shallow merge
//! - [`defaults`] - The default ActiveRecord rule table
//! - [`builder`] - Fluent builder API for rule tables
//!
//! # Example
//!
//! ```
//! use arloc_core::rules::{default_rules, RuleTableBuilder};
//!
//! let overrides = RuleTableBuilder::new()
//!     .rule_many("name/plural", [
//!         "activerecord.models.%{model}.other",
//!         "activerecord.models.%{model}.many",
//!     ])
//!     .build()
//!     .unwrap();
//!
//! let rules = default_rules().merge(&overrides);
//! assert_eq!(rules.get("name/plural").unwrap().templates().len(), 2);
//! ```
//!
//! Copyright (c) 2025 Arloc Team
//! Licensed under the Apache-2.0 license

pub mod builder;
pub mod defaults;
pub mod pattern;
pub mod table;
pub mod target;
pub mod template;
pub mod transforms;


pub use builder::RuleTableBuilder;
pub use defaults::{default_rules, DEFAULT_RULES};
pub use pattern::{RulePattern, Segment};
pub use table::{RuleTable, UnboundToken};
pub use target::RuleTarget;
pub use template::Template;
pub use transforms::{TransformFn, ValueTransform};
