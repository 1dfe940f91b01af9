//! Builder for assembling rule tables in code
//!
//! Copyright (c) 2025 Arloc Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use super::defaults::default_rules;
use super::table::RuleTable;
use super::target::RuleTarget;
use super::template::Template;
use super::transforms::ValueTransform;

/// How a pending template gets its transform
enum PendingTransform {
    None,
    Resolved(ValueTransform),
    Named(String),
}

/// A rule waiting for [`RuleTableBuilder::build`]
enum PendingRule {
    Templates(Vec<(String, PendingTransform)>),
    Ready(RuleTarget),
}

/// Builder for creating rule tables
///
/// Rules are applied over the base table in the order they were added, so a
/// later rule for the same pattern wins. Named built-in transforms are
/// resolved in [`RuleTableBuilder::build`], which keeps the chain infallible.
pub struct RuleTableBuilder {
    base: RuleTable,
    pending: Vec<(String, PendingRule)>,
}

impl RuleTableBuilder {
    /// Start from an empty table
    pub fn new() -> Self {
        Self::from_table(RuleTable::new())
    }

    /// Start from the default rule table
    pub fn from_defaults() -> Self {
        Self::from_table(default_rules().clone())
    }

    /// Start from an existing table
    pub fn from_table(base: RuleTable) -> Self {
        Self {
            base,
            pending: Vec::new(),
        }
    }

    /// Add a single-template rule
    pub fn rule(self, pattern: impl Into<String>, template: impl Into<String>) -> Self {
        self.push(pattern.into(), vec![(template.into(), PendingTransform::None)])
    }

    /// Add a rule that fans out to several templates
    pub fn rule_many<I, S>(self, pattern: impl Into<String>, templates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let templates = templates
            .into_iter()
            .map(|t| (t.into(), PendingTransform::None))
            .collect();
        self.push(pattern.into(), templates)
    }

    /// Add a single-template rule with a custom transform
    pub fn rule_with_transform(
        self,
        pattern: impl Into<String>,
        template: impl Into<String>,
        transform: ValueTransform,
    ) -> Self {
        self.push(
            pattern.into(),
            vec![(template.into(), PendingTransform::Resolved(transform))],
        )
    }

    /// Add a single-template rule using a built-in transform by name
    pub fn rule_with_builtin(
        self,
        pattern: impl Into<String>,
        template: impl Into<String>,
        transform: impl Into<String>,
    ) -> Self {
        self.push(
            pattern.into(),
            vec![(template.into(), PendingTransform::Named(transform.into()))],
        )
    }

    /// Add an already assembled target
    pub fn target(mut self, pattern: impl Into<String>, target: RuleTarget) -> Self {
        self.pending.push((pattern.into(), PendingRule::Ready(target)));
        self
    }

    /// Build the rule table
    pub fn build(self) -> Result<RuleTable> {
        let mut table = self.base;
        for (pattern, rule) in self.pending {
            let target = match rule {
                PendingRule::Ready(target) => target,
                PendingRule::Templates(templates) => {
                    let templates = templates
                        .into_iter()
                        .map(|(key, transform)| resolve(&pattern, key, transform))
                        .collect::<Result<Vec<_>>>()?;
                    match <[Template; 1]>::try_from(templates) {
                        Ok([single]) => RuleTarget::Single(single),
                        Err(many) => RuleTarget::List(many),
                    }
                }
            };
            table.insert(pattern, target);
        }
        Ok(table)
    }

    fn push(mut self, pattern: String, templates: Vec<(String, PendingTransform)>) -> Self {
        self.pending.push((pattern, PendingRule::Templates(templates)));
        self
    }
}

fn resolve(pattern: &str, key: String, transform: PendingTransform) -> Result<Template> {
    let template = Template::new(key);
    match transform {
        PendingTransform::None => Ok(template),
        PendingTransform::Resolved(t) => Ok(template.with_transform(t)),
        PendingTransform::Named(name) => ValueTransform::builtin(&name)
            .map(|t| template.with_transform(t))
            .ok_or_else(|| Error::rule_configuration(pattern, format!("unknown transform '{}'", name))),
    }
}

impl Default for RuleTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}
