//! Rules command handler

use crate::cli::RulesArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use tracing::instrument;

use super::utils::effective_rules;

/// Handle the rules command
#[instrument(skip(config, output))]
pub fn handle_rules(args: RulesArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let rules = effective_rules(config, args.rules.as_deref())?;

    output.info(&format!(
        "{} rules (defaults, {}{})",
        rules.len(),
        config.source_display(),
        args.rules
            .as_ref()
            .map(|p| format!(", {}", p.display()))
            .unwrap_or_default()
    ))?;

    if !args.lint {
        return output.rule_table(&rules);
    }

    let findings = rules.unbound_tokens();
    if findings.is_empty() {
        output.success("✓ Every template token is bound by its pattern")?;
        return Ok(());
    }

    output.unbound_tokens(&findings)?;
    Err(Error::config(format!(
        "{} template token(s) can never be bound",
        findings.len()
    )))
}
