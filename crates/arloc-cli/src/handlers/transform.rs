//! Transform command handler

use crate::cli::TransformArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use arloc_core::{EntityNamer, L10nNode, Localizer, TypeName};
use serde_json::Value;
use tracing::{debug, info, instrument};

use super::utils::{effective_rules, load_document, save_document};

/// Handle the transform command
#[instrument(skip(config, output), fields(
    file = %args.data_file.display(),
    entity = %args.entity
))]
pub fn handle_transform(
    args: TransformArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let language = args
        .language
        .clone()
        .or_else(|| config.default_language.clone())
        .ok_or_else(|| {
            Error::invalid_args("no --language given and no default_language configured")
        })?;
    let timer = Timer::with_details(
        "transform_command",
        &format!("entity: {}, language: {}", args.entity, language),
    );

    let data = {
        let _load_timer = Timer::new("data_loading");
        load_document(&args.data_file)?
    };
    if !data.is_object() {
        return Err(Error::InvalidFormat {
            path: args.data_file.clone(),
            expected: "a mapping at the top level".to_string(),
            reason: format!("found {}", value_kind(&data)),
        });
    }

    let rules = effective_rules(config, args.rules.as_deref())?;
    let localizer = Localizer::from_table(rules);

    let entity: Box<dyn EntityNamer> = if args.type_name {
        Box::new(TypeName::new(args.entity.as_str()))
    } else {
        Box::new(args.entity.clone())
    };
    let model = entity.entity_name()?;
    info!(model = %model, language = %language, "Transforming localization data");
    output.info(&format!(
        "Transforming {} as '{}' ({})",
        args.data_file.display(),
        model,
        language
    ))?;

    let tree = L10nNode::from(data);
    let result = if args.flat {
        let entries = localizer.flatten(entity.as_ref(), &tree)?;
        debug!(entries = entries.len(), "Resolved flat entries");
        output.entries(&entries)?;
        serde_json::to_value(&entries)?
    } else {
        let result = localizer.transform(entity.as_ref(), &language, &tree)?;
        output.data(&result)?;
        result
    };

    if let Some(path) = &args.save_to {
        save_document(path, &result)?;
        output.success(&format!("✓ Output saved to {}", path.display()))?;
    }

    if output.is_verbose() {
        output.info(&format!("Completed in {}ms", timer.elapsed().as_millis()))?;
    }

    Ok(())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
