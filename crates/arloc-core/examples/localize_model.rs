// Transform a model's localization data into i18n keys
// Usage: cargo run --example localize_model [language]
// Example: cargo run --example localize_model de

use arloc_core::{Localizer, RuleTableBuilder};
use serde_json::json;
use std::env;

struct BlogPost;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let language = env::args().nth(1).unwrap_or_else(|| "en".to_string());

    let data = json!({
        "name": {"singular": "Blog post", "plural": "Blog posts"},
        "errors": {"stale": "was changed by someone else"},
        "attributes": {
            "title": {"name": "Title", "errors": {"blank": "can't be blank"}},
            "slug": "URL slug"
        }
    });

    // Default rules, entity named after the Rust type
    let localizer = Localizer::new();
    let result = localizer.transform_type::<BlogPost>(&language, &data.clone().into())?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    // Extra rules merged over the defaults
    let overrides = RuleTableBuilder::new()
        .rule_many(
            "name/plural",
            ["activerecord.models.%{model}.other", "helpers.page_titles.%{model}"],
        )
        .rule_with_builtin("attributes/:attr/name", "activerecord.attributes.%{model}.%{attr}", "upcase")
        .build()?;
    let result = Localizer::with_rules(&overrides).transform_value("blog_post", &language, &data)?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
