//! Fuzzing target for rule documents
//!
//! Arbitrary JSON is parsed as an override rule document. Parsing may fail,
//! but must never panic, and any table that parses must survive a transform.

#![no_main]

use arloc_core::{Localizer, RuleTable};
use libfuzzer_sys::fuzz_target;
use serde_json::{json, Value};

fuzz_target!(|data: &[u8]| {
    let Ok(doc) = serde_json::from_slice::<Value>(data) else {
        return;
    };

    if let Ok(table) = RuleTable::from_document(&doc) {
        // Rendering back must parse to the same table
        let reparsed = RuleTable::from_document(&table.to_document());
        assert_eq!(reparsed.ok().as_ref(), Some(&table));

        let _ = table.unbound_tokens();
        let _ = Localizer::with_rules(&table).transform_value(
            "post",
            "en",
            &json!({
                "name": {"singular": "Post", "plural": "Posts"},
                "errors": {"blank": "blank"},
                "attributes": {"title": {"name": "Title", "errors": {"taken": "taken"}}}
            }),
        );
    }
});
