//! Fuzzing target for model data
//!
//! Arbitrary JSON input is transformed with the default rules, which bind
//! every token they use, so the transform must always succeed.

#![no_main]

use arloc_core::transform;
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = serde_json::from_slice::<Value>(data) else {
        return;
    };

    let result = transform("post", "en", &input);
    assert!(result.is_ok(), "default rules failed: {:?}", result);
});
