//! Benchmarks for rule matching and key expansion
//!
//! Copyright (c) 2025 Arloc Team
//! Licensed under the Apache-2.0 license

use arloc_core::expand::expand;
use arloc_core::{default_rules, FlatEntries, L10nNode, Localizer, PathMatcher, RuleTableBuilder};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Map, Value};

fn create_model_data() -> Value {
    json!({
        "name": {"singular": "Post", "plural": "Posts"},
        "errors": {"invalid": "is invalid", "stale": "was modified"},
        "attributes": {
            "title": "Title",
            "body": {"name": "Body", "errors": {"blank": "can't be blank", "too_long": "is too long"}},
            "published_at": "Published"
        }
    })
}

fn create_wide_data(attributes: usize) -> Value {
    let mut attrs = Map::new();
    for i in 0..attributes {
        attrs.insert(
            format!("attr_{}", i),
            json!({
                "name": format!("Attribute {}", i),
                "errors": {"blank": "can't be blank", "invalid": "is invalid", "taken": "is taken"}
            }),
        );
    }
    json!({"name": {"singular": "Record", "plural": "Records"}, "attributes": attrs})
}

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");
    let localizer = Localizer::new();
    let data = L10nNode::from(create_model_data());

    group.bench_function("default_rules", |b| {
        b.iter(|| localizer.transform(black_box("post"), black_box("en"), black_box(&data)))
    });

    let overrides = RuleTableBuilder::new()
        .rule_many("name/plural", ["activerecord.models.%{model}.other", "helpers.titles.%{model}"])
        .rule_with_builtin("attributes/:attr/name", "activerecord.attributes.%{model}.%{attr}", "capitalize")
        .build();
    if let Ok(overrides) = overrides {
        let custom = Localizer::with_rules(&overrides);
        group.bench_function("override_rules", |b| {
            b.iter(|| custom.transform(black_box("post"), black_box("en"), black_box(&data)))
        });
    }

    group.finish();
}

fn bench_wide_models(c: &mut Criterion) {
    let mut group = c.benchmark_group("wide_models");
    let localizer = Localizer::new();

    for size in [10, 100, 1000] {
        let data = L10nNode::from(create_wide_data(size));
        group.bench_with_input(BenchmarkId::new("attributes", size), &data, |b, data| {
            b.iter(|| localizer.transform(black_box("record"), "en", data))
        });
    }

    group.finish();
}

fn bench_candidate_segments(c: &mut Criterion) {
    let mut group = c.benchmark_group("candidate_segments");
    let matcher = PathMatcher::new(default_rules());

    for path in ["", "name/", "attributes/:attr/", "attributes/:attr/errors/"] {
        group.bench_with_input(BenchmarkId::new("path", path), path, |b, path| {
            b.iter(|| matcher.candidate_segments(black_box(path)))
        });
    }

    group.finish();
}

fn bench_expand(c: &mut Criterion) {
    let mut group = c.benchmark_group("expand");

    for size in [10, 1000] {
        let entries: FlatEntries = (0..size)
            .map(|i| (format!("activerecord.attributes.record.attr_{}", i), json!("Label")))
            .collect();
        group.bench_with_input(BenchmarkId::new("entries", size), &entries, |b, entries| {
            b.iter(|| expand(black_box(entries)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_transform,
    bench_wide_models,
    bench_candidate_segments,
    bench_expand
);
criterion_main!(benches);
