//! Benchmarks for path resolution, validation and template binding.
//!
//! Run with: cargo bench -p aas-binder

#![allow(clippy::expect_used)]

use aas_binder::dto::CARBON_FOOTPRINT;
use aas_binder::{
    bind, duplicate_collection, is_valid, resolve, CarbonFootprintTemplate, ElementTree,
    PathAddress, SubmodelTemplate, ValueBinder,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

const FULL_TEMPLATE: &str = include_str!("../../../templates/FullAASTemplate.yaml");
const FOOTPRINT_TEMPLATE: &str = include_str!("../../../templates/CarbonFootprint.yaml");

/// Full document with `groups` product footprint groups.
fn build_document(groups: usize) -> ElementTree {
    let mut tree =
        ElementTree::from_yaml_str(FULL_TEMPLATE).expect("Failed to load FullAASTemplate");
    for n in 2..=groups {
        let name = format!("ProductCarbonFootprint_{n}");
        let outcome =
            duplicate_collection(&mut tree, CARBON_FOOTPRINT, "ProductCarbonFootprint", &name);
        assert!(outcome.is_applied());
    }
    tree
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    let binder = ValueBinder::default();

    for groups in [1, 10, 100] {
        let tree = build_document(groups);
        let last = if groups == 1 {
            "ProductCarbonFootprint".to_string()
        } else {
            format!("ProductCarbonFootprint_{groups}")
        };
        let address = PathAddress::nested(CARBON_FOOTPRINT, [last.as_str()], "PCFCO2eq");
        let missing = PathAddress::nested(CARBON_FOOTPRINT, [last.as_str()], "Missing");

        group.bench_with_input(BenchmarkId::new("last_group", groups), &groups, |b, _| {
            b.iter(|| black_box(resolve(&tree, black_box(&address)).is_found()));
        });

        group.bench_with_input(BenchmarkId::new("get_property", groups), &groups, |b, _| {
            b.iter(|| black_box(binder.get_property(&tree, black_box(&address))));
        });

        // Absent leaf: the full scan of the last collection
        group.bench_with_input(BenchmarkId::new("absent_leaf", groups), &groups, |b, _| {
            b.iter(|| black_box(resolve(&tree, black_box(&missing)).is_found()));
        });
    }

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    let template =
        ElementTree::from_yaml_str(FOOTPRINT_TEMPLATE).expect("Failed to load CarbonFootprint");

    for groups in [1, 10, 100] {
        let tree = build_document(groups);
        group.bench_with_input(BenchmarkId::new("carbon_footprint", groups), &groups, |b, _| {
            b.iter(|| black_box(is_valid(&template, black_box(&tree), CARBON_FOOTPRINT)));
        });
    }

    group.finish();
}

fn bench_bind(c: &mut Criterion) {
    let mut group = c.benchmark_group("bind");
    let descriptor = CarbonFootprintTemplate::descriptor();

    for groups in [1, 10, 100] {
        let tree = build_document(groups);
        group.bench_with_input(BenchmarkId::new("carbon_footprint", groups), &groups, |b, _| {
            b.iter(|| {
                let mut view = CarbonFootprintTemplate::default();
                let report = bind(&mut view, black_box(&tree), &descriptor);
                black_box(report.is_ok())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_resolve, bench_validate, bench_bind);
criterion_main!(benches);
