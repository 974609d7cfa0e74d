// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Criterion benchmarks for the property access strategies.
//!
//! Mirrors the `lambda_models` suite, with criterion's own sampling and
//! HTML reports.

use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use modelbench_core::fixture::account_supplier;
use modelbench_core::{
    build_property_fixture, fixture_resolver, LoadableModel, Model, PropertyAccessors,
    PropertyStrategy, ValueModel,
};

/// Each strategy over a root model holding the account.
fn bench_value_root(c: &mut Criterion) {
    let mut group = c.benchmark_group("lambda_models");
    group.measurement_time(Duration::from_secs(5));

    let accessors = PropertyAccessors::new(
        ValueModel::of(Arc::new(build_property_fixture())),
        fixture_resolver(),
    );

    group.bench_function("native_evaluation", |b| {
        b.iter(|| black_box(accessors.native()))
    });
    group.bench_function("read_only_model", |b| {
        b.iter(|| black_box(accessors.read_only.get_object()))
    });
    group.bench_function("direct_lambda_model", |b| {
        b.iter(|| black_box(accessors.direct_lambda.get_object()))
    });
    group.bench_function("chained_model", |b| {
        b.iter(|| black_box(accessors.chained.get_object()))
    });
    group.bench_function("chained_lambda_model", |b| {
        b.iter(|| black_box(accessors.lambda_chained.get_object()))
    });
    group.bench_function("property_model", |b| {
        b.iter(|| black_box(accessors.property.get_object()))
    });

    group.finish();
}

/// Each strategy over a loadable root that stays attached.
fn bench_loadable_root(c: &mut Criterion) {
    let mut group = c.benchmark_group("lambda_models_loadable");
    group.measurement_time(Duration::from_secs(3));

    let accessors = PropertyAccessors::new(LoadableModel::of(account_supplier()), fixture_resolver());

    for strategy in PropertyStrategy::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(strategy),
            &strategy,
            |b, &strategy| b.iter(|| black_box(accessors.evaluate(black_box(strategy)))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_value_root, bench_loadable_root);

criterion_main!(benches);
