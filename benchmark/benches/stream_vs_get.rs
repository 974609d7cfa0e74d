// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Criterion benchmarks for the container lookup strategies.
//!
//! Looks up the middle child at several container sizes.

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use modelbench_core::{build_container_fixture, find, LookupStrategy};

/// Container sizes to benchmark (in children).
const CHILD_COUNTS: &[usize] = &[100, 10_000, 100_000];

fn bench_lookup(c: &mut Criterion) {
    for strategy in LookupStrategy::ALL {
        let mut group = c.benchmark_group(strategy.benchmark_name());
        group.measurement_time(Duration::from_secs(5));

        for &children in CHILD_COUNTS {
            let fixture = build_container_fixture(children);

            group.bench_with_input(
                BenchmarkId::from_parameter(children),
                &fixture,
                |b, fixture| {
                    b.iter(|| {
                        black_box(find(
                            &fixture.container,
                            black_box(fixture.target.as_str()),
                            strategy,
                        ))
                    })
                },
            );
        }

        group.finish();
    }
}

criterion_group!(benches, bench_lookup);

criterion_main!(benches);
