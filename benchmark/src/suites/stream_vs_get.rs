// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Container lookup: indexed get against a scan and a filter over children.

use modelbench_core::container::{find_indexed, find_iterating, find_streaming};
use modelbench_core::{
    build_container_fixture, find, BenchError, Component, Container, FixtureConfig,
    LookupStrategy,
};

use crate::harness::{looped, Workload};
use crate::runner::BenchmarkSuite;

/// Suite comparing the child lookup strategies.
#[derive(Debug, Clone)]
pub struct StreamVsGetSuite {
    children: usize,
}

impl StreamVsGetSuite {
    pub const NAME: &'static str = "stream_vs_get";

    pub fn new(fixtures: &FixtureConfig) -> Self {
        Self {
            children: fixtures.container_children,
        }
    }
}

impl BenchmarkSuite for StreamVsGetSuite {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn benchmarks(&self) -> Vec<&'static str> {
        LookupStrategy::ALL
            .iter()
            .map(|strategy| strategy.benchmark_name())
            .collect()
    }

    fn parameters(&self) -> Vec<(&'static str, serde_json::Value)> {
        vec![("children", serde_json::json!(self.children))]
    }

    fn verify(&self) -> Result<(), BenchError> {
        let fixture = build_container_fixture(self.children);
        let key = fixture.target.as_str();
        let expected = fixture.container.get(key);

        for strategy in LookupStrategy::ALL {
            let found = find(&fixture.container, key, strategy);
            let agrees = match (found, expected) {
                (Some(found), Some(expected)) => std::ptr::eq(found, expected),
                (None, None) => true,
                _ => false,
            };
            if !agrees {
                return Err(BenchError::Verification {
                    suite: Self::NAME,
                    message: format!("{} disagrees with indexed lookup for '{}'", strategy, key),
                });
            }
        }
        Ok(())
    }

    fn prepare(&self, benchmark: &str) -> Result<Box<dyn Workload>, BenchError> {
        let strategy = LookupStrategy::from_benchmark_name(benchmark).ok_or_else(|| {
            BenchError::UnknownBenchmark {
                suite: Self::NAME.to_string(),
                benchmark: benchmark.to_string(),
            }
        })?;
        let fixture = build_container_fixture(self.children);
        let lookup: for<'a> fn(&'a Container, &str) -> Option<&'a Component> = match strategy {
            LookupStrategy::Indexed => find_indexed,
            LookupStrategy::Iterator => find_iterating,
            LookupStrategy::Stream => find_streaming,
        };

        tracing::debug!(benchmark, children = self.children, "Prepared lookup workload");
        Ok(Box::new(looped(move || {
            lookup(&fixture.container, fixture.target.as_str()).is_some()
        })))
    }
}
