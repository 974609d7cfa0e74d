// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Property access: reading `account.person.name` through each model shape.

use std::sync::Arc;

use modelbench_core::{
    build_property_fixture_named, fixture_resolver, Account, BenchError, FixtureConfig, Model,
    PropertyAccessors, PropertyStrategy, ValueModel,
};

use crate::harness::{looped, Workload};
use crate::runner::BenchmarkSuite;

/// Suite comparing the property access strategies.
#[derive(Debug, Clone)]
pub struct LambdaModelsSuite {
    person_name: String,
}

impl LambdaModelsSuite {
    pub const NAME: &'static str = "lambda_models";

    pub fn new(fixtures: &FixtureConfig) -> Self {
        Self {
            person_name: fixtures.person_name.clone(),
        }
    }

    fn accessors(&self) -> PropertyAccessors<ValueModel<Arc<Account>>> {
        let account = Arc::new(build_property_fixture_named(&self.person_name));
        PropertyAccessors::new(ValueModel::of(account), fixture_resolver())
    }
}

impl BenchmarkSuite for LambdaModelsSuite {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn benchmarks(&self) -> Vec<&'static str> {
        PropertyStrategy::ALL
            .iter()
            .map(|strategy| strategy.benchmark_name())
            .collect()
    }

    fn parameters(&self) -> Vec<(&'static str, serde_json::Value)> {
        vec![("person_name", serde_json::json!(self.person_name))]
    }

    fn verify(&self) -> Result<(), BenchError> {
        let name = self.accessors().verify()?;
        if *name != *self.person_name {
            return Err(BenchError::Verification {
                suite: Self::NAME,
                message: format!("expected '{}', got '{}'", self.person_name, name),
            });
        }
        Ok(())
    }

    fn prepare(&self, benchmark: &str) -> Result<Box<dyn Workload>, BenchError> {
        let strategy = PropertyStrategy::from_benchmark_name(benchmark).ok_or_else(|| {
            BenchError::UnknownBenchmark {
                suite: Self::NAME.to_string(),
                benchmark: benchmark.to_string(),
            }
        })?;
        let accessors = self.accessors();

        let workload: Box<dyn Workload> = match strategy {
            PropertyStrategy::Native => Box::new(looped(move || accessors.native())),
            PropertyStrategy::ReadOnly => {
                let model = accessors.read_only;
                Box::new(looped(move || model.get_object()))
            }
            PropertyStrategy::DirectLambda => {
                let model = accessors.direct_lambda;
                Box::new(looped(move || model.get_object()))
            }
            PropertyStrategy::Chained => {
                let model = accessors.chained;
                Box::new(looped(move || model.get_object()))
            }
            PropertyStrategy::LambdaChained => {
                let model = accessors.lambda_chained;
                Box::new(looped(move || model.get_object()))
            }
            PropertyStrategy::Property => {
                let model = accessors.property;
                Box::new(looped(move || model.get_object()))
            }
        };

        tracing::debug!(benchmark, "Prepared property workload");
        Ok(workload)
    }
}
