// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! The benchmark suites shipped with modelbench.

pub mod lambda_models;
pub mod stream_vs_get;

use modelbench_core::{BenchError, FixtureConfig};

use crate::runner::BenchmarkSuite;

pub use lambda_models::LambdaModelsSuite;
pub use stream_vs_get::StreamVsGetSuite;

/// Every suite, configured from `fixtures`.
pub fn all_suites(fixtures: &FixtureConfig) -> Vec<Box<dyn BenchmarkSuite>> {
    vec![
        Box::new(LambdaModelsSuite::new(fixtures)),
        Box::new(StreamVsGetSuite::new(fixtures)),
    ]
}

/// Pick suites by name, keeping the order of `suites`. An empty filter
/// selects every suite.
pub fn select<'a>(
    suites: &'a [Box<dyn BenchmarkSuite>],
    names: &[String],
) -> Result<Vec<&'a dyn BenchmarkSuite>, BenchError> {
    if let Some(unknown) = names
        .iter()
        .find(|name| !suites.iter().any(|suite| suite.name() == name.as_str()))
    {
        return Err(BenchError::UnknownSuite {
            name: unknown.clone(),
        });
    }

    Ok(suites
        .iter()
        .filter(|suite| names.is_empty() || names.iter().any(|name| name == suite.name()))
        .map(|suite| &**suite)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_all() {
        let suites = all_suites(&FixtureConfig::default());
        let selected = select(&suites, &[]).unwrap();
        let names: Vec<&str> = selected.iter().map(|suite| suite.name()).collect();
        assert_eq!(names, vec!["lambda_models", "stream_vs_get"]);
    }

    #[test]
    fn test_select_by_name() {
        let suites = all_suites(&FixtureConfig::default());
        let selected = select(&suites, &["stream_vs_get".to_string()]).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name(), "stream_vs_get");
    }

    #[test]
    fn test_select_unknown_suite() {
        let suites = all_suites(&FixtureConfig::default());
        let Err(err) = select(&suites, &["memory".to_string()]) else {
            panic!("unknown suite was selected");
        };
        assert!(matches!(err, BenchError::UnknownSuite { name } if name == "memory"));
    }
}
