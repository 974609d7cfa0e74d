// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! YAML run configuration with strict validation.
//!
//! Every count and time window must be positive. Any invalid field results in
//! a ConfigurationError before a single benchmark starts.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BenchError, BenchResult, ConfigurationError};
use crate::fixture::DEFAULT_NAME;
use crate::types::{Count, TimeWindow};

/// Children in the default container fixture.
pub const DEFAULT_CONTAINER_CHILDREN: usize = 100_000;

/// What a score measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Operations per second.
    #[default]
    Throughput,
    /// Nanoseconds per operation.
    Latency,
}

impl Mode {
    /// Short label used in the results table.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Throughput => "thrpt",
            Mode::Latency => "avgt",
        }
    }

    /// Unit of a score in this mode.
    pub fn unit(&self) -> &'static str {
        match self {
            Mode::Throughput => "ops/s",
            Mode::Latency => "ns/op",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where each fork runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Isolation {
    /// Re-execute the current binary once per fork.
    #[default]
    Fork,
    /// Run every fork inside the current process.
    InProcess,
}

/// Validated runner parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOptions {
    pub warmup_iterations: Count,
    pub measurement_iterations: Count,
    pub warmup_time: TimeWindow,
    pub measurement_time: TimeWindow,
    pub forks: Count,
    pub mode: Mode,
    pub isolation: Isolation,
}

impl RunOptions {
    /// Validate raw numeric options. Zero anywhere is rejected, as is a score
    /// total that does not fit a u32.
    pub fn new(
        warmup_iterations: u32,
        measurement_iterations: u32,
        warmup_time_ms: u64,
        measurement_time_ms: u64,
        forks: u32,
        mode: Mode,
    ) -> Result<Self, ConfigurationError> {
        let options = Self {
            warmup_iterations: Count::new("warmup_iterations", warmup_iterations)?,
            measurement_iterations: Count::new("measurement_iterations", measurement_iterations)?,
            warmup_time: TimeWindow::from_millis("warmup_time_ms", warmup_time_ms)?,
            measurement_time: TimeWindow::from_millis("measurement_time_ms", measurement_time_ms)?,
            forks: Count::new("forks", forks)?,
            mode,
            isolation: Isolation::default(),
        };

        // The score total of one benchmark must fit a u32.
        if measurement_iterations.checked_mul(forks).is_none() {
            return Err(ConfigurationError::TooManyScores {
                measurement_iterations,
                forks,
            });
        }
        Ok(options)
    }

    /// 1 warmup and 3 measurement iterations of 1 s each.
    pub fn quick() -> Self {
        Self {
            warmup_iterations: Count::new_unchecked(1),
            measurement_iterations: Count::new_unchecked(3),
            warmup_time: TimeWindow::from_millis_unchecked(1_000),
            measurement_time: TimeWindow::from_millis_unchecked(1_000),
            ..Self::default()
        }
    }

    pub fn with_isolation(mut self, isolation: Isolation) -> Self {
        self.isolation = isolation;
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Total measured iterations across all forks.
    pub fn total_iterations(&self) -> u64 {
        u64::from(self.measurement_iterations.get()) * u64::from(self.forks.get())
    }
}

impl Default for RunOptions {
    /// 10 warmup and 10 measurement iterations of 10 s, one fork, throughput.
    fn default() -> Self {
        Self {
            warmup_iterations: Count::new_unchecked(10),
            measurement_iterations: Count::new_unchecked(10),
            warmup_time: TimeWindow::from_millis_unchecked(10_000),
            measurement_time: TimeWindow::from_millis_unchecked(10_000),
            forks: Count::new_unchecked(1),
            mode: Mode::Throughput,
            isolation: Isolation::Fork,
        }
    }
}

/// Fixture parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureConfig {
    pub person_name: String,
    pub container_children: usize,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            person_name: DEFAULT_NAME.to_string(),
            container_children: DEFAULT_CONTAINER_CHILDREN,
        }
    }
}

/// Complete validated configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchConfig {
    pub runner: RunOptions,
    pub fixtures: FixtureConfig,
}

/// Raw runner section as parsed from YAML (before validation).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRunnerConfig {
    #[serde(default = "default_iterations")]
    warmup_iterations: u32,
    #[serde(default = "default_iterations")]
    measurement_iterations: u32,
    #[serde(default = "default_time_ms")]
    warmup_time_ms: u64,
    #[serde(default = "default_time_ms")]
    measurement_time_ms: u64,
    #[serde(default = "default_forks")]
    forks: u32,
    #[serde(default)]
    mode: Mode,
    #[serde(default)]
    isolation: Isolation,
}

fn default_iterations() -> u32 {
    10
}

fn default_time_ms() -> u64 {
    10_000
}

fn default_forks() -> u32 {
    1
}

impl Default for RawRunnerConfig {
    fn default() -> Self {
        Self {
            warmup_iterations: default_iterations(),
            measurement_iterations: default_iterations(),
            warmup_time_ms: default_time_ms(),
            measurement_time_ms: default_time_ms(),
            forks: default_forks(),
            mode: Mode::default(),
            isolation: Isolation::default(),
        }
    }
}

/// Raw fixture section.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFixtureConfig {
    #[serde(default = "default_person_name")]
    person_name: String,
    #[serde(default = "default_container_children")]
    container_children: usize,
}

fn default_person_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_container_children() -> usize {
    DEFAULT_CONTAINER_CHILDREN
}

impl Default for RawFixtureConfig {
    fn default() -> Self {
        Self {
            person_name: default_person_name(),
            container_children: default_container_children(),
        }
    }
}

/// Raw root configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    runner: RawRunnerConfig,
    #[serde(default)]
    fixtures: RawFixtureConfig,
}

/// Configuration loader with strict validation.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration from a YAML file.
    pub fn load_file(path: impl AsRef<Path>) -> BenchResult<BenchConfig> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigurationError::ConfigNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let content = std::fs::read_to_string(path).map_err(|e| BenchError::Io {
            context: "reading config file",
            source: e,
        })?;

        let config = Self::load_string(&content)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load and validate configuration from a YAML string.
    /// An empty document yields the defaults.
    pub fn load_string(content: &str) -> Result<BenchConfig, ConfigurationError> {
        let raw: RawConfig = if content.trim().is_empty() {
            RawConfig::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| ConfigurationError::ConfigParse {
                message: e.to_string(),
            })?
        };

        Self::validate(raw)
    }

    fn validate(raw: RawConfig) -> Result<BenchConfig, ConfigurationError> {
        let runner = RunOptions::new(
            raw.runner.warmup_iterations,
            raw.runner.measurement_iterations,
            raw.runner.warmup_time_ms,
            raw.runner.measurement_time_ms,
            raw.runner.forks,
            raw.runner.mode,
        )?
        .with_isolation(raw.runner.isolation);

        if raw.fixtures.person_name.is_empty() {
            return Err(ConfigurationError::ConfigParse {
                message: "fixtures.person_name cannot be empty".to_string(),
            });
        }

        Ok(BenchConfig {
            runner,
            fixtures: FixtureConfig {
                person_name: raw.fixtures.person_name,
                container_children: raw.fixtures.container_children,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_CONFIG: &str = r#"
runner:
  warmup_iterations: 2
  measurement_iterations: 5
  warmup_time_ms: 200
  measurement_time_ms: 500
  forks: 2
  mode: latency
  isolation: in_process

fixtures:
  person_name: Arya Stark
  container_children: 1000
"#;

    #[test]
    fn test_valid_config() {
        let config = ConfigLoader::load_string(VALID_CONFIG).unwrap();
        assert_eq!(config.runner.warmup_iterations.get(), 2);
        assert_eq!(config.runner.measurement_iterations.get(), 5);
        assert_eq!(config.runner.measurement_time.millis(), 500);
        assert_eq!(config.runner.forks.get(), 2);
        assert_eq!(config.runner.mode, Mode::Latency);
        assert_eq!(config.runner.isolation, Isolation::InProcess);
        assert_eq!(config.runner.total_iterations(), 10);
        assert_eq!(config.fixtures.person_name, "Arya Stark");
        assert_eq!(config.fixtures.container_children, 1000);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ConfigLoader::load_string("").unwrap();
        assert_eq!(config, BenchConfig::default());
        assert_eq!(config.runner.warmup_time.to_string(), "10s");
        assert_eq!(config.fixtures.person_name, "John Snow");
        assert_eq!(config.fixtures.container_children, 100_000);
    }

    #[test]
    fn test_zero_measurement_iterations() {
        let yaml = r#"
runner:
  measurement_iterations: 0
"#;
        let err = ConfigLoader::load_string(yaml).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::NonPositive {
                field: "measurement_iterations",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_forks_and_windows() {
        for yaml in [
            "runner:\n  forks: 0\n",
            "runner:\n  warmup_time_ms: 0\n",
            "runner:\n  measurement_time_ms: 0\n",
            "runner:\n  warmup_iterations: 0\n",
        ] {
            assert!(matches!(
                ConfigLoader::load_string(yaml),
                Err(ConfigurationError::NonPositive { .. })
            ));
        }
    }

    #[test]
    fn test_score_count_overflow_rejected() {
        let yaml = r#"
runner:
  measurement_iterations: 70000
  forks: 70000
  isolation: in_process
"#;
        let err = ConfigLoader::load_string(yaml).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::TooManyScores {
                measurement_iterations: 70000,
                forks: 70000,
            }
        ));

        let options = RunOptions::new(1, u32::MAX, 1, 1, 1, Mode::Throughput).unwrap();
        assert_eq!(options.total_iterations(), u64::from(u32::MAX));
        assert!(RunOptions::new(1, u32::MAX, 1, 1, 2, Mode::Throughput).is_err());
    }

    #[test]
    fn test_negative_value_is_parse_error() {
        let result = ConfigLoader::load_string("runner:\n  forks: -1\n");
        assert!(matches!(result, Err(ConfigurationError::ConfigParse { .. })));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = ConfigLoader::load_string("runner:\n  threads: 4\n");
        assert!(matches!(result, Err(ConfigurationError::ConfigParse { .. })));
    }

    #[test]
    fn test_empty_person_name() {
        let result = ConfigLoader::load_string("fixtures:\n  person_name: \"\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_quick_options() {
        let quick = RunOptions::quick();
        assert_eq!(quick.warmup_iterations.get(), 1);
        assert_eq!(quick.measurement_iterations.get(), 3);
        assert_eq!(quick.measurement_time.millis(), 1_000);
        assert_eq!(quick.forks.get(), 1);
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(Mode::Throughput.label(), "thrpt");
        assert_eq!(Mode::Latency.unit(), "ns/op");
    }
}
