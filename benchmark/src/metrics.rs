// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Standardized metrics types for benchmark results.
//!
//! This module defines the data structures used to capture and serialize
//! benchmark scores, together with their summary statistics.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use modelbench_core::{Mode, RunOptions};
use serde::{Deserialize, Serialize};
use sysinfo::System;
use uuid::Uuid;

/// Two-sided Student t quantiles at 99.9% confidence, by degrees of freedom.
const T_999: [(u32, f64); 34] = [
    (1, 636.619),
    (2, 31.599),
    (3, 12.924),
    (4, 8.610),
    (5, 6.869),
    (6, 5.959),
    (7, 5.408),
    (8, 5.041),
    (9, 4.781),
    (10, 4.587),
    (11, 4.437),
    (12, 4.318),
    (13, 4.221),
    (14, 4.140),
    (15, 4.073),
    (16, 4.015),
    (17, 3.965),
    (18, 3.922),
    (19, 3.883),
    (20, 3.850),
    (21, 3.819),
    (22, 3.792),
    (23, 3.768),
    (24, 3.745),
    (25, 3.725),
    (26, 3.707),
    (27, 3.690),
    (28, 3.674),
    (29, 3.659),
    (30, 3.646),
    (40, 3.551),
    (60, 3.460),
    (120, 3.373),
    (u32::MAX, 3.291),
];

/// Critical t value for `df` degrees of freedom at 99.9% confidence.
/// Between table rows the next lower row is used, which errs wide.
pub fn student_t_999(df: u32) -> f64 {
    T_999
        .iter()
        .rev()
        .find(|(row, _)| *row <= df)
        .map_or(T_999[0].1, |(_, t)| *t)
}

/// Summary statistics over per-iteration scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreStatistics {
    /// Number of scores
    pub count: usize,
    /// Arithmetic mean score
    pub mean: f64,
    /// Half-width of the 99.9% confidence interval. Absent for fewer than two scores.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<f64>,
    /// Sample standard deviation
    pub std_dev: f64,
    pub min: f64,
    pub median: f64,
    pub max: f64,
}

impl ScoreStatistics {
    /// Calculate statistics from per-iteration scores.
    pub fn from_scores(scores: &[f64]) -> Self {
        if scores.is_empty() {
            return Self {
                count: 0,
                mean: 0.0,
                error: None,
                std_dev: 0.0,
                min: 0.0,
                median: 0.0,
                max: 0.0,
            };
        }

        let mut sorted = scores.to_vec();
        sorted.sort_unstable_by(f64::total_cmp);
        let count = sorted.len();

        let mean = sorted.iter().sum::<f64>() / count as f64;
        let median = if count % 2 == 0 {
            (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
        } else {
            sorted[count / 2]
        };

        let (std_dev, error) = if count < 2 {
            (0.0, None)
        } else {
            let variance = sorted
                .iter()
                .map(|score| {
                    let diff = score - mean;
                    diff * diff
                })
                .sum::<f64>()
                / (count - 1) as f64;
            let std_dev = variance.sqrt();
            let df = u32::try_from(count - 1).unwrap_or(u32::MAX);
            (std_dev, Some(student_t_999(df) * std_dev / (count as f64).sqrt()))
        };

        Self {
            count,
            mean,
            error,
            std_dev,
            min: sorted[0],
            median,
            max: sorted[count - 1],
        }
    }
}

/// System information captured at benchmark time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Operating system name
    pub os: String,
    /// OS version
    pub os_version: String,
    /// Kernel version (Linux)
    pub kernel_version: Option<String>,
    /// CPU model name
    pub cpu_model: String,
    /// Number of CPU cores
    pub cpu_cores: usize,
    /// Total system memory in bytes
    pub memory_bytes: u64,
    /// Hostname
    pub hostname: String,
}

impl SystemInfo {
    /// Collect current system information.
    pub fn collect() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();

        Self {
            os: System::name().unwrap_or_else(|| "Unknown".to_string()),
            os_version: System::os_version().unwrap_or_else(|| "Unknown".to_string()),
            kernel_version: System::kernel_version(),
            cpu_model: sys
                .cpus()
                .first()
                .map(|cpu| cpu.brand().to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
            cpu_cores: sys.cpus().len(),
            memory_bytes: sys.total_memory(),
            hostname: System::host_name().unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

/// Scores of one benchmark across all forks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Suite the benchmark belongs to
    pub suite: String,
    /// Name of the benchmark within its suite
    pub benchmark: String,
    pub mode: Mode,
    /// Unit of every score
    pub unit: String,
    /// Number of forks the scores were collected from
    pub forks: u32,
    /// Measured scores, fork after fork
    pub scores: Vec<f64>,
    pub statistics: ScoreStatistics,
    /// Additional metadata specific to this benchmark
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl BenchmarkResult {
    /// Create a result and compute its statistics.
    pub fn new(
        suite: impl Into<String>,
        benchmark: impl Into<String>,
        mode: Mode,
        forks: u32,
        scores: Vec<f64>,
    ) -> Self {
        Self {
            suite: suite.into(),
            benchmark: benchmark.into(),
            mode,
            unit: mode.unit().to_string(),
            forks,
            statistics: ScoreStatistics::from_scores(&scores),
            scores,
            metadata: HashMap::new(),
        }
    }

    /// `suite.benchmark`, as printed in the table.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.suite, self.benchmark)
    }

    /// Add metadata to the result.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(serde_json::Value::Null);
        self.metadata.insert(key.into(), value);
        self
    }
}

/// Complete benchmark run report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// Unique id of the run
    pub run_id: Uuid,
    /// Suite identifier
    pub benchmark_suite: String,
    /// Framework version
    pub version: String,
    /// Timestamp when benchmarks were run
    pub timestamp: DateTime<Utc>,
    /// System information
    pub system_info: SystemInfo,
    /// Options every result was measured with
    pub options: RunOptions,
    /// Individual benchmark results
    pub results: Vec<BenchmarkResult>,
}

impl BenchmarkReport {
    /// Create a new benchmark report.
    pub fn new(options: RunOptions) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            benchmark_suite: "modelbench".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            system_info: SystemInfo::collect(),
            options,
            results: Vec::new(),
        }
    }

    /// Add a result to the report.
    pub fn add_result(&mut self, result: BenchmarkResult) {
        self.results.push(result);
    }

    /// Names of the suites present in the report, in first-seen order.
    pub fn suites(&self) -> Vec<&str> {
        let mut suites: Vec<&str> = Vec::new();
        for result in &self.results {
            if !suites.contains(&result.suite.as_str()) {
                suites.push(&result.suite);
            }
        }
        suites
    }
}
