// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Report generation for benchmark results.
//!
//! Saves runs to timestamped JSON files and renders the results table
//! printed on stdout.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use modelbench_core::BenchError;
use thiserror::Error;

use crate::metrics::{BenchmarkReport, BenchmarkResult};

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReporterError {
    #[error("Failed to access output directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<ReporterError> for BenchError {
    fn from(err: ReporterError) -> Self {
        BenchError::Report {
            message: err.to_string(),
        }
    }
}

/// JSON reporter for benchmark results.
pub struct JsonReporter {
    /// Output directory for benchmark data
    output_dir: PathBuf,
}

impl JsonReporter {
    /// Create a new JSON reporter with the specified output directory.
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self, ReporterError> {
        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    /// Save a benchmark report to a JSON file.
    ///
    /// Returns the path to the created file.
    pub fn save(&self, report: &BenchmarkReport) -> Result<PathBuf, ReporterError> {
        let suites = report.suites();
        let label = match suites.as_slice() {
            [single] => single.to_string(),
            _ => "mixed".to_string(),
        };

        let filepath = self.output_dir.join(Self::file_name(&label, report));
        Self::write(&filepath, report)?;

        tracing::info!(path = %filepath.display(), "Saved benchmark report");
        Ok(filepath)
    }

    /// Save multiple reports, one per suite.
    pub fn save_by_suite(&self, report: &BenchmarkReport) -> Result<Vec<PathBuf>, ReporterError> {
        let mut by_suite: HashMap<&str, Vec<BenchmarkResult>> = HashMap::new();
        for result in &report.results {
            by_suite
                .entry(result.suite.as_str())
                .or_default()
                .push(result.clone());
        }

        let mut paths = Vec::new();
        for (suite, results) in by_suite {
            let mut suite_report = report.clone();
            suite_report.results = results;

            let filepath = self.output_dir.join(Self::file_name(suite, report));
            Self::write(&filepath, &suite_report)?;
            paths.push(filepath);
        }
        paths.sort();

        Ok(paths)
    }

    /// Load an existing benchmark report from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<BenchmarkReport, ReporterError> {
        let file = File::open(path)?;
        let report = serde_json::from_reader(file)?;
        Ok(report)
    }

    fn file_name(label: &str, report: &BenchmarkReport) -> String {
        let timestamp = report.timestamp.format("%Y-%m-%dT%H-%M-%SZ");
        let run = report.run_id.simple().to_string();
        format!("{}_{}_{}.json", label, timestamp, &run[..8])
    }

    fn write(path: &Path, report: &BenchmarkReport) -> Result<(), ReporterError> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, report)?;
        Ok(())
    }
}

/// Render `results` as a fixed-width table, one row per benchmark.
pub fn render_table(results: &[BenchmarkResult]) -> String {
    let width = results
        .iter()
        .map(|result| result.full_name().len())
        .max()
        .unwrap_or(0)
        .max("Benchmark".len());

    let mut table = String::new();
    let _ = writeln!(
        table,
        "{:<width$}  {:>5}  {:>4}  {:>16}    {:>14}  {}",
        "Benchmark", "Mode", "Cnt", "Score", "Error", "Units"
    );

    for result in results {
        let stats = &result.statistics;
        let error = match stats.error {
            Some(error) => format!("± {:>14.3}", error),
            None => format!("  {:>14}", ""),
        };
        let _ = writeln!(
            table,
            "{:<width$}  {:>5}  {:>4}  {:>16.3}  {}  {}",
            result.full_name(),
            result.mode.label(),
            stats.count,
            stats.mean,
            error,
            result.unit
        );
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelbench_core::{Mode, RunOptions};
    use tempfile::TempDir;

    fn report_with(results: &[(&str, &str)]) -> BenchmarkReport {
        let mut report = BenchmarkReport::new(RunOptions::quick());
        for (suite, benchmark) in results {
            report.add_result(BenchmarkResult::new(
                *suite,
                *benchmark,
                Mode::Throughput,
                1,
                vec![100.0, 200.0, 300.0],
            ));
        }
        report
    }

    #[test]
    fn test_reporter_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let reporter = JsonReporter::new(temp_dir.path()).unwrap();
        let report = report_with(&[("lambda_models", "native_evaluation")]);

        let path = reporter.save(&report).unwrap();
        assert!(path.exists());
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("lambda_models_"));

        let loaded = JsonReporter::load(&path).unwrap();
        assert_eq!(loaded.run_id, report.run_id);
        assert_eq!(loaded.results.len(), 1);
        assert_eq!(loaded.results[0].benchmark, "native_evaluation");
        assert_eq!(loaded.options, report.options);
    }

    #[test]
    fn test_save_by_suite() {
        let temp_dir = TempDir::new().unwrap();
        let reporter = JsonReporter::new(temp_dir.path()).unwrap();
        let report = report_with(&[
            ("lambda_models", "native_evaluation"),
            ("stream_vs_get", "retrieve_component_using_get"),
            ("lambda_models", "property_model"),
        ]);

        let paths = reporter.save_by_suite(&report).unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 2);

        let loaded: Vec<BenchmarkReport> = paths
            .iter()
            .map(|path| JsonReporter::load(path).unwrap())
            .collect();
        assert_eq!(loaded[0].suites(), vec!["lambda_models"]);
        assert_eq!(loaded[0].results.len(), 2);
        assert_eq!(loaded[1].suites(), vec!["stream_vs_get"]);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = JsonReporter::load(temp_dir.path().join("absent.json"));
        assert!(matches!(result, Err(ReporterError::Io(_))));
    }

    #[test]
    fn test_table_contains_every_benchmark() {
        let report = report_with(&[
            ("lambda_models", "native_evaluation"),
            ("lambda_models", "chained_lambda_model"),
        ]);
        let table = render_table(&report.results);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Benchmark"));
        assert!(lines[0].ends_with("Units"));
        assert!(lines[1].contains("lambda_models.native_evaluation"));
        assert!(lines[2].contains("lambda_models.chained_lambda_model"));
        assert!(lines[1].contains("thrpt"));
        assert!(lines[1].contains("200.000  ±"));
        assert!(lines[1].ends_with("ops/s"));
    }

    #[test]
    fn test_table_without_error_margin() {
        let results = vec![BenchmarkResult::new(
            "stream_vs_get",
            "retrieve_component_using_get",
            Mode::Latency,
            1,
            vec![12.5],
        )];
        let table = render_table(&results);
        assert!(!table.contains('±'));
        assert!(table.contains("avgt"));
        assert!(table.contains("12.500"));
    }
}
