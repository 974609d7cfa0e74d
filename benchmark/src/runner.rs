// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Benchmark runner: suites, forks and result collection.
//!
//! With fork isolation the runner re-executes the current binary once per
//! fork, passing the benchmark to run through the environment. The child
//! runs that one benchmark in-process and writes its scores as JSON into a
//! temporary directory owned by the parent.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use modelbench_core::{BenchError, Isolation, RunOptions, SerializationError};
use serde::{Deserialize, Serialize};

use crate::harness::{BenchmarkHarness, Workload};
use crate::metrics::BenchmarkResult;

/// Names the `<suite>/<benchmark>` a forked child must run.
pub const FORK_ENV: &str = "MODELBENCH_FORK";

/// File the forked child writes its scores to.
pub const FORK_OUTPUT_ENV: &str = "MODELBENCH_FORK_OUTPUT";

/// A named group of benchmarks sharing one fixture.
pub trait BenchmarkSuite {
    /// Suite name, the prefix of every benchmark in the table.
    fn name(&self) -> &'static str;

    /// Benchmark names, in report order.
    fn benchmarks(&self) -> Vec<&'static str>;

    /// Check that all benchmarks compute the same answer. Runs before timing.
    fn verify(&self) -> Result<(), BenchError> {
        Ok(())
    }

    /// Fixture parameters recorded on every result of the suite.
    fn parameters(&self) -> Vec<(&'static str, serde_json::Value)> {
        Vec::new()
    }

    /// Build the fixture and the workload for `benchmark`.
    fn prepare(&self, benchmark: &str) -> Result<Box<dyn Workload>, BenchError>;
}

/// The benchmark a forked child was started for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForkRequest {
    pub suite: String,
    pub benchmark: String,
    pub output: PathBuf,
}

impl ForkRequest {
    /// Read a fork request from the environment, if this process is a fork.
    pub fn from_env() -> Result<Option<Self>, BenchError> {
        let Some(target) = std::env::var_os(FORK_ENV) else {
            return Ok(None);
        };
        let target = target.to_string_lossy();
        let output = std::env::var_os(FORK_OUTPUT_ENV).ok_or_else(|| BenchError::Fork {
            benchmark: target.to_string(),
            reason: format!("{} is not set", FORK_OUTPUT_ENV),
        })?;

        Self::parse(&target, PathBuf::from(output)).map(Some)
    }

    /// Parse a `<suite>/<benchmark>` target.
    pub fn parse(target: &str, output: PathBuf) -> Result<Self, BenchError> {
        match target.split_once('/') {
            Some((suite, benchmark)) if !suite.is_empty() && !benchmark.is_empty() => Ok(Self {
                suite: suite.to_string(),
                benchmark: benchmark.to_string(),
                output,
            }),
            _ => Err(BenchError::Fork {
                benchmark: target.to_string(),
                reason: "expected <suite>/<benchmark>".to_string(),
            }),
        }
    }
}

/// Scores a forked child hands back to its parent.
#[derive(Debug, Serialize, Deserialize)]
struct ForkOutput {
    suite: String,
    benchmark: String,
    scores: Vec<f64>,
}

/// Runs suites under one set of options.
pub struct Runner {
    options: RunOptions,
}

impl Runner {
    pub fn new(options: RunOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Serve the fork request if this process is a fork, otherwise run
    /// `suites`. Returns `None` in a fork.
    pub fn execute(
        &self,
        suites: &[&dyn BenchmarkSuite],
    ) -> Result<Option<Vec<BenchmarkResult>>, BenchError> {
        if let Some(request) = ForkRequest::from_env()? {
            self.serve_fork(&request, suites)?;
            return Ok(None);
        }
        self.run(suites).map(Some)
    }

    /// Run every benchmark of every suite.
    pub fn run(&self, suites: &[&dyn BenchmarkSuite]) -> Result<Vec<BenchmarkResult>, BenchError> {
        let mut results = Vec::new();

        for suite in suites {
            suite.verify()?;
            let benchmarks = suite.benchmarks();
            tracing::info!(
                suite = suite.name(),
                benchmarks = benchmarks.len(),
                "Running suite"
            );

            for benchmark in benchmarks {
                results.push(self.run_benchmark(*suite, benchmark)?);
            }
        }

        Ok(results)
    }

    /// Run one benchmark in every fork and collect its scores.
    pub fn run_benchmark(
        &self,
        suite: &dyn BenchmarkSuite,
        benchmark: &str,
    ) -> Result<BenchmarkResult, BenchError> {
        check_benchmark(suite, benchmark)?;

        let forks = self.options.forks.get();
        tracing::info!(
            suite = suite.name(),
            benchmark,
            forks,
            scores = self.options.total_iterations(),
            isolation = ?self.options.isolation,
            "Running benchmark"
        );

        let mut scores = Vec::new();
        for fork in 0..forks {
            let fork_scores = match self.options.isolation {
                Isolation::InProcess => self.run_in_process(suite, benchmark)?,
                Isolation::Fork => self.run_forked(suite, benchmark, fork)?,
            };
            tracing::debug!(fork, scores = fork_scores.len(), "Fork finished");
            scores.extend(fork_scores);
        }

        let result = BenchmarkResult::new(
            suite.name(),
            benchmark,
            self.options.mode,
            forks,
            scores,
        );
        Ok(suite
            .parameters()
            .into_iter()
            .fold(result, |result, (key, value)| result.with_metadata(key, value)))
    }

    /// Run one benchmark inside this process.
    pub fn run_in_process(
        &self,
        suite: &dyn BenchmarkSuite,
        benchmark: &str,
    ) -> Result<Vec<f64>, BenchError> {
        check_benchmark(suite, benchmark)?;
        let mut workload = suite.prepare(benchmark)?;
        Ok(BenchmarkHarness::new(&self.options).run(workload.as_mut()))
    }

    /// Child side of a fork: run the requested benchmark and write its scores.
    pub fn serve_fork(
        &self,
        request: &ForkRequest,
        suites: &[&dyn BenchmarkSuite],
    ) -> Result<(), BenchError> {
        let suite = suites
            .iter()
            .find(|suite| suite.name() == request.suite)
            .ok_or_else(|| BenchError::UnknownSuite {
                name: request.suite.clone(),
            })?;

        tracing::debug!(suite = %request.suite, benchmark = %request.benchmark, "Serving fork");
        let scores = self.run_in_process(*suite, &request.benchmark)?;

        let output = ForkOutput {
            suite: request.suite.clone(),
            benchmark: request.benchmark.clone(),
            scores,
        };
        let bytes = serde_json::to_vec(&output).map_err(SerializationError::Encode)?;
        fs::write(&request.output, bytes).map_err(|e| BenchError::Io {
            context: "writing fork scores",
            source: e,
        })
    }

    fn run_forked(
        &self,
        suite: &dyn BenchmarkSuite,
        benchmark: &str,
        fork: u32,
    ) -> Result<Vec<f64>, BenchError> {
        let fork_error = |reason: String| BenchError::Fork {
            benchmark: format!("{}.{}", suite.name(), benchmark),
            reason,
        };

        let exe = std::env::current_exe().map_err(|e| BenchError::Io {
            context: "locating current executable",
            source: e,
        })?;
        let dir = tempfile::Builder::new()
            .prefix("modelbench-fork")
            .tempdir()
            .map_err(|e| BenchError::Io {
                context: "creating fork directory",
                source: e,
            })?;
        let output = dir.path().join("scores.json");

        tracing::debug!(fork, exe = %exe.display(), "Starting fork");
        let status = Command::new(&exe)
            .args(std::env::args_os().skip(1))
            .env(FORK_ENV, format!("{}/{}", suite.name(), benchmark))
            .env(FORK_OUTPUT_ENV, &output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| fork_error(format!("failed to start: {}", e)))?;

        if !status.success() {
            return Err(fork_error(format!("child exited with {}", status)));
        }

        let bytes = fs::read(&output).map_err(|e| fork_error(format!("no scores written: {}", e)))?;
        let fork_output: ForkOutput = serde_json::from_slice(&bytes)
            .map_err(|e| fork_error(format!("unreadable scores: {}", e)))?;

        Ok(fork_output.scores)
    }
}

fn check_benchmark(suite: &dyn BenchmarkSuite, benchmark: &str) -> Result<(), BenchError> {
    if suite.benchmarks().iter().any(|name| *name == benchmark) {
        Ok(())
    } else {
        Err(BenchError::UnknownBenchmark {
            suite: suite.name().to_string(),
            benchmark: benchmark.to_string(),
        })
    }
}
