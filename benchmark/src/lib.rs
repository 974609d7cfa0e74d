// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Modelbench Benchmarking Framework
//!
//! A JMH-style runner for measuring the relative cost of model property
//! access strategies and container lookup strategies.
//!
//! # Benchmark Suites
//!
//! - **lambda_models**: native access, read-only, lambda, chained and property models
//! - **stream_vs_get**: indexed get vs iterator scan vs filter over children
//!
//! # Data Output
//!
//! Results print as a table on stdout and can be saved as JSON reports.

pub mod cli;
pub mod harness;
pub mod metrics;
pub mod reporter;
pub mod runner;
pub mod suites;

pub use harness::{looped, BenchmarkHarness, Workload};
pub use metrics::{BenchmarkReport, BenchmarkResult, ScoreStatistics, SystemInfo};
pub use reporter::{render_table, JsonReporter};
pub use runner::{BenchmarkSuite, ForkRequest, Runner};
