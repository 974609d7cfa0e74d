// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Benchmark harness for running and timing operations.
//!
//! Each iteration first calibrates a batch size, then runs whole batches
//! until the iteration window has elapsed. Only the loop around the batch
//! is timed; fixture setup happens before the harness is involved.

use std::hint::black_box;
use std::time::{Duration, Instant};

use modelbench_core::{Mode, RunOptions};

/// Shortest batch the harness times on its own.
const MIN_BATCH_TIME: Duration = Duration::from_micros(10);

/// Upper bound for a calibrated batch.
const MAX_BATCH_SIZE: u64 = 1 << 20;

/// A prepared operation the harness can invoke in batches.
pub trait Workload {
    /// Run the operation `ops` times.
    fn run_batch(&mut self, ops: u64);
}

/// Workload invoking a closure once per operation.
pub struct Looped<F> {
    operation: F,
}

/// Wrap `operation` as a workload. Its result is passed through `black_box`.
pub fn looped<F, R>(operation: F) -> Looped<F>
where
    F: FnMut() -> R,
{
    Looped { operation }
}

impl<F, R> Workload for Looped<F>
where
    F: FnMut() -> R,
{
    #[inline]
    fn run_batch(&mut self, ops: u64) {
        for _ in 0..ops {
            black_box((self.operation)());
        }
    }
}

/// Operations completed in one iteration and the time they took.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationSample {
    pub operations: u64,
    pub elapsed: Duration,
}

impl IterationSample {
    /// Score of the iteration in `mode`: ops/s or ns/op.
    pub fn score(&self, mode: Mode) -> f64 {
        let nanos = self.elapsed.as_nanos() as f64;
        match mode {
            Mode::Throughput => self.operations as f64 / (nanos / 1_000_000_000.0),
            Mode::Latency => nanos / self.operations as f64,
        }
    }
}

/// A benchmark harness for measuring one workload.
pub struct BenchmarkHarness {
    /// Number of warmup iterations before measurement
    warmup_iterations: u32,
    /// Number of measurement iterations
    measurement_iterations: u32,
    warmup_time: Duration,
    measurement_time: Duration,
    mode: Mode,
}

impl BenchmarkHarness {
    /// Create a harness from validated run options.
    pub fn new(options: &RunOptions) -> Self {
        Self {
            warmup_iterations: options.warmup_iterations.get(),
            measurement_iterations: options.measurement_iterations.get(),
            warmup_time: options.warmup_time.duration(),
            measurement_time: options.measurement_time.duration(),
            mode: options.mode,
        }
    }

    /// Run warmup and measurement iterations.
    ///
    /// Returns one score per measurement iteration; warmup scores are
    /// discarded.
    pub fn run(&self, workload: &mut dyn Workload) -> Vec<f64> {
        let batch = calibrate(workload);
        tracing::debug!(batch, "Calibrated batch size");

        for iteration in 0..self.warmup_iterations {
            let sample = run_iteration(workload, batch, self.warmup_time);
            tracing::debug!(
                iteration,
                score = sample.score(self.mode),
                unit = self.mode.unit(),
                "Warmup iteration"
            );
        }

        let mut scores = Vec::with_capacity(self.measurement_iterations as usize);
        for iteration in 0..self.measurement_iterations {
            let sample = run_iteration(workload, batch, self.measurement_time);
            let score = sample.score(self.mode);
            tracing::debug!(iteration, score, unit = self.mode.unit(), "Measurement iteration");
            scores.push(score);
        }

        scores
    }
}

/// Double the batch size until one batch takes at least [`MIN_BATCH_TIME`].
pub fn calibrate(workload: &mut dyn Workload) -> u64 {
    let mut batch = 1;
    loop {
        let start = Instant::now();
        workload.run_batch(batch);
        if start.elapsed() >= MIN_BATCH_TIME || batch >= MAX_BATCH_SIZE {
            return batch;
        }
        batch *= 2;
    }
}

/// Run whole batches until `window` has elapsed.
pub fn run_iteration(workload: &mut dyn Workload, batch: u64, window: Duration) -> IterationSample {
    let start = Instant::now();
    let mut operations = 0u64;
    loop {
        workload.run_batch(batch);
        operations += batch;
        let elapsed = start.elapsed();
        if elapsed >= window {
            return IterationSample {
                operations,
                elapsed,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    struct Counting {
        calls: u64,
    }

    impl Workload for Counting {
        fn run_batch(&mut self, ops: u64) {
            for _ in 0..ops {
                self.calls = black_box(self.calls + 1);
            }
        }
    }

    fn options(mode: Mode) -> RunOptions {
        RunOptions::new(2, 3, 5, 5, 1, mode).unwrap()
    }

    #[test]
    fn test_harness_basic() {
        let harness = BenchmarkHarness::new(&options(Mode::Throughput));
        let mut workload = Counting { calls: 0 };

        let scores = harness.run(&mut workload);

        assert_eq!(scores.len(), 3);
        assert!(scores.iter().all(|score| *score > 0.0));
        assert!(workload.calls > 0);
    }

    #[test]
    fn test_latency_scores() {
        let harness = BenchmarkHarness::new(&options(Mode::Latency));
        let mut workload = looped(|| thread::sleep(Duration::from_micros(100)));

        let scores = harness.run(&mut workload);

        assert_eq!(scores.len(), 3);
        // Each operation should take at least 100μs
        for score in &scores {
            assert!(*score >= 100_000.0, "Score {} < 100μs", score);
        }
    }

    #[test]
    fn test_calibrate_slow_workload() {
        let mut workload = looped(|| thread::sleep(Duration::from_micros(50)));
        assert_eq!(calibrate(&mut workload), 1);
    }

    #[test]
    fn test_calibrate_fast_workload() {
        let mut workload = Counting { calls: 0 };
        let batch = calibrate(&mut workload);
        assert!(batch > 1);
        assert!(batch <= MAX_BATCH_SIZE);
    }

    #[test]
    fn test_iteration_respects_window() {
        let mut workload = looped(|| thread::sleep(Duration::from_micros(200)));
        let sample = run_iteration(&mut workload, 1, Duration::from_millis(5));
        assert!(sample.elapsed >= Duration::from_millis(5));
        assert!(sample.operations >= 1);
    }

    #[test]
    fn test_sample_score() {
        let sample = IterationSample {
            operations: 1_000,
            elapsed: Duration::from_millis(1),
        };
        assert!((sample.score(Mode::Throughput) - 1_000_000.0).abs() < 1e-6);
        assert!((sample.score(Mode::Latency) - 1_000.0).abs() < 1e-9);
    }
}
