// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Flags and setup shared by the benchmark binaries.

use clap::Args;
use modelbench_core::{Isolation, RunOptions};

/// Flags every benchmark binary accepts.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Run every fork inside this process instead of a child process
    #[arg(long)]
    pub in_process: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    /// Apply the isolation flag to `options`.
    pub fn apply(&self, options: RunOptions) -> RunOptions {
        if self.in_process {
            options.with_isolation(Isolation::InProcess)
        } else {
            options
        }
    }
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the default level.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
