// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Container lookup benchmark over 100,000 children: 10 warmup and 10
//! measurement iterations of 10 s each in one fork, throughput mode.

use clap::Parser;
use modelbench_benchmark::cli::{init_tracing, CommonArgs};
use modelbench_benchmark::suites::StreamVsGetSuite;
use modelbench_benchmark::{render_table, Runner};
use modelbench_core::{FixtureConfig, RunOptions};

#[derive(Parser)]
#[command(name = "stream_vs_get")]
#[command(about = "Compare indexed, iterator and filter lookups of a child component")]
struct Args {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.common.verbose);

    let runner = Runner::new(args.common.apply(RunOptions::default()));
    let suite = StreamVsGetSuite::new(&FixtureConfig::default());

    if let Some(results) = runner.execute(&[&suite])? {
        print!("{}", render_table(&results));
    }

    Ok(())
}
