// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Property access benchmark: 10 warmup and 10 measurement iterations of
//! 10 s each in one fork, throughput mode.

use clap::Parser;
use modelbench_benchmark::cli::{init_tracing, CommonArgs};
use modelbench_benchmark::suites::LambdaModelsSuite;
use modelbench_benchmark::{render_table, Runner};
use modelbench_core::{FixtureConfig, RunOptions};

#[derive(Parser)]
#[command(name = "lambda_models")]
#[command(about = "Compare model strategies reading account.person.name")]
struct Args {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.common.verbose);

    let runner = Runner::new(args.common.apply(RunOptions::default()));
    let suite = LambdaModelsSuite::new(&FixtureConfig::default());

    if let Some(results) = runner.execute(&[&suite])? {
        print!("{}", render_table(&results));
    }

    Ok(())
}
