// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! CLI tool to run all benchmarks and generate reports.

use clap::Parser;
use modelbench_benchmark::cli::{init_tracing, CommonArgs};
use modelbench_benchmark::suites::{all_suites, select};
use modelbench_benchmark::{render_table, BenchmarkReport, JsonReporter, Runner};
use modelbench_core::{BenchConfig, ConfigLoader, RunOptions};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "run_benchmarks")]
#[command(about = "Run modelbench suites and generate JSON reports")]
struct Args {
    /// YAML configuration file (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Suites to run (all if not specified)
    #[arg(short, long)]
    suite: Vec<String>,

    /// Output directory for JSON reports
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write one report per suite instead of a single report
    #[arg(long, requires = "output")]
    by_suite: bool,

    /// Run in quick mode (1 warmup, 3 measurement iterations of 1 s)
    #[arg(long)]
    quick: bool,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.common.verbose);

    let config = match &args.config {
        Some(path) => ConfigLoader::load_file(path)?,
        None => BenchConfig::default(),
    };

    let options = if args.quick {
        RunOptions::quick()
            .with_mode(config.runner.mode)
            .with_isolation(config.runner.isolation)
    } else {
        config.runner
    };
    let runner = Runner::new(args.common.apply(options));

    let suites = all_suites(&config.fixtures);
    let selected = select(&suites, &args.suite)?;

    let Some(results) = runner.execute(&selected)? else {
        return Ok(());
    };

    print!("{}", render_table(&results));

    if let Some(output) = &args.output {
        let reporter = JsonReporter::new(output)?;
        let mut report = BenchmarkReport::new(*runner.options());
        for result in results {
            report.add_result(result);
        }
        let paths = if args.by_suite {
            reporter.save_by_suite(&report)?
        } else {
            vec![reporter.save(&report)?]
        };
        for path in paths {
            tracing::info!(path = %path.display(), run_id = %report.run_id, "Report written");
        }
    }

    Ok(())
}
