// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Footprint probe: serialized and retained bytes of the fixture and of
//! every model shape, one line per value.

use std::sync::Arc;

use clap::Parser;
use modelbench_benchmark::cli::{init_tracing, CommonArgs};
use modelbench_core::fixture::account_supplier;
use modelbench_core::{
    build_property_fixture, fixture_resolver, measure_footprint, Footprint, LoadableModel,
    PropertyAccessors, SerializationError, SupplierModel, ValueModel,
};

#[derive(Parser)]
#[command(name = "memory_benchmark")]
#[command(about = "Print serialized and retained bytes of each model shape")]
struct Args {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.common.verbose);

    for (label, footprint) in probe()? {
        println!(
            "{}: {} {}",
            label, footprint.serialized_bytes, footprint.retained_bytes
        );
    }

    Ok(())
}

fn probe() -> Result<Vec<(&'static str, Footprint)>, SerializationError> {
    let account = build_property_fixture();
    let root = LoadableModel::of(account_supplier());
    let accessors = PropertyAccessors::new(root.clone(), fixture_resolver());

    Ok(vec![
        ("account", measure_footprint(&account)?),
        (
            "supplier_model",
            measure_footprint(&SupplierModel::of(account_supplier()))?,
        ),
        (
            "value_model",
            measure_footprint(&ValueModel::of(Arc::new(account.clone())))?,
        ),
        ("loadable_model", measure_footprint(&root)?),
        ("read_only_model", measure_footprint(&accessors.read_only)?),
        (
            "direct_lambda_model",
            measure_footprint(&accessors.direct_lambda)?,
        ),
        ("chained_model", measure_footprint(&accessors.chained)?),
        (
            "chained_lambda_model",
            measure_footprint(&accessors.lambda_chained)?,
        ),
        ("property_model", measure_footprint(&accessors.property)?),
    ])
}
