// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `pyr build` command: build an approximation pyramid and print it.

use crate::commands::{self, ArrayArgs, Resolved};
use array_core::{DType, Element, FloatElement};
use pyramid::{build_pyramid_metered, BuildMetrics, PyramidConfig};
use reduction_schemes::ReductionScheme;
use scratch_pool::ScratchPool;

pub fn execute(config: &PyramidConfig, args: &ArrayArgs) -> anyhow::Result<()> {
    let resolved = commands::resolve(config, args)?;
    let pool = config.create_pool()?;

    println!("  pyr · Pyramid Builder");
    println!("   Scheme: {}   Dtype: {}", resolved.kind, resolved.dtype);
    println!();

    match resolved.dtype {
        DType::F32 => run::<f32>(&resolved, &pool),
        DType::F64 => run::<f64>(&resolved, &pool),
        DType::I8 => run_morph::<i8>(&resolved, &pool),
        DType::I16 => run_morph::<i16>(&resolved, &pool),
        DType::I32 => run_morph::<i32>(&resolved, &pool),
        DType::U8 => run_morph::<u8>(&resolved, &pool),
        DType::U16 => run_morph::<u16>(&resolved, &pool),
        DType::U32 => run_morph::<u32>(&resolved, &pool),
    }
}

fn run<T: FloatElement>(resolved: &Resolved, pool: &ScratchPool) -> anyhow::Result<()> {
    let scheme = resolved.kind.instantiate::<T>(resolved.order);
    run_with(resolved, scheme.as_ref(), pool)
}

fn run_morph<T: Element>(resolved: &Resolved, pool: &ScratchPool) -> anyhow::Result<()> {
    let scheme = commands::morphological_scheme::<T>(resolved.kind)?;
    run_with(resolved, scheme.as_ref(), pool)
}

fn run_with<T: Element>(
    resolved: &Resolved,
    scheme: &dyn ReductionScheme<T>,
    pool: &ScratchPool,
) -> anyhow::Result<()> {
    let source = commands::to_array::<T>(resolved)?;
    let mut metrics = BuildMetrics::new();
    let p = build_pyramid_metered(&source, scheme, pool, resolved.max_levels, &mut metrics)?;

    println!("  Levels:");
    commands::print_levels(&p);
    println!();
    println!("   {}", metrics.summary());
    println!("   {}", pool.stats().summary());
    Ok(())
}
