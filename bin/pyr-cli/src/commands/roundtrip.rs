// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `pyr roundtrip` command: verify that reconstructing a detail pyramid
//! reproduces the approximation pyramid.
//!
//! The morphological schemes must round-trip exactly on integer data; the
//! binomial scheme is checked against a 1e-6 tolerance.

use crate::commands::{self, ArrayArgs, Resolved};
use array_core::{DType, Element, FloatElement};
use pyramid::{build_detail_pyramid, build_pyramid, reconstruct, PyramidConfig};
use reduction_schemes::{ReductionScheme, SchemeKind};
use scratch_pool::ScratchPool;

pub fn execute(config: &PyramidConfig, args: &ArrayArgs) -> anyhow::Result<()> {
    let resolved = commands::resolve(config, args)?;
    let pool = config.create_pool()?;

    println!("  pyr · Round-trip Check");
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

    let reference = build_pyramid(&source, scheme, pool, resolved.max_levels)?;
    let mut reconstructed = build_detail_pyramid(&source, scheme, pool, resolved.max_levels)?;
    reconstruct(&mut reconstructed, scheme, pool)?;

    let mut max_diff = 0f64;
    for (a, b) in reconstructed.levels().iter().zip(reference.levels()) {
        for (x, y) in a.data().iter().zip(b.data()) {
            max_diff = max_diff.max((x.to_f64() - y.to_f64()).abs());
        }
    }

    let tolerance = if resolved.kind == SchemeKind::Binomial {
        1e-6
    } else {
        0.0
    };
    println!(
        "  {} levels, max |Δ| = {max_diff:.3e} (tolerance {tolerance:.0e})",
        reference.num_levels()
    );
    if max_diff > tolerance {
        anyhow::bail!("round-trip mismatch: {max_diff:.3e} exceeds {tolerance:.0e}");
    }
    println!("  Round-trip OK.");
    println!("   {}", pool.stats().summary());
    Ok(())
}
