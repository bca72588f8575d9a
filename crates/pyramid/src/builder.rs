// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Pyramid construction and reconstruction drivers.
//!
//! All three drivers are strictly sequential: level `k+1` depends on level
//! `k`'s fully materialized result, and reconstruction walks coarsest to
//! finest because each finer level needs the already-reconstructed coarser
//! one. The only early-exit mechanism is the `max_levels` cap, which
//! counts reductions — a cap of 1 yields a two-level pyramid.

use crate::{BuildMetrics, Pyramid, PyramidError};
use array_core::{ops, Element, NdArray};
use reduction_schemes::ReductionScheme;
use scratch_pool::ScratchPool;
use std::time::Instant;

/// Builds an approximation pyramid by repeated reduction.
///
/// Level 0 is a copy of `source` (the input is never mutated); every
/// subsequent level is an independently owned array, so mutating one level
/// never affects another. Construction stops the first time every extent
/// is ≤ 1 — the natural fixed point, where a reduce would be a no-op — or
/// after `max_levels` reductions, whichever comes first.
pub fn build_pyramid<T: Element>(
    source: &NdArray<T>,
    scheme: &dyn ReductionScheme<T>,
    pool: &ScratchPool,
    max_levels: Option<usize>,
) -> Result<Pyramid<T>, PyramidError> {
    let mut metrics = BuildMetrics::new();
    build_pyramid_metered(source, scheme, pool, max_levels, &mut metrics)
}

/// [`build_pyramid`], recording per-level timing into `metrics`.
pub fn build_pyramid_metered<T: Element>(
    source: &NdArray<T>,
    scheme: &dyn ReductionScheme<T>,
    pool: &ScratchPool,
    max_levels: Option<usize>,
    metrics: &mut BuildMetrics,
) -> Result<Pyramid<T>, PyramidError> {
    check_base(source)?;
    let started = Instant::now();

    let mut levels: Vec<NdArray<T>> = Vec::new();
    let mut current = source.clone();
    let mut level = 1usize;
    while below_cap(level, max_levels) && current.shape().max_extent() > 1 {
        let level_start = Instant::now();
        let next = reduce_level(&current, scheme, pool)?;
        tracing::debug!(
            scheme = scheme.name(),
            level,
            from = %current.shape(),
            to = %next.shape(),
            "reduced level"
        );
        metrics.record_level(level, next.shape().clone(), level_start.elapsed());
        levels.push(std::mem::replace(&mut current, next));
        level += 1;
    }
    levels.push(current);

    metrics.finalise(started.elapsed());
    Ok(Pyramid::from_levels(levels))
}

/// Builds a detail pyramid: each level holds the residual its reduction
/// lost (`original − expand(reduce(original))`), except the coarsest,
/// which is the final approximation.
///
/// The result has the same number of levels as [`build_pyramid`] would
/// produce, and its coarsest level is identical.
pub fn build_detail_pyramid<T: Element>(
    source: &NdArray<T>,
    scheme: &dyn ReductionScheme<T>,
    pool: &ScratchPool,
    max_levels: Option<usize>,
) -> Result<Pyramid<T>, PyramidError> {
    let mut metrics = BuildMetrics::new();
    build_detail_pyramid_metered(source, scheme, pool, max_levels, &mut metrics)
}

/// [`build_detail_pyramid`], recording per-level timing into `metrics`.
pub fn build_detail_pyramid_metered<T: Element>(
    source: &NdArray<T>,
    scheme: &dyn ReductionScheme<T>,
    pool: &ScratchPool,
    max_levels: Option<usize>,
    metrics: &mut BuildMetrics,
) -> Result<Pyramid<T>, PyramidError> {
    check_base(source)?;
    let started = Instant::now();

    let mut levels: Vec<NdArray<T>> = Vec::new();
    // Defensive copy: the working array is subtracted into a residual.
    let mut current = source.clone();
    let mut level = 1usize;
    while below_cap(level, max_levels) && current.shape().max_extent() > 1 {
        let level_start = Instant::now();
        let coarser = reduce_level(&current, scheme, pool)?;

        let mut expanded = pool.allocate::<T>(current.shape())?;
        scheme.expand(&mut expanded, &coarser.view(), pool)?;
        ops::sub_in_place(&mut current, &expanded.view())?;
        drop(expanded);

        tracing::debug!(
            scheme = scheme.name(),
            level,
            residual = %current.shape(),
            coarser = %coarser.shape(),
            "computed detail level"
        );
        metrics.record_level(level, coarser.shape().clone(), level_start.elapsed());
        levels.push(std::mem::replace(&mut current, coarser));
        level += 1;
    }
    // The last level is the surviving approximation, not a detail level.
    levels.push(current);

    metrics.finalise(started.elapsed());
    Ok(Pyramid::from_levels(levels))
}

/// Reconstructs a detail pyramid in place into an approximation pyramid.
///
/// Walks coarsest to finest, excluding the coarsest level itself (already
/// a true approximation): each finer level gains the expansion of the
/// level below it. For the morphological schemes on integer data this
/// inverts [`build_detail_pyramid`] exactly; for the binomial scheme it
/// holds up to floating-point rounding.
pub fn reconstruct<T: Element>(
    pyramid: &mut Pyramid<T>,
    scheme: &dyn ReductionScheme<T>,
    pool: &ScratchPool,
) -> Result<(), PyramidError> {
    let levels = pyramid.levels_mut();
    let num_levels = levels.len();
    for level in (0..num_levels.saturating_sub(1)).rev() {
        let (finer_levels, coarser_levels) = levels.split_at_mut(level + 1);
        let finer = &mut finer_levels[level];
        let coarser = &coarser_levels[0];

        let mut expanded = pool.allocate::<T>(finer.shape())?;
        scheme.expand(&mut expanded, &coarser.view(), pool)?;
        ops::add_in_place(finer, &expanded.view())?;
        tracing::debug!(scheme = scheme.name(), level, "reconstructed level");
    }
    Ok(())
}

fn check_base<T: Element>(source: &NdArray<T>) -> Result<(), PyramidError> {
    if source.shape().has_zero_extent() {
        return Err(PyramidError::EmptyDimension {
            shape: source.shape().clone(),
        });
    }
    Ok(())
}

fn below_cap(level: usize, max_levels: Option<usize>) -> bool {
    max_levels.map_or(true, |cap| level <= cap)
}

/// One reduction step: clone `current` into a pooled working copy, run the
/// scheme, verify the halving contract, and gather the result into an
/// independently owned array. Every pooled buffer involved is released
/// when `reduced` drops, on success and error paths alike.
fn reduce_level<T: Element>(
    current: &NdArray<T>,
    scheme: &dyn ReductionScheme<T>,
    pool: &ScratchPool,
) -> Result<NdArray<T>, PyramidError> {
    let mut work = pool.allocate::<T>(current.shape())?;
    work.data_mut().copy_from_slice(current.data());
    let reduced = scheme.reduce(work, pool)?;

    let expected = current.shape().halved();
    if reduced.shape() != expected {
        return Err(PyramidError::ReduceContract {
            expected,
            actual: reduced.shape(),
        });
    }
    Ok(reduced.materialize())
}
