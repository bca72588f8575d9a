// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The Sun–Maragos scheme: per-axis erosion, then pairwise-max decimation.

use crate::scheme::{Reduced, ReductionScheme};
use crate::{window, SchemeError};
use array_core::{ops, ArrayView, Element, Layout};
use scratch_pool::{PooledArray, ScratchPool};

/// Morphological pyramid scheme built on the dual adjunction.
///
/// `reduce` runs two phases. First an n-dimensional erosion composed of
/// 1-D passes: along each axis, `out[i] = min(in[i], in[i-1])` with the
/// boundary hyperplane at index 0 copied unchanged, ping-ponging between
/// the input buffer and one scratch buffer. Then the same even/odd
/// decimation walk as the adjunction scheme, folding with **maximum**
/// instead of minimum.
///
/// Erode-then-max-pool keeps different morphological boundary detail than
/// the direct min-pool; the two schemes are duals, and both invert through
/// the shared flat-dilation expand.
#[derive(Debug, Clone, Copy, Default)]
pub struct SunMaragosScheme;

impl SunMaragosScheme {
    /// Creates the scheme.
    pub fn new() -> Self {
        Self
    }
}

impl<T: Element> ReductionScheme<T> for SunMaragosScheme {
    fn name(&self) -> &'static str {
        "sun-maragos"
    }

    fn reduce(
        &self,
        img: PooledArray<T>,
        pool: &ScratchPool,
    ) -> Result<Reduced<T>, SchemeError> {
        let shape = img.shape().clone();
        let full = Layout::contiguous(&shape);

        // Phase 1: erode axis by axis, ping-ponging between two pooled
        // buffers. After an odd number of axes the result sits in the
        // scratch buffer; `current` tracks wherever it ended up and the
        // other buffer is released on return.
        let mut current = img;
        let mut other = pool.allocate::<T>(&shape)?;
        for axis in 0..shape.rank() {
            let boundary = full.collapse_axis(axis, 0);
            ops::copy_between(other.data_mut(), &boundary, current.data(), &boundary)?;

            let interior = full.slice_from(axis, 1);
            let extent = full.dims()[axis];
            let shifted_back = full.truncate_axis(axis, extent - 1);
            ops::zip_between(
                other.data_mut(),
                &interior,
                current.data(),
                &interior,
                &shifted_back,
                T::min_of,
            )?;

            std::mem::swap(&mut current, &mut other);
        }
        drop(other);

        // Phase 2: even/odd decimation, folding with max.
        let result = window::decimate_in_place(current.data_mut(), &shape, T::max_of)?;
        Ok(Reduced::new(current, result))
    }

    fn expand(
        &self,
        target: &mut PooledArray<T>,
        source: &ArrayView<'_, T>,
        _pool: &ScratchPool,
    ) -> Result<(), SchemeError> {
        let shape = target.shape().clone();
        window::dilate_expand(target.data_mut(), &shape, source)
    }
}
