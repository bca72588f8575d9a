// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The adjunction scheme: pairwise-min decimation, flat-dilation expand.

use crate::scheme::{Reduced, ReductionScheme};
use crate::{window, SchemeError};
use array_core::{ArrayView, Element};
use scratch_pool::{PooledArray, ScratchPool};

/// Morphological pyramid scheme built on the erosion/dilation adjunction.
///
/// `reduce` folds each axis's odd sub-lattice into its even sub-lattice by
/// pairwise minimum, in place; the surviving all-even window is the
/// reduced array. `expand` is the flat dilation shared with
/// [`SunMaragosScheme`](crate::SunMaragosScheme): scatter onto the even
/// lattice, then copy even hyperplanes into their odd neighbors axis by
/// axis.
///
/// Detail pyramids built with this scheme reconstruct exactly on integer
/// data — min-of-pair followed by copy-back loses nothing the residual
/// doesn't keep.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdjunctionScheme;

impl AdjunctionScheme {
    /// Creates the scheme.
    pub fn new() -> Self {
        Self
    }
}

impl<T: Element> ReductionScheme<T> for AdjunctionScheme {
    fn name(&self) -> &'static str {
        "adjunction"
    }

    fn reduce(
        &self,
        mut img: PooledArray<T>,
        _pool: &ScratchPool,
    ) -> Result<Reduced<T>, SchemeError> {
        let shape = img.shape().clone();
        let result = window::decimate_in_place(img.data_mut(), &shape, T::min_of)?;
        Ok(Reduced::new(img, result))
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
