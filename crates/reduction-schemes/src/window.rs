// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The even/odd lattice walks shared by the morphological schemes.
//!
//! Both morphological reduces decimate by folding each axis's odd
//! sub-lattice into its even sub-lattice; the shared expand inverts the
//! walk by scattering onto the even lattice and dilating even hyperplanes
//! into their odd neighbors, axis by axis.

use crate::SchemeError;
use array_core::{ops, ArrayView, Element, Layout, Shape};

/// Folds `combine` over each axis's even/odd pair in place.
///
/// At axis `d`, positions `2i` and `2i+1` combine into position `2i`; when
/// the extent is odd the final even position has no partner and survives
/// unmodified. Axes already processed participate at their halved extent,
/// axes not yet processed at full extent. Returns the surviving all-even
/// window — a strided view into the same buffer holding the reduced array.
///
/// An axis of extent 1 degenerates immediately: its odd lattice is empty
/// and the single hyperplane propagates unchanged.
pub(crate) fn decimate_in_place<T: Element>(
    data: &mut [T],
    shape: &Shape,
    combine: fn(T, T) -> T,
) -> Result<Layout, SchemeError> {
    let mut current = Layout::contiguous(shape);
    for axis in 0..shape.rank() {
        let even = current.step_axis(axis, 2);
        let odd = current.slice_from(axis, 1).step_axis(axis, 2);
        // Only even positions with an odd partner take part in the fold.
        let paired = even.truncate_axis(axis, odd.dims()[axis]);
        ops::combine_within(data, &paired, &odd, combine)?;
        current = even;
    }
    Ok(current)
}

/// Writes `source` onto `target`'s even lattice, then dilates axis by axis
/// until every position of `target` has been written exactly once.
///
/// At axis `d`, each odd hyperplane receives the value of its even
/// neighbor at the next-lower index (a flat structuring element of length
/// one); axes already processed run at full resolution, the rest still at
/// stride 2. The highest odd hyperplane is populated from the interior —
/// there is no wraparound.
///
/// Fails fast if the stride-2 window of `target` does not match `source`'s
/// shape exactly.
pub(crate) fn dilate_expand<T: Element>(
    target: &mut [T],
    target_shape: &Shape,
    source: &ArrayView<'_, T>,
) -> Result<(), SchemeError> {
    let rank = target_shape.rank();
    let full = Layout::contiguous(target_shape);
    let mut steps = vec![2usize; rank];

    let even = apply_steps(&full, &steps);
    if even.dims() != source.layout().dims() {
        return Err(SchemeError::ExpandShapeMismatch {
            target: target_shape.clone(),
            window: even.shape(),
            src: source.shape(),
        });
    }
    ops::copy_between(target, &even, source.data(), source.layout())?;

    for axis in 0..rank {
        let even = apply_steps(&full, &steps);
        let odd = apply_steps(&full.slice_from(axis, 1), &steps);
        let mut paired = even;
        for (a, &extent) in odd.dims().iter().enumerate() {
            paired = paired.truncate_axis(a, extent);
        }
        ops::copy_within(target, &odd, &paired)?;
        steps[axis] = 1;
    }
    Ok(())
}

fn apply_steps(layout: &Layout, steps: &[usize]) -> Layout {
    let mut out = layout.clone();
    for (axis, &step) in steps.iter().enumerate() {
        if step != 1 {
            out = out.step_axis(axis, step);
        }
    }
    out
}
