// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Separable convolution over n-dimensional arrays.

use crate::{ArrayError, FloatElement, Layout, Shape};

/// Convolves `data` in place with a separable kernel, applying the 1-D
/// `taps` along every axis in turn.
///
/// Convention: centered, zero-padded. For each axis,
/// `out[i] = Σ_t taps[t] · in[i + t - radius]` with `radius = taps.len() / 2`
/// and positions outside the array contributing zero. For the symmetric
/// kernels used here this is identical to true convolution. Accumulation is
/// carried out in the element's own precision.
///
/// `scratch` must hold at least `shape.num_elements()` elements; each axis
/// pass writes into it and copies back, so its prior contents are
/// irrelevant.
pub fn convolve_separable_in_place<T: FloatElement>(
    data: &mut [T],
    shape: &Shape,
    taps: &[T],
    scratch: &mut [T],
) -> Result<(), ArrayError> {
    if taps.is_empty() {
        return Err(ArrayError::InvalidKernel { len: 0 });
    }
    let len = shape.num_elements();
    if data.len() < len {
        return Err(ArrayError::BufferSizeMismatch {
            expected: len,
            actual: data.len(),
        });
    }
    if scratch.len() < len {
        return Err(ArrayError::BufferSizeMismatch {
            expected: len,
            actual: scratch.len(),
        });
    }
    if len == 0 {
        return Ok(());
    }

    let radius = taps.len() / 2;
    let full = Layout::contiguous(shape);
    for axis in 0..shape.rank() {
        let extent = full.dims()[axis];
        let stride = full.strides()[axis];
        // One pass per 1-D lane along `axis`; the collapsed layout walks
        // the lane origins.
        let lanes = full.collapse_axis(axis, 0);
        for base in lanes.flat_offsets() {
            for i in 0..extent {
                let mut acc = T::zero();
                for (t, &tap) in taps.iter().enumerate() {
                    let j = i as isize + t as isize - radius as isize;
                    if j >= 0 && (j as usize) < extent {
                        acc = T::add(acc, T::mul(tap, data[base + (j as usize) * stride]));
                    }
                }
                scratch[base + i * stride] = acc;
            }
        }
        data[..len].copy_from_slice(&scratch[..len]);
    }
    Ok(())
}
