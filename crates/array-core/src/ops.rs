// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Shape-checked elementwise kernels over strided windows.
//!
//! The `*_within` kernels combine two windows of a *single* buffer — the
//! even and odd sub-lattices a decimation folds together live in the same
//! allocation, so the buffer is borrowed once and positions are addressed
//! through [`Layout`] descriptors. The `*_between` kernels read from one
//! buffer and write another. All kernels fail on elementwise shape
//! mismatch before touching any data.

use crate::{ArrayError, ArrayView, Element, Layout, NdArray};

fn check_same_dims(op: &'static str, lhs: &Layout, rhs: &Layout) -> Result<(), ArrayError> {
    if lhs.dims() != rhs.dims() {
        return Err(ArrayError::ShapeMismatch {
            op,
            lhs: lhs.shape(),
            rhs: rhs.shape(),
        });
    }
    Ok(())
}

fn check_window<T>(data: &[T], window: &Layout) -> Result<(), ArrayError> {
    let required = window.required_len();
    if required > data.len() {
        return Err(ArrayError::WindowOutOfBounds {
            required,
            actual: data.len(),
        });
    }
    Ok(())
}

/// `dst[i] = f(dst[i], src[i])` for two windows of one buffer.
pub fn combine_within<T: Element>(
    data: &mut [T],
    dst: &Layout,
    src: &Layout,
    f: fn(T, T) -> T,
) -> Result<(), ArrayError> {
    check_same_dims("combine_within", dst, src)?;
    check_window(data, dst)?;
    check_window(data, src)?;
    for (d, s) in dst.flat_offsets().zip(src.flat_offsets()) {
        data[d] = f(data[d], data[s]);
    }
    Ok(())
}

/// `dst[i] = src[i]` for two windows of one buffer.
pub fn copy_within<T: Element>(
    data: &mut [T],
    dst: &Layout,
    src: &Layout,
) -> Result<(), ArrayError> {
    check_same_dims("copy_within", dst, src)?;
    check_window(data, dst)?;
    check_window(data, src)?;
    for (d, s) in dst.flat_offsets().zip(src.flat_offsets()) {
        data[d] = data[s];
    }
    Ok(())
}

/// `dst[i] = src[i]` across two buffers.
pub fn copy_between<T: Element>(
    dst_data: &mut [T],
    dst: &Layout,
    src_data: &[T],
    src: &Layout,
) -> Result<(), ArrayError> {
    check_same_dims("copy_between", dst, src)?;
    check_window(dst_data, dst)?;
    check_window(src_data, src)?;
    for (d, s) in dst.flat_offsets().zip(src.flat_offsets()) {
        dst_data[d] = src_data[s];
    }
    Ok(())
}

/// `dst[i] = f(lhs[i], rhs[i])`, reading two windows of one source buffer
/// and writing a window of another.
pub fn zip_between<T: Element>(
    dst_data: &mut [T],
    dst: &Layout,
    src_data: &[T],
    lhs: &Layout,
    rhs: &Layout,
    f: fn(T, T) -> T,
) -> Result<(), ArrayError> {
    check_same_dims("zip_between", dst, lhs)?;
    check_same_dims("zip_between", lhs, rhs)?;
    check_window(dst_data, dst)?;
    check_window(src_data, lhs)?;
    check_window(src_data, rhs)?;
    for ((d, a), b) in dst
        .flat_offsets()
        .zip(lhs.flat_offsets())
        .zip(rhs.flat_offsets())
    {
        dst_data[d] = f(src_data[a], src_data[b]);
    }
    Ok(())
}

/// Adds `src` into `dst` elementwise, in place.
pub fn add_in_place<T: Element>(
    dst: &mut NdArray<T>,
    src: &ArrayView<'_, T>,
) -> Result<(), ArrayError> {
    if dst.shape().dims() != src.layout().dims() {
        return Err(ArrayError::ShapeMismatch {
            op: "add_in_place",
            lhs: dst.shape().clone(),
            rhs: src.shape(),
        });
    }
    for (d, s) in dst.data_mut().iter_mut().zip(src.iter()) {
        *d = T::add(*d, s);
    }
    Ok(())
}

/// Subtracts `src` from `dst` elementwise, in place.
pub fn sub_in_place<T: Element>(
    dst: &mut NdArray<T>,
    src: &ArrayView<'_, T>,
) -> Result<(), ArrayError> {
    if dst.shape().dims() != src.layout().dims() {
        return Err(ArrayError::ShapeMismatch {
            op: "sub_in_place",
            lhs: dst.shape().clone(),
            rhs: src.shape(),
        });
    }
    for (d, s) in dst.data_mut().iter_mut().zip(src.iter()) {
        *d = T::sub(*d, s);
    }
    Ok(())
}
