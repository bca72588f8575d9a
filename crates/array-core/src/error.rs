// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for array operations.

use crate::Shape;

/// Errors that can occur during array construction and elementwise kernels.
#[derive(Debug, thiserror::Error)]
pub enum ArrayError {
    /// Two windows have incompatible shapes for the requested operation.
    #[error("incompatible shapes for {op}: {lhs} vs {rhs}")]
    ShapeMismatch {
        op: &'static str,
        lhs: Shape,
        rhs: Shape,
    },

    /// The provided buffer does not hold the number of elements the shape implies.
    #[error("buffer size mismatch: expected {expected} elements, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// A window addresses elements beyond the end of its backing buffer.
    #[error("window out of bounds: needs {required} elements, buffer has {actual}")]
    WindowOutOfBounds { required: usize, actual: usize },

    /// The requested element data type is not recognized.
    #[error("unrecognized data type '{name}'")]
    UnsupportedDType { name: String },

    /// A convolution kernel with no taps was supplied.
    #[error("invalid convolution kernel of length {len}")]
    InvalidKernel { len: usize },
}
