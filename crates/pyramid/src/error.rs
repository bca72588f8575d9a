// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for pyramid construction.

use array_core::{ArrayError, Shape};
use reduction_schemes::SchemeError;
use scratch_pool::PoolError;

/// Errors that can occur while building or reconstructing pyramids.
#[derive(Debug, thiserror::Error)]
pub enum PyramidError {
    /// The base array has a zero-extent dimension, for which repeated
    /// halving is undefined.
    #[error("pyramid base has an empty dimension: {shape}")]
    EmptyDimension { shape: Shape },

    /// A scheme's reduce returned a shape other than `ceil(extent / 2)`
    /// per dimension. Scheme bug; not recoverable.
    #[error("scheme reduce contract violated: expected {expected}, got {actual}")]
    ReduceContract { expected: Shape, actual: Shape },

    /// A scheme operation failed.
    #[error(transparent)]
    Scheme(#[from] SchemeError),

    /// Scratch allocation failed.
    #[error("scratch pool error: {0}")]
    Pool(#[from] PoolError),

    /// An array kernel failed.
    #[error("array error: {0}")]
    Array(#[from] ArrayError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}
