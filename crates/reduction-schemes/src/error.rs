// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for reduction schemes.

use array_core::{ArrayError, Shape};
use scratch_pool::PoolError;

/// Errors that can occur inside a scheme's reduce or expand.
#[derive(Debug, thiserror::Error)]
pub enum SchemeError {
    /// The stride-2 window of the expand target does not match the source
    /// shape. This is a caller/scheme contract violation, not a recoverable
    /// condition.
    #[error("expand shape contract violated: stride-2 window of target {target} is {window}, but source is {src}")]
    ExpandShapeMismatch {
        target: Shape,
        window: Shape,
        src: Shape,
    },

    /// An unknown scheme name was requested.
    #[error("unknown scheme '{name}'; expected 'adjunction', 'sun-maragos', or 'binomial'")]
    UnknownScheme { name: String },

    /// An array kernel failed.
    #[error("array error: {0}")]
    Array(#[from] ArrayError),

    /// Scratch allocation failed.
    #[error("scratch pool error: {0}")]
    Pool(#[from] PoolError),
}
