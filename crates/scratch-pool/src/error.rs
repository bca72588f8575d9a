// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the scratch pool.

/// Errors that can occur during scratch-buffer allocation.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    /// The requested allocation would exceed the pool's budget.
    #[error("out of scratch memory: requested {requested_bytes} bytes, but only {available_bytes} available (budget: {budget_bytes})")]
    OutOfMemory {
        requested_bytes: usize,
        available_bytes: usize,
        budget_bytes: usize,
    },

    /// Attempted to allocate a buffer for a shape with a zero extent.
    #[error("cannot allocate a zero-sized scratch buffer")]
    ZeroSizedAllocation,

    /// A budget string could not be parsed.
    #[error("invalid budget: {0}")]
    InvalidBudget(String),
}
