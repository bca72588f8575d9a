// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # array-core
//!
//! N-dimensional array primitives for multi-resolution pyramid processing.
//!
//! This crate provides:
//! - [`Shape`] — ordered per-dimension extents with row-major strides.
//! - [`DType`] — the supported element data types (signed/unsigned 8/16/32-bit
//!   integers, f32, f64) and their compile-time counterpart, the [`Element`]
//!   trait family.
//! - [`NdArray`] — an owned, contiguous n-dimensional array.
//! - [`ArrayView`] — a borrowed, possibly strided window over a flat buffer.
//! - [`Layout`] — an explicit offset/extent/stride window descriptor with
//!   per-axis sub-view operations (stepping, slicing, truncation, collapse).
//! - Shape-checked elementwise kernels ([`ops`]) and a separable centered
//!   zero-padded convolution ([`convolve_separable_in_place`]).
//!
//! # Design Goals
//! - Zero-copy windows wherever possible: a [`Layout`] is a description, not
//!   a copy, and two windows may address disjoint lattices of one buffer.
//! - No heap allocation in hot paths (kernels work on caller-provided
//!   buffers).
//! - Clean error types via `thiserror`.

mod array;
mod convolve;
mod dtype;
mod element;
mod error;
mod layout;
pub mod ops;
mod shape;

pub use array::{ArrayView, NdArray};
pub use convolve::convolve_separable_in_place;
pub use dtype::DType;
pub use element::{Element, FloatElement};
pub use error::ArrayError;
pub use layout::{FlatOffsets, Layout};
pub use shape::Shape;
