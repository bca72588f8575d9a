// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # reduction-schemes
//!
//! The decomposition methods behind multi-resolution pyramids: each scheme
//! is a {reduce, expand} capability pair, where `reduce` halves every
//! dimension (rounding up) and `expand` approximately inverts it.
//!
//! Three schemes are provided — a deliberately closed set:
//! - [`AdjunctionScheme`] — morphological: per-axis pairwise-min decimation,
//!   inverted by flat dilation. Lossless round-trips through detail
//!   pyramids on exact (integer) arithmetic.
//! - [`SunMaragosScheme`] — the dual adjunction: per-axis erosion followed
//!   by pairwise-max decimation, sharing the dilation expand.
//! - [`BinomialScheme`] — linear: separable binomial smoothing followed by
//!   subsampling, the discrete analogue of a Gaussian/Laplacian pyramid.
//!   Float-only; round-trips up to floating-point rounding.
//!
//! # Ownership contract
//!
//! `reduce` consumes a pooled working copy and returns a [`Reduced`] — the
//! pooled buffer that now holds the result (possibly a different buffer
//! than the input, as in the Sun–Maragos erosion ping-pong) together with
//! the strided window describing where the result lives inside it.
//! Dropping the `Reduced` releases every buffer involved; there is no
//! manual free pairing.
//!
//! `expand` writes into a caller-sized target and makes no assumptions
//! about either argument's origin beyond the shape contract: the stride-2
//! window of the target must equal the source shape exactly, anything else
//! is an immediate error.

mod error;
pub mod kernel;
mod scheme;
mod window;

pub use error::SchemeError;
pub use scheme::{
    AdjunctionScheme, BinomialScheme, Reduced, ReductionScheme, SchemeKind, SunMaragosScheme,
};
