// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # pyramid
//!
//! The drivers that turn a [`ReductionScheme`](reduction_schemes::ReductionScheme)
//! into multi-resolution pyramids:
//!
//! - [`build_pyramid`] — repeated reduction into an approximation pyramid,
//!   finest level first, stopping once every extent is ≤ 1 (or at a level
//!   cap).
//! - [`build_detail_pyramid`] — interleaved reduce/expand/subtract into a
//!   detail (Laplacian-like) pyramid: each level holds the residual its
//!   reduction lost, except the coarsest, which is a true approximation.
//! - [`reconstruct`] — mutates a detail pyramid back into an approximation
//!   pyramid by repeated expand-and-add, coarsest to finest.
//!
//! Working copies come from a [`ScratchPool`](scratch_pool::ScratchPool);
//! every checkout is scope-bound, so the drivers hold no pool bookkeeping
//! of their own. Per-level timing is available through the `*_metered`
//! variants and [`BuildMetrics`].
//!
//! # Example
//! ```
//! use array_core::{NdArray, Shape};
//! use pyramid::{build_detail_pyramid, build_pyramid, reconstruct};
//! use reduction_schemes::AdjunctionScheme;
//! use scratch_pool::ScratchPool;
//!
//! let pool = ScratchPool::new();
//! let scheme = AdjunctionScheme::new();
//! let src = NdArray::from_vec(Shape::vector(6), vec![1i32, 2, 3, 4, 5, 6]).unwrap();
//!
//! let approx = build_pyramid(&src, &scheme, &pool, None).unwrap();
//! assert_eq!(approx.num_levels(), 4); // [6] → [3] → [2] → [1]
//!
//! let mut detail = build_detail_pyramid(&src, &scheme, &pool, None).unwrap();
//! reconstruct(&mut detail, &scheme, &pool).unwrap();
//! assert_eq!(detail.level(0).unwrap().data(), src.data());
//! ```

mod builder;
mod config;
mod error;
mod metrics;
mod pyramid;

pub use builder::{
    build_detail_pyramid, build_detail_pyramid_metered, build_pyramid, build_pyramid_metered,
    reconstruct,
};
pub use config::PyramidConfig;
pub use error::PyramidError;
pub use metrics::{BuildMetrics, LevelMetrics};
pub use pyramid::Pyramid;
