// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # scratch-pool
//!
//! A reusable scratch-buffer allocator for pyramid construction. Building a
//! pyramid level needs several same-shape working copies — the reduce
//! input, the expanded approximation, the erosion ping-pong buffer — and
//! allocating them fresh at every level churns the heap. The pool keeps
//! returned buffers in a free list binned by (dtype, size class) so repeat
//! shapes are served from cache.
//!
//! # Key Components
//!
//! - [`ScratchPool`] — the allocator: serves typed, shaped buffers, keeps
//!   the free list, tracks statistics, and optionally enforces a
//!   [`ScratchBudget`] ceiling.
//! - [`PooledArray`] — an RAII guard around an allocated buffer. When a
//!   guard is dropped, its buffer automatically returns to the free list,
//!   so every checkout is matched by exactly one release on every code
//!   path, including early error returns. The borrow checker prevents
//!   use-after-free at compile time.
//! - [`AllocationStats`] — cumulative allocator metrics (hit ratio, peak
//!   usage, OOM count).
//!
//! # Ownership Model
//!
//! ```text
//! ScratchPool::allocate(shape)
//!       │
//!       ▼
//!   PooledArray<T>  ◄─── owns Vec<T>, holds Arc<PoolInner>
//!       │
//!       │  drop()
//!       ▼
//!   PoolInner::return_buffer()  ──► free list
//! ```
//!
//! # Example
//! ```
//! use array_core::Shape;
//! use scratch_pool::ScratchPool;
//!
//! let pool = ScratchPool::new();
//! let shape = Shape::matrix(16, 16);
//!
//! let a = pool.allocate::<f32>(&shape).unwrap();
//! assert_eq!(pool.allocated_bytes(), 16 * 16 * 4);
//!
//! // Returning buffers is automatic.
//! drop(a);
//! assert_eq!(pool.allocated_bytes(), 0);
//!
//! // The next same-shape checkout is served from the free list.
//! let _b = pool.allocate::<f32>(&shape).unwrap();
//! assert_eq!(pool.stats().cache_hits, 1);
//! ```

mod budget;
mod error;
mod guard;
pub mod pool;
mod stats;

pub use budget::ScratchBudget;
pub use error::PoolError;
pub use guard::PooledArray;
pub use pool::ScratchPool;
pub use stats::AllocationStats;
