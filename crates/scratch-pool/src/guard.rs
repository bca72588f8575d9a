// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! RAII scratch array that returns its buffer to the pool on drop.
//!
//! [`PooledArray`] is the mechanism through which Rust's ownership model
//! enforces the pool's resource discipline: a checkout inside a reduce or
//! a pyramid driver is released exactly once on every exit path — normal
//! return, `?` propagation, or panic unwind — without any manual free
//! bookkeeping.

use crate::pool::PoolInner;
use array_core::{ArrayView, DType, Element, Layout, Shape};
use std::sync::Arc;

/// A shaped, typed scratch buffer checked out from a
/// [`ScratchPool`](crate::ScratchPool).
///
/// When a `PooledArray` is dropped, its memory automatically returns to the
/// pool's free list. The borrow checker prevents use-after-free.
///
/// # Example
/// ```ignore
/// let buf = pool.allocate::<f32>(&shape)?;
/// buf.data();                // use the buffer
/// drop(buf);                 // memory returned to pool
/// // buf.data();             // compile error — moved value
/// ```
pub struct PooledArray<T: Element> {
    /// The raw buffer. Wrapped in `Option` so `drop()` can `take()` it.
    data: Option<Vec<T>>,
    /// The shape this checkout was sized for.
    shape: Shape,
    /// Handle back to the pool for deallocation tracking.
    pool: Arc<PoolInner>,
    /// Size of this allocation in bytes (for accounting).
    size_bytes: usize,
}

impl<T: Element> PooledArray<T> {
    /// Creates a new guard (called internally by the pool).
    pub(crate) fn new(
        data: Vec<T>,
        shape: Shape,
        pool: Arc<PoolInner>,
        size_bytes: usize,
    ) -> Self {
        Self {
            data: Some(data),
            shape,
            pool,
            size_bytes,
        }
    }

    /// Returns the shape this buffer was allocated for.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the buffer's data type.
    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    /// Returns the size of this allocation in bytes.
    pub fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    /// Returns the flat row-major data.
    pub fn data(&self) -> &[T] {
        self.data.as_ref().expect("buffer already returned")
    }

    /// Returns the flat row-major data mutably.
    pub fn data_mut(&mut self) -> &mut [T] {
        self.data.as_mut().expect("buffer already returned")
    }

    /// Returns the canonical contiguous window over this buffer.
    pub fn layout(&self) -> Layout {
        Layout::contiguous(&self.shape)
    }

    /// Returns a borrowed view over the whole buffer.
    pub fn view(&self) -> ArrayView<'_, T> {
        ArrayView::from_parts(self.layout(), self.data())
    }
}

impl<T: Element> Drop for PooledArray<T> {
    fn drop(&mut self) {
        if let Some(buffer) = self.data.take() {
            self.pool.return_buffer(buffer, self.size_bytes);
        }
    }
}

impl<T: Element> std::fmt::Debug for PooledArray<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PooledArray")
            .field("shape", &self.shape)
            .field("dtype", &self.dtype())
            .field("size_bytes", &self.size_bytes)
            .finish()
    }
}
