// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The scratch-buffer pool.
//!
//! The [`ScratchPool`] is the allocator behind every working copy a
//! pyramid build needs. It:
//!
//! 1. Serves typed, shaped buffers, zeroed on handout.
//! 2. Maintains a free list of returned buffers, binned by (dtype, size
//!    class), so the repeated same-shape checkouts of a level loop avoid
//!    fresh heap allocation.
//! 3. Optionally enforces a hard [`ScratchBudget`] ceiling — allocations
//!    that would exceed it return `Err(OutOfMemory)`.
//! 4. Tracks allocation statistics for profiling.
//!
//! # Thread Safety
//! Interior mutability is behind `Mutex`/`AtomicUsize`, so a pool can be
//! shared if a caller ever needs to; the pyramid drivers themselves are
//! strictly single-threaded.
//!
//! # Size Classes
//! Returned buffers are binned by element-count size class (rounded up to
//! the next power of two). A request first checks its class's bin; a hit
//! trades a little capacity slack for skipping the allocation entirely.

use crate::{AllocationStats, PoolError, PooledArray, ScratchBudget};
use array_core::{DType, Element, Shape};
use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Minimum size class: 64 elements. Anything smaller is rounded up.
const MIN_CLASS_ELEMENTS: usize = 64;

/// Internal pool state, shared between the pool and its guards via `Arc`.
///
/// Guards hold a reference to this inner type so they can return memory
/// without needing a reference to the full [`ScratchPool`].
pub struct PoolInner {
    /// Optional hard ceiling on live checkouts.
    budget: Option<ScratchBudget>,
    /// Currently allocated bytes (live, not yet returned).
    allocated_bytes: AtomicUsize,
    /// Free buffer cache: (dtype, size class) → type-erased `Vec<T>`s.
    free_buffers: Mutex<HashMap<(DType, usize), Vec<Box<dyn Any + Send>>>>,
    /// Statistics (behind a Mutex since updates are infrequent).
    stats: Mutex<AllocationStats>,
}

impl PoolInner {
    /// Called by `PooledArray::drop` to return a buffer to the free list.
    pub(crate) fn return_buffer<T: Element>(&self, buffer: Vec<T>, size_bytes: usize) {
        self.allocated_bytes.fetch_sub(size_bytes, Ordering::Release);

        if let Ok(mut stats) = self.stats.lock() {
            stats.record_deallocation();
        }

        let class = size_class_for(buffer.len());
        if let Ok(mut free) = self.free_buffers.lock() {
            free.entry((T::DTYPE, class))
                .or_default()
                .push(Box::new(buffer));
        }
    }
}

/// The scratch-buffer allocator for pyramid working copies.
///
/// # Example
/// ```
/// use array_core::Shape;
/// use scratch_pool::{ScratchBudget, ScratchPool};
///
/// let pool = ScratchPool::with_budget(ScratchBudget::from_mb(16));
/// let buf = pool.allocate::<i32>(&Shape::matrix(8, 8)).unwrap();
/// assert_eq!(pool.allocated_bytes(), 8 * 8 * 4);
/// drop(buf);
/// assert_eq!(pool.allocated_bytes(), 0);
/// ```
pub struct ScratchPool {
    inner: Arc<PoolInner>,
}

impl ScratchPool {
    /// Creates an unbounded pool.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Creates a pool with a hard budget ceiling.
    pub fn with_budget(budget: ScratchBudget) -> Self {
        Self::build(Some(budget))
    }

    fn build(budget: Option<ScratchBudget>) -> Self {
        Self {
            inner: Arc::new(PoolInner {
                budget,
                allocated_bytes: AtomicUsize::new(0),
                free_buffers: Mutex::new(HashMap::new()),
                stats: Mutex::new(AllocationStats::default()),
            }),
        }
    }

    /// Allocates a zeroed buffer for the given shape.
    ///
    /// Fails with [`PoolError::ZeroSizedAllocation`] for shapes with a zero
    /// extent, and with [`PoolError::OutOfMemory`] if a budget is set and
    /// the checkout would exceed it. If a suitably binned buffer exists in
    /// the free list it is reused (cache hit); otherwise a fresh `Vec<T>`
    /// is allocated (cache miss).
    ///
    /// The returned [`PooledArray`] automatically returns the buffer to the
    /// pool when dropped.
    pub fn allocate<T: Element>(&self, shape: &Shape) -> Result<PooledArray<T>, PoolError> {
        let count = shape.num_elements();
        if count == 0 {
            return Err(PoolError::ZeroSizedAllocation);
        }
        let size_bytes = count * T::DTYPE.size_bytes();

        if let Some(budget) = self.inner.budget {
            let current = self.inner.allocated_bytes.load(Ordering::Acquire);
            let budget_bytes = budget.as_bytes();
            if current + size_bytes > budget_bytes {
                if let Ok(mut stats) = self.inner.stats.lock() {
                    stats.record_oom();
                }
                return Err(PoolError::OutOfMemory {
                    requested_bytes: size_bytes,
                    available_bytes: budget_bytes.saturating_sub(current),
                    budget_bytes,
                });
            }
        }

        // Try to reuse a buffer from this type's size-class bin.
        let class = size_class_for(count);
        let mut buffer: Option<Vec<T>> = None;
        if let Ok(mut free) = self.inner.free_buffers.lock() {
            if let Some(bin) = free.get_mut(&(T::DTYPE, class)) {
                if let Some(entry) = bin.pop() {
                    if let Ok(reclaimed) = entry.downcast::<Vec<T>>() {
                        let mut buf = *reclaimed;
                        // Hand out zeroed, exactly-sized buffers.
                        buf.clear();
                        buf.resize(count, T::zero());
                        buffer = Some(buf);
                    }
                }
            }
        }

        let is_hit = buffer.is_some();
        let data = buffer.unwrap_or_else(|| vec![T::zero(); count]);

        self.inner
            .allocated_bytes
            .fetch_add(size_bytes, Ordering::Release);

        if let Ok(mut stats) = self.inner.stats.lock() {
            if is_hit {
                stats.record_cache_hit();
            } else {
                stats.record_cache_miss();
            }
            let new_total = self.inner.allocated_bytes.load(Ordering::Acquire);
            stats.update_peak(new_total);
        }

        Ok(PooledArray::new(
            data,
            shape.clone(),
            Arc::clone(&self.inner),
            size_bytes,
        ))
    }

    /// Returns the number of bytes currently checked out (live).
    pub fn allocated_bytes(&self) -> usize {
        self.inner.allocated_bytes.load(Ordering::Acquire)
    }

    /// Returns the configured budget, if any.
    pub fn budget(&self) -> Option<ScratchBudget> {
        self.inner.budget
    }

    /// Returns a snapshot of allocation statistics.
    pub fn stats(&self) -> AllocationStats {
        self.inner
            .stats
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    /// Evicts all cached free buffers, releasing their memory.
    ///
    /// Live checkouts are unaffected — only the free list is cleared.
    pub fn shrink(&self) {
        if let Ok(mut free) = self.inner.free_buffers.lock() {
            free.clear();
        }
    }
}

impl Default for ScratchPool {
    fn default() -> Self {
        Self::new()
    }
}

/// Computes the size class for a given element count.
///
/// Returns the smallest power of 2 that is ≥ `count` and ≥
/// `MIN_CLASS_ELEMENTS`.
fn size_class_for(count: usize) -> usize {
    count.max(MIN_CLASS_ELEMENTS).next_power_of_two()
}

impl std::fmt::Debug for ScratchPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScratchPool")
            .field("budget", &self.inner.budget)
            .field("allocated_bytes", &self.allocated_bytes())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_and_drop() {
        let pool = ScratchPool::new();
        let guard = pool.allocate::<f32>(&Shape::vector(100)).unwrap();
        assert_eq!(pool.allocated_bytes(), 400);
        assert_eq!(guard.size_bytes(), 400);

        drop(guard);
        assert_eq!(pool.allocated_bytes(), 0);
    }

    #[test]
    fn test_buffers_are_zeroed() {
        let pool = ScratchPool::new();
        let mut guard = pool.allocate::<i32>(&Shape::vector(16)).unwrap();
        assert!(guard.data().iter().all(|&v| v == 0));
        guard.data_mut().fill(7);
        drop(guard);

        // Reused buffer must be zeroed again.
        let guard = pool.allocate::<i32>(&Shape::vector(16)).unwrap();
        assert!(guard.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_free_list_reuse() {
        let pool = ScratchPool::new();
        let guard = pool.allocate::<u8>(&Shape::matrix(8, 8)).unwrap();
        drop(guard);

        let _guard2 = pool.allocate::<u8>(&Shape::matrix(8, 8)).unwrap();
        let stats = pool.stats();
        assert_eq!(stats.cache_hits, 1);
        assert_eq!(stats.cache_misses, 1);
    }

    #[test]
    fn test_no_cross_dtype_reuse() {
        let pool = ScratchPool::new();
        drop(pool.allocate::<i32>(&Shape::vector(64)).unwrap());

        // f32 has the same byte width, but dtypes bin separately.
        let _guard = pool.allocate::<f32>(&Shape::vector(64)).unwrap();
        assert_eq!(pool.stats().cache_hits, 0);
    }

    #[test]
    fn test_zero_extent_rejected() {
        let pool = ScratchPool::new();
        let result = pool.allocate::<f32>(&Shape::new(vec![3, 0]));
        assert!(matches!(result, Err(PoolError::ZeroSizedAllocation)));
    }

    #[test]
    fn test_budget_enforced() {
        let pool = ScratchPool::with_budget(ScratchBudget::from_bytes(1024));
        let _a = pool.allocate::<u8>(&Shape::vector(512)).unwrap();
        let _b = pool.allocate::<u8>(&Shape::vector(512)).unwrap();

        let result = pool.allocate::<u8>(&Shape::vector(1));
        assert!(matches!(result, Err(PoolError::OutOfMemory { .. })));
        assert_eq!(pool.stats().oom_count, 1);
    }

    #[test]
    fn test_budget_freed_capacity_reusable() {
        let pool = ScratchPool::with_budget(ScratchBudget::from_bytes(1024));
        let a = pool.allocate::<u8>(&Shape::vector(1024)).unwrap();
        drop(a);
        assert!(pool.allocate::<u8>(&Shape::vector(1024)).is_ok());
    }

    #[test]
    fn test_shrink_clears_free_list() {
        let pool = ScratchPool::new();
        drop(pool.allocate::<f64>(&Shape::vector(128)).unwrap());
        pool.shrink();

        // After shrink the next allocation misses the cache.
        let _g = pool.allocate::<f64>(&Shape::vector(128)).unwrap();
        assert_eq!(pool.stats().cache_hits, 0);
        assert_eq!(pool.stats().cache_misses, 2);
    }

    #[test]
    fn test_stats_peak() {
        let pool = ScratchPool::new();
        let g1 = pool.allocate::<u8>(&Shape::vector(1000)).unwrap();
        let g2 = pool.allocate::<u8>(&Shape::vector(2000)).unwrap();
        drop(g1);
        drop(g2);

        assert_eq!(pool.stats().peak_allocated_bytes, 3000);
        assert_eq!(pool.stats().total_deallocations, 2);
    }

    #[test]
    fn test_size_class() {
        assert_eq!(size_class_for(1), MIN_CLASS_ELEMENTS);
        assert_eq!(size_class_for(64), 64);
        assert_eq!(size_class_for(65), 128);
        assert_eq!(size_class_for(4096), 4096);
    }

    #[test]
    fn test_debug_format() {
        let pool = ScratchPool::new();
        let debug = format!("{pool:?}");
        assert!(debug.contains("ScratchPool"));
        assert!(debug.contains("allocated_bytes"));
    }
}
