// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Build profiling metrics.
//!
//! [`BuildMetrics`] collects per-level and aggregate timing for a pyramid
//! build. Together with the pool's
//! [`AllocationStats`](scratch_pool::AllocationStats) these are the tools
//! for judging whether the scratch reuse discipline is paying off on a
//! given workload.

use array_core::Shape;
use std::time::Duration;

/// Timing for a single level's construction.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LevelMetrics {
    /// Level index (1 = first reduction).
    pub level: usize,
    /// Shape of the level produced.
    pub shape: Shape,
    /// Wall-clock time to produce it (reduce, plus expand/subtract for
    /// detail builds).
    pub duration: Duration,
}

/// Aggregate metrics for a complete pyramid build.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct BuildMetrics {
    /// Total wall-clock time for the build.
    pub total_duration: Duration,
    /// Per-level metrics, finest reduction first.
    pub levels: Vec<LevelMetrics>,
}

impl BuildMetrics {
    /// Creates an empty metrics container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one level's construction.
    pub(crate) fn record_level(&mut self, level: usize, shape: Shape, duration: Duration) {
        self.levels.push(LevelMetrics {
            level,
            shape,
            duration,
        });
    }

    /// Finalises metrics with the total wall-clock time.
    pub(crate) fn finalise(&mut self, total: Duration) {
        self.total_duration = total;
    }

    /// Returns the number of reductions recorded.
    pub fn num_reductions(&self) -> usize {
        self.levels.len()
    }

    /// Returns a human-readable summary suitable for CLI output.
    pub fn summary(&self) -> String {
        let slowest = self
            .levels
            .iter()
            .max_by_key(|l| l.duration)
            .map(|l| format!("{:.3}ms at level {}", l.duration.as_secs_f64() * 1000.0, l.level))
            .unwrap_or_else(|| "n/a".to_string());
        format!(
            "Build: {:.3}ms total, {} reductions, slowest {}",
            self.total_duration.as_secs_f64() * 1000.0,
            self.levels.len(),
            slowest,
        )
    }
}
