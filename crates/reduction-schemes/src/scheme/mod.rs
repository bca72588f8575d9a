// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The [`ReductionScheme`] trait and scheme implementations.

mod adjunction;
mod binomial;
mod sun_maragos;

pub use adjunction::AdjunctionScheme;
pub use binomial::BinomialScheme;
pub use sun_maragos::SunMaragosScheme;

use crate::SchemeError;
use array_core::{ArrayView, Element, FloatElement, Layout, NdArray, Shape};
use scratch_pool::{PooledArray, ScratchPool};

/// The result of a reduce pass: the pooled buffer now holding the reduced
/// data plus the strided window describing where it lives.
///
/// A reduce is free to return a window into its input buffer (the
/// morphological decimations fold in place) or into a different pooled
/// buffer (the Sun–Maragos erosion ping-pong may end on its scratch
/// buffer). Either way the `Reduced` owns every buffer still alive, so
/// dropping it releases them all — the caller copies the window out with
/// [`materialize`](Reduced::materialize) and lets the drop do the rest.
pub struct Reduced<T: Element> {
    buf: PooledArray<T>,
    window: Layout,
}

impl<T: Element> Reduced<T> {
    /// Wraps a pooled buffer and the result window inside it.
    ///
    /// # Panics
    /// Panics if the window addresses positions outside the buffer.
    pub fn new(buf: PooledArray<T>, window: Layout) -> Self {
        assert!(
            window.required_len() <= buf.data().len(),
            "reduced window exceeds its buffer"
        );
        Self { buf, window }
    }

    /// Returns the reduced shape.
    pub fn shape(&self) -> Shape {
        self.window.shape()
    }

    /// Returns the result window.
    pub fn window(&self) -> &Layout {
        &self.window
    }

    /// Returns a borrowed view of the reduced data.
    pub fn view(&self) -> ArrayView<'_, T> {
        ArrayView::from_parts(self.window.clone(), self.buf.data())
    }

    /// Gathers the reduced window into an independently owned array.
    pub fn materialize(&self) -> NdArray<T> {
        self.view().to_owned_array()
    }
}

/// A {reduce, expand} decomposition method.
///
/// `reduce` halves every dimension (rounding up); `expand` approximately
/// inverts it into a caller-sized target. Implementations are purely
/// algorithmic — no I/O — which keeps them trivially unit-testable.
pub trait ReductionScheme<T: Element> {
    /// Human-readable name of this scheme.
    fn name(&self) -> &'static str;

    /// Reduces a pooled working copy. The input is consumed; the result
    /// may alias its buffer or a different pooled one (see [`Reduced`]).
    fn reduce(&self, img: PooledArray<T>, pool: &ScratchPool) -> Result<Reduced<T>, SchemeError>;

    /// Expands `source` into `target`, which the caller has sized to the
    /// finer shape. Writes only into `target`; consumes neither argument.
    ///
    /// Fails with [`SchemeError::ExpandShapeMismatch`] unless the stride-2
    /// window of `target` equals `source`'s shape exactly.
    fn expand(
        &self,
        target: &mut PooledArray<T>,
        source: &ArrayView<'_, T>,
        pool: &ScratchPool,
    ) -> Result<(), SchemeError>;
}

/// The closed set of scheme implementations, for name-based selection in
/// configuration and CLI code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemeKind {
    /// [`AdjunctionScheme`].
    Adjunction,
    /// [`SunMaragosScheme`].
    SunMaragos,
    /// [`BinomialScheme`].
    Binomial,
}

impl SchemeKind {
    /// Parses a scheme name.
    pub fn parse(name: &str) -> Result<Self, SchemeError> {
        match name.trim().to_lowercase().as_str() {
            "adjunction" => Ok(SchemeKind::Adjunction),
            "sun-maragos" | "sunmaragos" | "sun_maragos" => Ok(SchemeKind::SunMaragos),
            "binomial" => Ok(SchemeKind::Binomial),
            other => Err(SchemeError::UnknownScheme {
                name: other.to_string(),
            }),
        }
    }

    /// Returns the canonical name.
    pub fn as_str(self) -> &'static str {
        match self {
            SchemeKind::Adjunction => "adjunction",
            SchemeKind::SunMaragos => "sun-maragos",
            SchemeKind::Binomial => "binomial",
        }
    }

    /// Returns `true` for the morphological (any-dtype, lossless) schemes.
    pub fn is_morphological(self) -> bool {
        matches!(self, SchemeKind::Adjunction | SchemeKind::SunMaragos)
    }

    /// Instantiates a morphological scheme for any element type, or `None`
    /// for [`SchemeKind::Binomial`], which needs a float type.
    pub fn morphological<T: Element>(self) -> Option<Box<dyn ReductionScheme<T>>> {
        match self {
            SchemeKind::Adjunction => Some(Box::new(AdjunctionScheme::new())),
            SchemeKind::SunMaragos => Some(Box::new(SunMaragosScheme::new())),
            SchemeKind::Binomial => None,
        }
    }

    /// Instantiates any scheme for a float element type. `order` applies
    /// to the binomial scheme only.
    pub fn instantiate<T: FloatElement>(self, order: usize) -> Box<dyn ReductionScheme<T>> {
        match self {
            SchemeKind::Adjunction => Box::new(AdjunctionScheme::new()),
            SchemeKind::SunMaragos => Box::new(SunMaragosScheme::new()),
            SchemeKind::Binomial => Box::new(BinomialScheme::new(order)),
        }
    }
}

impl std::fmt::Display for SchemeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
