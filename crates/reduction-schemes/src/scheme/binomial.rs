// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The binomial scheme: separable smoothing, then subsampling.

use crate::scheme::{Reduced, ReductionScheme};
use crate::{kernel, SchemeError};
use array_core::{convolve_separable_in_place, ops, ArrayView, FloatElement, Layout};
use scratch_pool::{PooledArray, ScratchPool};

/// Linear pyramid scheme using a separable binomial kernel — the discrete
/// analogue of a Gaussian/Laplacian pyramid.
///
/// `reduce` convolves with the order-`n` binomial kernel (the taps of
/// `(1+x)^(n+1)` scaled to sum to one), centered and zero-padded, then
/// takes the all-axes stride-2 window. `expand` zero-fills the target,
/// scatters the source onto the even lattice, and convolves with the same
/// taps scaled by an extra factor of two to compensate for the interleaved
/// zeros.
///
/// Arithmetic runs in the array's own float representation; integer
/// element types are not supported by this scheme. Round-trips through
/// detail pyramids hold up to floating-point rounding, not bit-exactly.
#[derive(Debug, Clone, Copy)]
pub struct BinomialScheme {
    order: usize,
}

impl BinomialScheme {
    /// Creates a scheme of the given order.
    pub fn new(order: usize) -> Self {
        Self { order }
    }

    /// Returns the scheme's order.
    pub fn order(&self) -> usize {
        self.order
    }
}

impl Default for BinomialScheme {
    /// Order 3, the conventional five-tap `[1, 4, 6, 4, 1] / 16` kernel.
    fn default() -> Self {
        Self::new(3)
    }
}

impl<T: FloatElement> ReductionScheme<T> for BinomialScheme {
    fn name(&self) -> &'static str {
        "binomial"
    }

    fn reduce(
        &self,
        mut img: PooledArray<T>,
        pool: &ScratchPool,
    ) -> Result<Reduced<T>, SchemeError> {
        let shape = img.shape().clone();
        let taps = kernel::reduce_taps::<T>(self.order);

        let mut scratch = pool.allocate::<T>(&shape)?;
        convolve_separable_in_place(img.data_mut(), &shape, &taps, scratch.data_mut())?;
        drop(scratch);

        let mut window = Layout::contiguous(&shape);
        for axis in 0..shape.rank() {
            window = window.step_axis(axis, 2);
        }
        Ok(Reduced::new(img, window))
    }

    fn expand(
        &self,
        target: &mut PooledArray<T>,
        source: &ArrayView<'_, T>,
        pool: &ScratchPool,
    ) -> Result<(), SchemeError> {
        let shape = target.shape().clone();
        let mut even = Layout::contiguous(&shape);
        for axis in 0..shape.rank() {
            even = even.step_axis(axis, 2);
        }
        if even.dims() != source.layout().dims() {
            return Err(SchemeError::ExpandShapeMismatch {
                target: shape,
                window: even.shape(),
                src: source.shape(),
            });
        }

        // Upsample with interposed zeros, then smooth.
        target.data_mut().fill(T::zero());
        ops::copy_between(target.data_mut(), &even, source.data(), source.layout())?;

        let taps = kernel::expand_taps::<T>(self.order);
        let mut scratch = pool.allocate::<T>(&shape)?;
        convolve_separable_in_place(target.data_mut(), &shape, &taps, scratch.data_mut())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use array_core::{NdArray, Shape};

    fn reduce_once(data: Vec<f32>, shape: Shape) -> NdArray<f32> {
        let pool = ScratchPool::new();
        let mut work = pool.allocate::<f32>(&shape).unwrap();
        work.data_mut().copy_from_slice(&data);
        let reduced = BinomialScheme::default().reduce(work, &pool).unwrap();
        reduced.materialize()
    }

    #[test]
    fn test_reduce_3x5_reference() {
        let out = reduce_once(
            vec![
                11.0, 10.0, 6.0, 12.0, 3.0, //
                2.0, 15.0, 9.0, 4.0, 5.0, //
                14.0, 7.0, 13.0, 8.0, 1.0, //
            ],
            Shape::matrix(3, 5),
        );
        assert_eq!(out.shape(), &Shape::matrix(2, 3));
        let expected = [
            4.37890625f32,
            5.97265625,
            2.74609375,
            4.6328125,
            6.265625,
            2.3359375,
        ];
        for (got, want) in out.data().iter().zip(expected) {
            assert!((got - want).abs() < 1e-6, "got {got}, want {want}");
        }
    }

    #[test]
    fn test_reduce_constant_field_preserved() {
        // The reduction taps sum to one, so a constant interior stays
        // constant; only zero-padded borders droop.
        let out = reduce_once(vec![8.0; 49], Shape::matrix(7, 7));
        assert_eq!(out.shape(), &Shape::matrix(4, 4));
        // Interior samples (indices 1..3 in each axis) see no border.
        assert!((out.data()[5] - 8.0).abs() < 1e-6);
        assert!((out.data()[6] - 8.0).abs() < 1e-6);
    }

    #[test]
    fn test_expand_scatter_and_smooth_1d() {
        // Source [1] into target of extent 2: even lattice {0} gets 1,
        // then taps [1,4,6,4,1]/8 give out[0] = 6/8, out[1] = 4/8.
        let pool = ScratchPool::new();
        let source = NdArray::from_vec(Shape::vector(1), vec![1.0f32]).unwrap();
        let mut target = pool.allocate::<f32>(&Shape::vector(2)).unwrap();
        BinomialScheme::default()
            .expand(&mut target, &source.view(), &pool)
            .unwrap();
        assert!((target.data()[0] - 0.75).abs() < 1e-6);
        assert!((target.data()[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_expand_shape_contract() {
        let pool = ScratchPool::new();
        let source = NdArray::from_vec(Shape::vector(2), vec![1.0f32, 2.0]).unwrap();
        let mut target = pool.allocate::<f32>(&Shape::vector(5)).unwrap();
        let result = BinomialScheme::default().expand(&mut target, &source.view(), &pool);
        assert!(matches!(
            result,
            Err(SchemeError::ExpandShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_reduce_releases_scratch() {
        let pool = ScratchPool::new();
        let work = pool.allocate::<f64>(&Shape::matrix(4, 4)).unwrap();
        let reduced = BinomialScheme::default().reduce(work, &pool).unwrap();
        assert_eq!(pool.allocated_bytes(), 16 * 8);
        drop(reduced);
        assert_eq!(pool.allocated_bytes(), 0);
    }
}
