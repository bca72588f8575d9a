// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Owned arrays and borrowed windows.

use crate::{ArrayError, DType, Element, Layout, Shape};

/// An owned, contiguous n-dimensional array.
///
/// Data is stored in row-major (C) order. Borrowed, possibly strided
/// windows are exposed via [`ArrayView`].
#[derive(Debug, Clone, PartialEq)]
pub struct NdArray<T: Element> {
    shape: Shape,
    data: Vec<T>,
}

impl<T: Element> NdArray<T> {
    /// Creates a new array filled with zeros.
    pub fn zeros(shape: Shape) -> Self {
        let len = shape.num_elements();
        Self {
            shape,
            data: vec![T::zero(); len],
        }
    }

    /// Creates an array from a flat row-major buffer.
    ///
    /// Returns an error if the buffer length does not match
    /// `shape.num_elements()`.
    pub fn from_vec(shape: Shape, data: Vec<T>) -> Result<Self, ArrayError> {
        let expected = shape.num_elements();
        if data.len() != expected {
            return Err(ArrayError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Returns the array's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the array's data type.
    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    /// Returns the flat row-major data.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Returns the flat row-major data mutably.
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Returns the canonical contiguous window over this array.
    pub fn layout(&self) -> Layout {
        Layout::contiguous(&self.shape)
    }

    /// Returns a borrowed view over the whole array.
    pub fn view(&self) -> ArrayView<'_, T> {
        ArrayView {
            layout: self.layout(),
            data: &self.data,
        }
    }
}

/// A borrowed, possibly strided window over a flat buffer.
///
/// Views are zero-copy: a view is a restriction of the backing storage, not
/// a copy of it, and is tied to the buffer's lifetime by the borrow checker.
#[derive(Debug, Clone)]
pub struct ArrayView<'a, T: Element> {
    layout: Layout,
    data: &'a [T],
}

impl<'a, T: Element> ArrayView<'a, T> {
    /// Creates a view from a window descriptor and its backing buffer.
    ///
    /// # Panics
    /// Panics if the window addresses positions beyond the buffer's end.
    pub fn from_parts(layout: Layout, data: &'a [T]) -> Self {
        assert!(
            layout.required_len() <= data.len(),
            "window requires {} elements, buffer has {}",
            layout.required_len(),
            data.len()
        );
        Self { layout, data }
    }

    /// Returns the view's extents as an owned [`Shape`].
    pub fn shape(&self) -> Shape {
        self.layout.shape()
    }

    /// Returns the view's data type.
    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    /// Returns the window descriptor.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Returns the backing buffer (the full slice, not just the window).
    pub fn data(&self) -> &'a [T] {
        self.data
    }

    /// Iterates the viewed elements in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.layout.flat_offsets().map(move |off| self.data[off])
    }

    /// Gathers the window into a fresh owned array.
    pub fn to_owned_array(&self) -> NdArray<T> {
        let shape = self.layout.shape();
        let data: Vec<T> = self.iter().collect();
        NdArray { shape, data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let a: NdArray<f32> = NdArray::zeros(Shape::matrix(2, 3));
        assert_eq!(a.shape(), &Shape::matrix(2, 3));
        assert_eq!(a.dtype(), DType::F32);
        assert!(a.data().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_from_vec_size_mismatch() {
        let result = NdArray::from_vec(Shape::matrix(2, 3), vec![0u8; 5]);
        assert!(matches!(
            result,
            Err(ArrayError::BufferSizeMismatch {
                expected: 6,
                actual: 5
            })
        ));
    }

    #[test]
    fn test_view_iter_strided() {
        let a = NdArray::from_vec(Shape::matrix(2, 4), vec![0i32, 1, 2, 3, 4, 5, 6, 7]).unwrap();
        let even_cols = ArrayView::from_parts(a.layout().step_axis(1, 2), a.data());
        assert_eq!(even_cols.shape(), Shape::matrix(2, 2));
        assert_eq!(even_cols.iter().collect::<Vec<_>>(), vec![0, 2, 4, 6]);
    }

    #[test]
    fn test_to_owned_array_gathers() {
        let a = NdArray::from_vec(Shape::vector(5), vec![10u8, 11, 12, 13, 14]).unwrap();
        let odd = ArrayView::from_parts(a.layout().slice_from(0, 1).step_axis(0, 2), a.data());
        let owned = odd.to_owned_array();
        assert_eq!(owned.shape(), &Shape::vector(2));
        assert_eq!(owned.data(), &[11, 13]);
    }

    #[test]
    #[should_panic(expected = "window requires")]
    fn test_view_out_of_bounds_panics() {
        let data = vec![0f32; 4];
        let _ = ArrayView::from_parts(Layout::contiguous(&Shape::vector(5)), &data);
    }
}
