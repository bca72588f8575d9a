// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Binomial kernel construction.
//!
//! An order-`n` binomial scheme smooths with the coefficients of
//! `(1 + x)^(n+1)`, normalized to sum to one for reduction. The expansion
//! kernel is the same tap vector scaled by an extra factor of two, which
//! compensates for the energy lost to the zeros interleaved during
//! upsampling.

use array_core::FloatElement;

/// Coefficients of `(1 + x)^n`: row `n` of Pascal's triangle (`n + 1`
/// entries).
pub fn binomial_coefficients(n: usize) -> Vec<u64> {
    let mut row = vec![1u64];
    for _ in 0..n {
        let mut next = Vec::with_capacity(row.len() + 1);
        next.push(1);
        for pair in row.windows(2) {
            next.push(pair[0] + pair[1]);
        }
        next.push(1);
        row = next;
    }
    row
}

/// The 1-D reduction taps for an order-`order` binomial scheme:
/// `binomial_coefficients(order + 1)` scaled by `2^-(order+1)` so the taps
/// sum to one.
pub fn reduce_taps<T: FloatElement>(order: usize) -> Vec<T> {
    scaled_taps(order, -(order as i32) - 1)
}

/// The 1-D expansion taps: scaled by `2^-order`, a factor of two above the
/// reduction taps.
pub fn expand_taps<T: FloatElement>(order: usize) -> Vec<T> {
    scaled_taps(order, -(order as i32))
}

fn scaled_taps<T: FloatElement>(order: usize, exponent: i32) -> Vec<T> {
    let scale = 2f64.powi(exponent);
    binomial_coefficients(order + 1)
        .into_iter()
        .map(|c| T::from_f64(c as f64 * scale))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal_rows() {
        assert_eq!(binomial_coefficients(0), vec![1]);
        assert_eq!(binomial_coefficients(1), vec![1, 1]);
        assert_eq!(binomial_coefficients(4), vec![1, 4, 6, 4, 1]);
        assert_eq!(binomial_coefficients(6), vec![1, 6, 15, 20, 15, 6, 1]);
    }

    #[test]
    fn test_reduce_taps_order_3() {
        let taps: Vec<f64> = reduce_taps(3);
        assert_eq!(
            taps,
            vec![1.0 / 16.0, 4.0 / 16.0, 6.0 / 16.0, 4.0 / 16.0, 1.0 / 16.0]
        );
        assert!((taps.iter().sum::<f64>() - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_expand_taps_double_reduce_taps() {
        let reduce: Vec<f64> = reduce_taps(3);
        let expand: Vec<f64> = expand_taps(3);
        for (r, e) in reduce.iter().zip(&expand) {
            assert_eq!(e, &(r * 2.0));
        }
    }
}
