// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Integration tests: pyramid construction, detail decomposition, and
//! reconstruction across all three schemes.
//!
//! The concrete level values are known-answer vectors computed with the
//! simple clamped/zero-padded boundary handling the schemes implement;
//! they are exact, so they double as regression anchors.

use array_core::{Element, NdArray, Shape};
use pyramid::{build_detail_pyramid, build_pyramid, reconstruct, Pyramid};
use reduction_schemes::{
    AdjunctionScheme, BinomialScheme, ReductionScheme, SunMaragosScheme,
};
use scratch_pool::ScratchPool;

fn sample_3x5_i32() -> NdArray<i32> {
    NdArray::from_vec(
        Shape::matrix(3, 5),
        vec![11, 10, 6, 12, 3, 2, 15, 9, 4, 5, 14, 7, 13, 8, 1],
    )
    .unwrap()
}

fn sample_3x5_f32() -> NdArray<f32> {
    NdArray::from_vec(
        Shape::matrix(3, 5),
        sample_3x5_i32().data().iter().map(|&v| v as f32).collect(),
    )
    .unwrap()
}

fn assert_levels_eq<T: Element>(pyramid: &Pyramid<T>, expected: &[(Shape, Vec<T>)]) {
    assert_eq!(pyramid.num_levels(), expected.len(), "number of levels");
    for (i, (shape, data)) in expected.iter().enumerate() {
        let level = pyramid.level(i).expect("level present");
        assert_eq!(level.shape(), shape, "shape of level {i}");
        assert_eq!(level.data(), data.as_slice(), "data of level {i}");
    }
}

fn max_abs_diff<T: Element>(a: &NdArray<T>, b: &NdArray<T>) -> f64 {
    a.data()
        .iter()
        .zip(b.data())
        .map(|(&x, &y)| (x.to_f64() - y.to_f64()).abs())
        .fold(0.0, f64::max)
}

// ── Approximation pyramids ─────────────────────────────────────

#[test]
fn adjunction_pyramid_1d() {
    let pool = ScratchPool::new();
    let src = NdArray::from_vec(Shape::vector(6), vec![1i32, 2, 3, 4, 5, 6]).unwrap();
    let p = build_pyramid(&src, &AdjunctionScheme::new(), &pool, None).unwrap();
    assert_levels_eq(
        &p,
        &[
            (Shape::vector(6), vec![1, 2, 3, 4, 5, 6]),
            (Shape::vector(3), vec![1, 3, 5]),
            (Shape::vector(2), vec![1, 5]),
            (Shape::vector(1), vec![1]),
        ],
    );
}

#[test]
fn adjunction_pyramid_3x5() {
    let pool = ScratchPool::new();
    let src = sample_3x5_i32();
    let p = build_pyramid(&src, &AdjunctionScheme::new(), &pool, None).unwrap();
    assert_levels_eq(
        &p,
        &[
            (Shape::matrix(3, 5), src.data().to_vec()),
            (Shape::matrix(2, 3), vec![2, 4, 3, 7, 8, 1]),
            (Shape::matrix(1, 2), vec![2, 1]),
            (Shape::matrix(1, 1), vec![1]),
        ],
    );
}

#[test]
fn sun_maragos_pyramid_3x5() {
    let pool = ScratchPool::new();
    let src = sample_3x5_i32();
    let p = build_pyramid(&src, &SunMaragosScheme::new(), &pool, None).unwrap();
    assert_levels_eq(
        &p,
        &[
            (Shape::matrix(3, 5), src.data().to_vec()),
            (Shape::matrix(2, 3), vec![11, 6, 3, 2, 7, 1]),
            (Shape::matrix(1, 2), vec![11, 3]),
            (Shape::matrix(1, 1), vec![11]),
        ],
    );
}

#[test]
fn binomial_pyramid_3x5() {
    let pool = ScratchPool::new();
    let p = build_pyramid(&sample_3x5_f32(), &BinomialScheme::default(), &pool, None).unwrap();

    assert_eq!(p.num_levels(), 4);
    let expected_l1 = [
        4.37890625f64,
        5.97265625,
        2.74609375,
        4.6328125,
        6.265625,
        2.3359375,
    ];
    let expected_l2 = [2.102508544921875f64, 1.731719970703125];
    let expected_l3 = [0.45801401138305664f64];

    let check = |level: &NdArray<f32>, expected: &[f64]| {
        for (got, want) in level.data().iter().zip(expected) {
            assert!(
                (got.to_f64() - want).abs() < 1e-6,
                "got {got}, want {want}"
            );
        }
    };
    assert_eq!(p.level(1).unwrap().shape(), &Shape::matrix(2, 3));
    check(p.level(1).unwrap(), &expected_l1);
    assert_eq!(p.level(2).unwrap().shape(), &Shape::matrix(1, 2));
    check(p.level(2).unwrap(), &expected_l2);
    assert_eq!(p.level(3).unwrap().shape(), &Shape::matrix(1, 1));
    check(p.level(3).unwrap(), &expected_l3);
}

// ── Shape and termination properties ───────────────────────────

#[test]
fn shape_halving_invariant() {
    let pool = ScratchPool::new();
    let src: NdArray<u16> = NdArray::from_vec(
        Shape::new(vec![5, 3, 7]),
        (0..105).map(|v| (v * 37 % 251) as u16).collect(),
    )
    .unwrap();
    let p = build_pyramid(&src, &AdjunctionScheme::new(), &pool, None).unwrap();
    for i in 0..p.num_levels() - 1 {
        assert_eq!(
            p.level(i + 1).unwrap().shape(),
            &p.level(i).unwrap().shape().halved(),
            "level {i} → {}",
            i + 1
        );
    }
    assert!(p.coarsest().unwrap().shape().is_unit());
}

#[test]
fn termination_on_awkward_extents() {
    let pool = ScratchPool::new();
    for dims in [vec![1usize], vec![17], vec![1, 9], vec![2, 1, 5]] {
        let shape = Shape::new(dims);
        let src: NdArray<i32> =
            NdArray::from_vec(shape.clone(), (0..shape.num_elements() as i32).collect()).unwrap();
        let p = build_pyramid(&src, &AdjunctionScheme::new(), &pool, None).unwrap();
        assert!(p.coarsest().unwrap().shape().is_unit(), "shape {shape}");
    }
}

// ── Detail pyramids and round-trips ────────────────────────────

#[test]
fn adjunction_detail_pyramid_3x5() {
    let pool = ScratchPool::new();
    let src = sample_3x5_i32();
    let d = build_detail_pyramid(&src, &AdjunctionScheme::new(), &pool, None).unwrap();
    let p = build_pyramid(&src, &AdjunctionScheme::new(), &pool, None).unwrap();

    assert_eq!(d.num_levels(), p.num_levels());
    assert_eq!(
        d.level(0).unwrap().data(),
        &[9, 8, 2, 8, 0, 0, 13, 5, 0, 2, 7, 0, 5, 0, 0]
    );
    assert_eq!(d.coarsest().unwrap(), p.coarsest().unwrap());
}

#[test]
fn adjunction_roundtrip_exact() {
    let pool = ScratchPool::new();
    let src = sample_3x5_i32();
    let scheme = AdjunctionScheme::new();
    let mut d = build_detail_pyramid(&src, &scheme, &pool, None).unwrap();
    reconstruct(&mut d, &scheme, &pool).unwrap();

    let p = build_pyramid(&src, &scheme, &pool, None).unwrap();
    assert_eq!(d.levels(), p.levels());
}

#[test]
fn sun_maragos_roundtrip_exact() {
    let pool = ScratchPool::new();
    let src = sample_3x5_i32();
    let scheme = SunMaragosScheme::new();
    let mut d = build_detail_pyramid(&src, &scheme, &pool, None).unwrap();
    reconstruct(&mut d, &scheme, &pool).unwrap();

    let p = build_pyramid(&src, &scheme, &pool, None).unwrap();
    assert_eq!(d.levels(), p.levels());
}

#[test]
fn adjunction_roundtrip_exact_3d() {
    let pool = ScratchPool::new();
    // Deterministic pseudo-random contents over an odd-everywhere shape.
    let shape = Shape::new(vec![3, 4, 5]);
    let data: Vec<i32> = (0..60).map(|v| (v * 7919 + 13) % 100).collect();
    let src = NdArray::from_vec(shape, data).unwrap();

    let scheme = AdjunctionScheme::new();
    let mut d = build_detail_pyramid(&src, &scheme, &pool, None).unwrap();
    reconstruct(&mut d, &scheme, &pool).unwrap();

    let p = build_pyramid(&src, &scheme, &pool, None).unwrap();
    assert_eq!(d.levels(), p.levels());
}

#[test]
fn binomial_roundtrip_within_tolerance() {
    let pool = ScratchPool::new();
    let src = sample_3x5_f32();
    let scheme = BinomialScheme::default();
    let mut d = build_detail_pyramid(&src, &scheme, &pool, None).unwrap();
    reconstruct(&mut d, &scheme, &pool).unwrap();

    let p = build_pyramid(&src, &scheme, &pool, None).unwrap();
    assert_eq!(d.num_levels(), p.num_levels());
    for (a, b) in d.levels().iter().zip(p.levels()) {
        assert!(max_abs_diff(a, b) < 1e-6);
    }
}

#[test]
fn binomial_f64_roundtrip_within_tolerance() {
    let pool = ScratchPool::new();
    let src = NdArray::from_vec(
        Shape::matrix(4, 4),
        (0..16).map(|v| (v as f64).sin() * 50.0).collect(),
    )
    .unwrap();
    let scheme = BinomialScheme::default();
    let mut d = build_detail_pyramid(&src, &scheme, &pool, None).unwrap();
    reconstruct(&mut d, &scheme, &pool).unwrap();

    let p = build_pyramid(&src, &scheme, &pool, None).unwrap();
    for (a, b) in d.levels().iter().zip(p.levels()) {
        assert!(max_abs_diff(a, b) < 1e-6);
    }
}

// ── Caps and resource discipline ───────────────────────────────

#[test]
fn detail_respects_level_cap() {
    let pool = ScratchPool::new();
    let src = sample_3x5_i32();
    let d = build_detail_pyramid(&src, &AdjunctionScheme::new(), &pool, Some(1)).unwrap();
    assert_eq!(d.num_levels(), 2);
    // Coarsest is the level-1 approximation, not a residual.
    assert_eq!(d.coarsest().unwrap().data(), &[2, 4, 3, 7, 8, 1]);
}

#[test]
fn pool_is_drained_after_full_workflow() {
    let pool = ScratchPool::new();
    let src = sample_3x5_f32();
    for scheme in [
        Box::new(BinomialScheme::default()) as Box<dyn ReductionScheme<f32>>,
        Box::new(AdjunctionScheme::new()),
        Box::new(SunMaragosScheme::new()),
    ] {
        let mut d = build_detail_pyramid(&src, scheme.as_ref(), &pool, None).unwrap();
        reconstruct(&mut d, scheme.as_ref(), &pool).unwrap();
    }
    assert_eq!(pool.allocated_bytes(), 0);
    // The level loop re-checks out the same shapes; most come from cache.
    assert!(pool.stats().cache_hit_ratio() > 0.5);
}
