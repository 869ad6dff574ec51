//! Test utilities for solid-simd
//!
//! Provides proptest strategies, per-kind lane generators and assertion
//! helpers shared by the integration tests.

#![allow(dead_code)]

use proptest::prelude::*;
use solid_simd::{Float128, Float256, Int128, Int256, RegisterKind, Vector};

/// Relative error tolerance for floating-point comparisons
pub const RELATIVE_ERROR_TOLERANCE: f32 = 1e-5;

/// Absolute error tolerance for floating-point comparisons
pub const ABSOLUTE_ERROR_TOLERANCE: f32 = 1e-6;

// ============================================================================
// Proptest Strategies
// ============================================================================

/// Strategy for generating normal floating-point values
///
/// Generates values in the range [-1000.0, 1000.0] excluding denormals,
/// infinities, and NaN.
pub fn normal_f32() -> impl Strategy<Value = f32> {
    (-1000.0f32..=1000.0f32).prop_filter("not denormal or special", |&x| x.is_normal() || x == 0.0)
}

/// Strategy for generating any floating-point value including special values
pub fn any_f32() -> impl Strategy<Value = f32> {
    prop_oneof![
        normal_f32(),
        Just(0.0f32),
        Just(-0.0f32),
        Just(f32::MAX),
        Just(f32::NAN),
        Just(f32::INFINITY),
        Just(f32::NEG_INFINITY),
    ]
}

pub fn i32x4() -> impl Strategy<Value = [i32; 4]> {
    prop::array::uniform4(any::<i32>())
}

pub fn i32x8() -> impl Strategy<Value = [i32; 8]> {
    prop::array::uniform8(any::<i32>())
}

pub fn f32x4() -> impl Strategy<Value = [f32; 4]> {
    prop::array::uniform4(normal_f32())
}

pub fn f32x8() -> impl Strategy<Value = [f32; 8]> {
    prop::array::uniform8(normal_f32())
}

/// Any bit pattern, NaNs included
pub fn f32x8_bits() -> impl Strategy<Value = [f32; 8]> {
    prop::array::uniform8(any::<u32>().prop_map(f32::from_bits))
}

/// Lane mask bits for a kind
pub fn mask_bits() -> impl Strategy<Value = u32> {
    0u32..=0xFF
}

pub fn int128(lanes: [i32; 4]) -> Vector<Int128> {
    Vector::from_array(lanes)
}

pub fn int256(lanes: [i32; 8]) -> Vector<Int256> {
    Vector::from_array(lanes)
}

pub fn float128(lanes: [f32; 4]) -> Vector<Float128> {
    Vector::from_array(lanes)
}

pub fn float256(lanes: [f32; 8]) -> Vector<Float256> {
    Vector::from_array(lanes)
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert that two floating-point values are approximately equal
///
/// Uses both relative and absolute error tolerance to handle different
/// magnitude ranges.
pub fn assert_approx_eq(actual: f32, expected: f32, context: &str) {
    if expected.is_nan() {
        assert!(actual.is_nan(), "{}: expected NaN, got {}", context, actual);
        return;
    }

    let abs_diff = (actual - expected).abs();
    let abs_expected = expected.abs();
    let relative_error = if abs_expected > 0.0 {
        abs_diff / abs_expected
    } else {
        abs_diff
    };

    assert!(
        abs_diff <= ABSOLUTE_ERROR_TOLERANCE || relative_error <= RELATIVE_ERROR_TOLERANCE,
        "{}: values not approximately equal. Expected: {}, Actual: {}, Abs diff: {:.2e}, Rel error: {:.2e}",
        context,
        expected,
        actual,
        abs_diff,
        relative_error
    );
}

/// Assert that every lane of a float vector matches `expected` approximately
pub fn assert_lanes_approx_eq<K>(vector: Vector<K>, expected: &[f32], context: &str)
where
    K: RegisterKind<Lane = f32>,
{
    assert_eq!(
        expected.len(),
        K::LANES,
        "{}: expected array length must match vector lanes",
        context
    );

    let actual = vector.to_array();
    for (i, (&actual_val, &expected_val)) in actual.as_ref().iter().zip(expected).enumerate() {
        assert_approx_eq(actual_val, expected_val, &format!("{} (lane {})", context, i));
    }
}

/// Assert two vectors hold the same bit pattern in every lane
///
/// Compares raw bits so NaN lanes and signed zeros are checked exactly.
pub fn assert_bits_eq<K: RegisterKind>(actual: Vector<K>, expected: Vector<K>, context: &str) {
    assert_eq!(
        actual.to_bits().to_array(),
        expected.to_bits().to_array(),
        "{}: bit patterns differ",
        context
    );
}
