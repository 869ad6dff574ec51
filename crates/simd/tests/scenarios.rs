//! Concrete end-to-end scenarios
//!
//! Small worked examples with exact expected outputs, one per operation
//! family, plus the compile-time kind predicates.

use solid_simd::{
    shuffle_control, Aligned, Float128, Float256, Int128, Int256, Kind, Mask, RegisterKind,
    SimdError, Vector, I32x4,
};

#[cfg(test)]
mod test_utils;

#[cfg(test)]
use test_utils::*;

#[test]
fn test_float128_addition() {
    let a = Vector::<Float128>::set(1.0, 2.0, 3.0, 4.0);
    let b = Vector::<Float128>::set(10.0, 20.0, 30.0, 40.0);
    assert_eq!((a + b).to_array(), [11.0, 22.0, 33.0, 44.0]);
}

#[test]
fn test_int128_subtraction() {
    let diff = Vector::<Int128>::splat(5) - Vector::<Int128>::splat(3);
    assert_eq!(diff.to_array(), [2; 4]);
}

#[test]
fn test_int128_min() {
    let a = Vector::<Int128>::set(1, 5, 3, 9);
    let b = Vector::<Int128>::set(4, 2, 6, 0);
    assert_eq!(a.min(b).to_array(), [1, 2, 3, 0]);
}

#[test]
fn test_gather_reorders_table() {
    let table = [10.0f32, 20.0, 30.0, 40.0];
    let indices = Vector::<Int128>::set(3, 1, 0, 2);
    let got = Vector::<Float128>::gather_from_slice(&table, indices);
    assert_eq!(got.to_array(), [40.0, 20.0, 10.0, 30.0]);
}

#[test]
fn test_gather_out_of_bounds_is_an_error() {
    let table = [1i32, 2, 3];
    let indices = Vector::<Int128>::set(0, 1, 2, 3);
    match Vector::<Int128>::try_gather_from_slice(&table, indices) {
        Err(SimdError::IndexOutOfBounds { lane, index, len }) => {
            assert_eq!((lane, index, len), (3, 3, 3));
        }
        other => panic!("expected IndexOutOfBounds, got {:?}", other),
    }
}

#[test]
fn test_scatter_then_gather() {
    let mut table = [0i32; 16];
    let indices = Vector::<Int256>::from_fn(|i| (15 - 2 * i) as i32);
    let values = Vector::<Int256>::set(1, 2, 3, 4, 5, 6, 7, 8);
    values.scatter_into_slice(&mut table, indices);
    assert_eq!(table[15], 1);
    assert_eq!(table[1], 8);
    assert_eq!(
        Vector::<Int256>::gather_from_slice(&table, indices).to_array(),
        values.to_array()
    );
}

#[test]
fn test_shift_past_width_clears() {
    let v = Vector::<Int128>::splat(-1);
    assert_eq!((v << 32).to_array(), [0; 4]);
    assert_eq!((v >> 40).to_array(), [0; 4]);
    assert_eq!((v >> 31).to_array(), [1; 4]);
}

#[test]
fn test_kind_predicates_are_constant() {
    const INT_IS_INT: bool = Int256::IS_INTEGER;
    const FLOAT_IS_INT: bool = Float128::IS_INTEGER;
    const WIDE: bool = Float256::IS_256;
    const NARROW: bool = Int128::IS_128;
    assert!(INT_IS_INT);
    assert!(!FLOAT_IS_INT);
    assert!(WIDE);
    assert!(NARROW);
    assert_eq!(Int256::LANES, 8);
    assert_eq!(Float128::ALIGN, 16);
    assert_eq!(Float256::KIND, Kind::Float256);
}

#[test]
fn test_tail_processing_with_first_lanes_mask() {
    let input: Vec<f32> = (1..=11).map(|i| i as f32).collect();
    let mut output = vec![0.0f32; 16];

    let mut offset = 0;
    while offset < input.len() {
        let remaining = input.len() - offset;
        if remaining >= Float256::LANES {
            let v = Vector::<Float256>::from_slice(&input[offset..]);
            (v * Vector::splat(2.0)).write_to_slice(&mut output[offset..]);
        } else {
            let mut padded = [0.0f32; 8];
            padded[..remaining].copy_from_slice(&input[offset..]);
            let mask = Mask::<Float256>::first_lanes(remaining);
            let v = Vector::<Float256>::masked_load_slice(&padded, mask);
            (v * Vector::splat(2.0)).masked_store_slice(&mut output[offset..], mask);
        }
        offset += Float256::LANES;
    }

    for i in 0..11 {
        assert_eq!(output[i], 2.0 * (i + 1) as f32);
    }
    assert!(output[11..].iter().all(|&x| x == 0.0));
}

#[test]
fn test_broadcast_lane_returns_vector() {
    let v = Vector::<Float256>::set(0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0);
    assert_eq!(v.broadcast_lane::<5>().to_array(), [5.0; 8]);
    assert_eq!(v.lane(5), 5.0);
}

#[test]
fn test_shuffle_control_reverses_each_block() {
    const REVERSE: i32 = shuffle_control(3, 2, 1, 0);
    let v = Vector::<Int256>::set(0, 1, 2, 3, 4, 5, 6, 7);
    assert_eq!(v.shuffle::<REVERSE>().to_array(), [3, 2, 1, 0, 7, 6, 5, 4]);
}

#[test]
fn test_horizontal_add_is_pairwise_sum_is_full() {
    let v = Vector::<Float128>::set(1.0, 2.0, 3.0, 4.0);
    assert_eq!(v.horizontal_add(v).to_array(), [3.0, 7.0, 3.0, 7.0]);
    assert_eq!(v.horizontal_sum(), 10.0);
    assert_eq!(v.horizontal_product(), 24.0);
}

#[test]
fn test_dot_product_with_mul_add() {
    let a = Vector::<Float256>::from_fn(|i| i as f32);
    let b = Vector::<Float256>::splat(0.5);
    let dot = a.mul_add(b, Vector::zero()).horizontal_sum();
    assert_approx_eq(dot, 14.0, "dot product");
}

#[test]
fn test_softclip_with_clamp_and_select() {
    let x = Vector::<Float128>::set(-3.0, -0.5, 0.5, f32::NAN);
    let cleaned = Vector::select(x.is_nan(), Vector::zero(), x);
    let clipped = cleaned.clamp(Vector::splat(-1.0), Vector::splat(1.0));
    assert_lanes_approx_eq(clipped, &[-1.0, -0.5, 0.5, 0.0], "softclip");
}

#[test]
fn test_halves_split_and_join() {
    let wide = Vector::<Int256>::set(1, 2, 3, 4, 5, 6, 7, 8);
    let low: I32x4 = wide.low_half();
    let high = wide.high_half();
    assert_eq!(low.to_array(), [1, 2, 3, 4]);
    assert_eq!(high.to_array(), [5, 6, 7, 8]);
    assert_eq!(Vector::<Int256>::from_halves(high, low).to_array(), [5, 6, 7, 8, 1, 2, 3, 4]);
}

#[test]
fn test_bit_reinterpretation() {
    let v = Vector::<Float128>::set(1.0, -0.0, f32::INFINITY, 0.0);
    let bits = v.to_bits();
    assert_eq!(
        bits.to_array(),
        [0x3F80_0000, i32::MIN, 0x7F80_0000, 0]
    );
    let sign_cleared = Vector::<Float128>::from_bits(bits & Vector::splat(i32::MAX));
    assert_eq!(sign_cleared.to_array(), [1.0, 0.0, f32::INFINITY, 0.0]);
}

#[test]
fn test_aligned_buffer_round_trip() {
    let mut buf = Aligned::new([0i32; 8]);
    Vector::<Int256>::from_fn(|i| i as i32 * 3).store(&mut buf);
    assert_eq!(*buf, [0, 3, 6, 9, 12, 15, 18, 21]);
    assert_eq!(
        Vector::<Int256>::load(&buf).horizontal_max(),
        21
    );
}
