//! Rounding, float→int conversion and square-root family (float kinds only)

use super::Vector;
use crate::kind::FloatKind;

impl<K: FloatKind> Vector<K> {
    /// Round toward negative infinity
    #[inline(always)]
    pub fn floor(self) -> Self {
        Self(K::floor(self.0))
    }

    /// Round toward positive infinity
    #[inline(always)]
    pub fn ceil(self) -> Self {
        Self(K::ceil(self.0))
    }

    /// Round toward zero, keeping float lanes
    #[inline(always)]
    pub fn truncate(self) -> Self {
        Self(K::truncate(self.0))
    }

    /// Round to nearest, ties to even
    #[inline(always)]
    pub fn round(self) -> Self {
        Self(K::round_even(self.0))
    }

    /// Same as [`floor`](Self::floor)
    #[inline(always)]
    pub fn round_to_negative_infinity(self) -> Self {
        self.floor()
    }

    /// Same as [`ceil`](Self::ceil)
    #[inline(always)]
    pub fn round_to_positive_infinity(self) -> Self {
        self.ceil()
    }

    /// Convert to integer lanes, rounding to nearest with ties to even
    ///
    /// NaN and lanes outside the `i32` range become `i32::MIN`.
    #[inline(always)]
    pub fn round_to_nearest_integer(self) -> Vector<K::Int> {
        Vector::from_raw(K::to_int_nearest(self.0))
    }

    /// Convert to integer lanes, truncating toward zero
    ///
    /// NaN and lanes outside the `i32` range become `i32::MIN`.
    #[inline(always)]
    pub fn round_to_zero(self) -> Vector<K::Int> {
        Vector::from_raw(K::to_int_truncate(self.0))
    }

    /// Correctly rounded square root
    #[inline(always)]
    pub fn sqrt(self) -> Self {
        Self(K::sqrt(self.0))
    }

    /// Approximate `1 / x`, relative error at most 1.5 × 2⁻¹²
    #[inline(always)]
    pub fn reciprocal(self) -> Self {
        Self(K::reciprocal(self.0))
    }

    /// Approximate `1 / sqrt(x)`, relative error at most 1.5 × 2⁻¹²
    #[inline(always)]
    pub fn reciprocal_sqrt(self) -> Self {
        Self(K::reciprocal_sqrt(self.0))
    }

    /// Fused `self * b + c` with a single rounding
    #[inline(always)]
    pub fn mul_add(self, b: Self, c: Self) -> Self {
        Self(K::mul_add(self.0, b.0, c.0))
    }
}

#[cfg(test)]
mod tests {
    use crate::kind::{Float128, Float256};
    use crate::vector::Vector;

    fn rel_err(actual: f32, expected: f32) -> f32 {
        libm::fabsf((actual - expected) / expected)
    }

    #[test]
    fn test_rounding_modes() {
        let v = Vector::<Float256>::set(-2.5, -1.5, -0.5, 0.5, 1.5, 2.5, 2.7, -2.7);
        assert_eq!(
            v.floor().to_array(),
            [-3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 2.0, -3.0]
        );
        assert_eq!(
            v.ceil().to_array(),
            [-2.0, -1.0, -0.0, 1.0, 2.0, 3.0, 3.0, -2.0]
        );
        assert_eq!(
            v.truncate().to_array(),
            [-2.0, -1.0, -0.0, 0.0, 1.0, 2.0, 2.0, -2.0]
        );
        assert_eq!(
            v.round().to_array(),
            [-2.0, -2.0, -0.0, 0.0, 2.0, 2.0, 3.0, -3.0]
        );
        assert_eq!(v.round_to_negative_infinity().to_array(), v.floor().to_array());
        assert_eq!(v.round_to_positive_infinity().to_array(), v.ceil().to_array());
    }

    #[test]
    fn test_float_to_int() {
        let v = Vector::<Float128>::set(2.5, -3.5, 1.9, -1.9);
        assert_eq!(v.round_to_nearest_integer().to_array(), [2, -4, 2, -2]);
        assert_eq!(v.round_to_zero().to_array(), [2, -3, 1, -1]);
    }

    #[test]
    fn test_float_to_int_out_of_range() {
        let v = Vector::<Float128>::set(f32::NAN, 3.0e9, -3.0e9, f32::INFINITY);
        assert_eq!(v.round_to_nearest_integer().to_array(), [i32::MIN; 4]);
        assert_eq!(v.round_to_zero().to_array(), [i32::MIN; 4]);
    }

    #[test]
    fn test_sqrt_family() {
        let v = Vector::<Float128>::set(1.0, 4.0, 9.0, 0.25);
        assert_eq!(v.sqrt().to_array(), [1.0, 2.0, 3.0, 0.5]);

        let recip = v.reciprocal().to_array();
        let rsqrt = v.reciprocal_sqrt().to_array();
        let bound = 1.5 / 4096.0;
        for (i, x) in [1.0f32, 4.0, 9.0, 0.25].into_iter().enumerate() {
            assert!(rel_err(recip[i], 1.0 / x) <= bound);
            assert!(rel_err(rsqrt[i], 1.0 / libm::sqrtf(x)) <= bound);
        }
    }

    #[test]
    fn test_mul_add() {
        let a = Vector::<Float256>::splat(2.0);
        let b = Vector::<Float256>::splat(3.0);
        let c = Vector::<Float256>::splat(1.0);
        assert_eq!(a.mul_add(b, c).to_array(), [7.0; 8]);
    }
}
