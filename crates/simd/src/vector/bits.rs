//! Per-lane bit counting (integer kinds only)
//!
//! There is no native 32-bit popcount or lzcnt for these registers below
//! AVX-512, so everything is built from shifts, masks and one multiply.

use super::Vector;
use crate::kind::IntegerKind;

impl<K: IntegerKind> Vector<K> {
    /// Number of set bits in each lane
    #[inline(always)]
    pub fn pop_count(self) -> Self {
        let m1 = Self::splat(0x5555_5555);
        let m2 = Self::splat(0x3333_3333);
        let m4 = Self::splat(0x0F0F_0F0F);
        let h01 = Self::splat(0x0101_0101);

        let mut v = self - ((self >> 1) & m1);
        v = (v & m2) + ((v >> 2) & m2);
        v = (v + (v >> 4)) & m4;
        (v * h01) >> 24
    }

    /// Leading zero bits in each lane; 32 for a zero lane
    #[inline(always)]
    pub fn count_leading_zeros(self) -> Self {
        let mut v = self;
        v = v | (v >> 1);
        v = v | (v >> 2);
        v = v | (v >> 4);
        v = v | (v >> 8);
        v = v | (v >> 16);
        Self::splat(32) - v.pop_count()
    }

    /// Trailing zero bits in each lane; 32 for a zero lane
    #[inline(always)]
    pub fn count_trailing_zeros(self) -> Self {
        let lowest = self & -self;
        (lowest - Self::one()).pop_count()
    }

    /// Redundant sign bits in each lane, not counting the sign bit itself
    ///
    /// 0 and -1 give 31; `i32::MIN` and `i32::MAX` give 0.
    #[inline(always)]
    pub fn count_leading_sign_bits(self) -> Self {
        let negative = self.simd_lt(Self::zero());
        let folded = negative.select(!self, self);
        folded.count_leading_zeros() - Self::one()
    }

    /// Lane-wise sum of the population counts of `self` and `other`
    #[inline(always)]
    pub fn pop_count_pair(self, other: Self) -> Self {
        self.pop_count() + other.pop_count()
    }

    /// Lane-wise sum of the leading-zero counts of `self` and `other`
    #[inline(always)]
    pub fn count_leading_zeros_pair(self, other: Self) -> Self {
        self.count_leading_zeros() + other.count_leading_zeros()
    }

    /// Set bits across the whole register
    #[inline(always)]
    pub fn pop_count_total(self) -> u32 {
        self.pop_count().horizontal_sum() as u32
    }
}
