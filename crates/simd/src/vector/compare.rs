//! Lane comparisons and selection
//!
//! Only `==` and `<` are native. The remaining predicates are composed from
//! them as `ne = !eq`, `le = lt | eq`, `gt = !le` and `ge = !lt`. For float
//! lanes this gives `gt`/`ge` the "not less-or-equal" / "not less-than"
//! semantics of the hardware: a NaN lane compares false for `eq`, `lt` and
//! `le` and true for `ne`, `gt` and `ge`.

use super::Vector;
use crate::kind::{FloatKind, RegisterKind};
use crate::mask::Mask;

impl<K: RegisterKind> Vector<K> {
    /// Lanes where `self == other`; false for NaN
    #[inline(always)]
    pub fn simd_eq(self, other: Self) -> Mask<K> {
        Mask::from_register(K::cmp_eq(self.0, other.0))
    }

    /// Lanes where `self != other`; true for NaN
    #[inline(always)]
    pub fn simd_ne(self, other: Self) -> Mask<K> {
        !self.simd_eq(other)
    }

    /// Lanes where `self < other` (signed for integers)
    #[inline(always)]
    pub fn simd_lt(self, other: Self) -> Mask<K> {
        Mask::from_register(K::cmp_lt(self.0, other.0))
    }

    /// Lanes where `self <= other`
    #[inline(always)]
    pub fn simd_le(self, other: Self) -> Mask<K> {
        self.simd_lt(other) | self.simd_eq(other)
    }

    /// Lanes where `self > other`; true for NaN
    #[inline(always)]
    pub fn simd_gt(self, other: Self) -> Mask<K> {
        !self.simd_le(other)
    }

    /// Lanes where `self >= other`; true for NaN
    #[inline(always)]
    pub fn simd_ge(self, other: Self) -> Mask<K> {
        !self.simd_lt(other)
    }

    /// Lanes of `if_true` where `mask` is set, `if_false` elsewhere
    #[inline(always)]
    pub fn select(mask: Mask<K>, if_true: Self, if_false: Self) -> Self {
        mask.select(if_true, if_false)
    }
}

impl<K: FloatKind> Vector<K> {
    /// Lanes holding NaN
    #[inline(always)]
    pub fn is_nan(self) -> Mask<K> {
        self.simd_ne(self)
    }
}
