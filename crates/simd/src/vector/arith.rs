//! Arithmetic, bitwise and shift operators; min/max/abs

use core::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Neg, Not, Shl, ShlAssign, Shr, ShrAssign, Sub, SubAssign,
};

use super::Vector;
use crate::kind::{FloatKind, IntegerKind, RegisterKind};

macro_rules! impl_binop {
    ($bound:ident, $trait:ident, $method:ident, $assign:ident, $assign_method:ident, $prim:ident) => {
        impl<K: $bound> $trait for Vector<K> {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: Self) -> Self {
                Self(K::$prim(self.0, rhs.0))
            }
        }

        impl<K: $bound> $assign for Vector<K> {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: Self) {
                self.0 = K::$prim(self.0, rhs.0);
            }
        }
    };
}

// Integer lanes wrap on overflow
impl_binop!(RegisterKind, Add, add, AddAssign, add_assign, add);
impl_binop!(RegisterKind, Sub, sub, SubAssign, sub_assign, sub);
impl_binop!(RegisterKind, Mul, mul, MulAssign, mul_assign, mul);
impl_binop!(FloatKind, Div, div, DivAssign, div_assign, div);
impl_binop!(IntegerKind, BitAnd, bitand, BitAndAssign, bitand_assign, and);
impl_binop!(IntegerKind, BitOr, bitor, BitOrAssign, bitor_assign, or);
impl_binop!(IntegerKind, BitXor, bitxor, BitXorAssign, bitxor_assign, xor);

impl<K: RegisterKind> Neg for Vector<K> {
    type Output = Self;

    /// Floats flip the sign bit, integers negate with wrapping
    #[inline(always)]
    fn neg(self) -> Self {
        Self(K::neg(self.0))
    }
}

impl<K: IntegerKind> Not for Vector<K> {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        Self(K::xor(self.0, K::all_ones()))
    }
}

// Logical shifts. A count of 32 or more clears the lane, exactly as the
// hardware shift instructions do; the count is never reduced modulo 32.

impl<K: IntegerKind> Shl<u32> for Vector<K> {
    type Output = Self;

    #[inline(always)]
    fn shl(self, count: u32) -> Self {
        Self(K::shl(self.0, count))
    }
}

impl<K: IntegerKind> Shr<u32> for Vector<K> {
    type Output = Self;

    #[inline(always)]
    fn shr(self, count: u32) -> Self {
        Self(K::shr(self.0, count))
    }
}

impl<K: IntegerKind> Shl for Vector<K> {
    type Output = Self;

    /// Per-lane counts, read as unsigned
    #[inline(always)]
    fn shl(self, counts: Self) -> Self {
        Self(K::shl_lanes(self.0, counts.0))
    }
}

impl<K: IntegerKind> Shr for Vector<K> {
    type Output = Self;

    /// Per-lane counts, read as unsigned
    #[inline(always)]
    fn shr(self, counts: Self) -> Self {
        Self(K::shr_lanes(self.0, counts.0))
    }
}

impl<K: IntegerKind> ShlAssign<u32> for Vector<K> {
    #[inline(always)]
    fn shl_assign(&mut self, count: u32) {
        *self = *self << count;
    }
}

impl<K: IntegerKind> ShrAssign<u32> for Vector<K> {
    #[inline(always)]
    fn shr_assign(&mut self, count: u32) {
        *self = *self >> count;
    }
}

impl<K: IntegerKind> ShlAssign for Vector<K> {
    #[inline(always)]
    fn shl_assign(&mut self, counts: Self) {
        *self = *self << counts;
    }
}

impl<K: IntegerKind> ShrAssign for Vector<K> {
    #[inline(always)]
    fn shr_assign(&mut self, counts: Self) {
        *self = *self >> counts;
    }
}

impl<K: IntegerKind> Vector<K> {
    /// `!self & rhs` in one instruction
    #[inline(always)]
    pub fn and_not(self, rhs: Self) -> Self {
        Self(K::andnot(self.0, rhs.0))
    }
}

impl<K: RegisterKind> Vector<K> {
    /// Lane-wise minimum
    ///
    /// Float lanes follow `minps`: if either input is NaN the lane from
    /// `other` is returned.
    #[inline(always)]
    pub fn min(self, other: Self) -> Self {
        Self(K::min(self.0, other.0))
    }

    /// Lane-wise maximum, NaN handling as in [`min`](Self::min)
    #[inline(always)]
    pub fn max(self, other: Self) -> Self {
        Self(K::max(self.0, other.0))
    }

    /// Lane-wise minimum of three vectors, folded left to right
    #[inline(always)]
    pub fn min3(self, b: Self, c: Self) -> Self {
        self.min(b).min(c)
    }

    /// Lane-wise minimum of four vectors, folded left to right
    #[inline(always)]
    pub fn min4(self, b: Self, c: Self, d: Self) -> Self {
        self.min(b).min(c).min(d)
    }

    /// Lane-wise maximum of three vectors, folded left to right
    #[inline(always)]
    pub fn max3(self, b: Self, c: Self) -> Self {
        self.max(b).max(c)
    }

    /// Lane-wise maximum of four vectors, folded left to right
    #[inline(always)]
    pub fn max4(self, b: Self, c: Self, d: Self) -> Self {
        self.max(b).max(c).max(d)
    }

    /// Lane-wise absolute value; `i32::MIN` stays `i32::MIN`
    #[inline(always)]
    pub fn abs(self) -> Self {
        Self(K::abs(self.0))
    }

    /// `self.max(lo).min(hi)`
    #[inline(always)]
    pub fn clamp(self, lo: Self, hi: Self) -> Self {
        self.max(lo).min(hi)
    }
}
