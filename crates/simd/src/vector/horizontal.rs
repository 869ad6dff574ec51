//! Horizontal operations
//!
//! The pairwise forms keep the native per-128-bit-block layout of
//! `haddps`/`phaddd`: for inputs `a` and `b` each block of the result is
//! `[a0 ∘ a1, a2 ∘ a3, b0 ∘ b1, b2 ∘ b3]`. Passing the same vector twice
//! combines adjacent pairs only once, so `v.horizontal_add(v)` is *not* a
//! full sum. The `horizontal_sum` family performs a complete reduction to a
//! scalar instead.

use super::Vector;
use crate::kind::RegisterKind;

impl<K: RegisterKind> Vector<K> {
    /// Pairwise sums: `[a0+a1, a2+a3, b0+b1, b2+b3]` per block
    #[inline(always)]
    pub fn horizontal_add(self, other: Self) -> Self {
        Self(K::hadd(self.0, other.0))
    }

    /// Pairwise differences: `[a0-a1, a2-a3, b0-b1, b2-b3]` per block
    #[inline(always)]
    pub fn horizontal_subtract(self, other: Self) -> Self {
        Self(K::hsub(self.0, other.0))
    }

    /// Pairwise products: `[a0*a1, a2*a3, b0*b1, b2*b3]` per block
    #[inline(always)]
    pub fn horizontal_multiply(self, other: Self) -> Self {
        let even = K::shuffle2::<0b10_00_10_00>(self.0, other.0);
        let odd = K::shuffle2::<0b11_01_11_01>(self.0, other.0);
        Self(K::mul(even, odd))
    }

    /// Even lanes `self - other`, odd lanes `self + other`
    #[inline(always)]
    pub fn add_subtract(self, other: Self) -> Self {
        Self(K::addsub(self.0, other.0))
    }

    /// Even lanes `self + other`, odd lanes `self - other`
    #[inline(always)]
    pub fn subtract_add(self, other: Self) -> Self {
        Self(K::addsub(self.0, K::neg(other.0)))
    }

    /// Sum of every lane; integer lanes wrap
    #[inline(always)]
    pub fn horizontal_sum(self) -> K::Lane {
        self.reduce(|a, b| a + b)
    }

    /// Product of every lane; integer lanes wrap
    #[inline(always)]
    pub fn horizontal_product(self) -> K::Lane {
        self.reduce(|a, b| a * b)
    }

    /// Smallest lane
    #[inline(always)]
    pub fn horizontal_min(self) -> K::Lane {
        self.reduce(Self::min)
    }

    /// Largest lane
    #[inline(always)]
    pub fn horizontal_max(self) -> K::Lane {
        self.reduce(Self::max)
    }

    /// Tree reduction: swap lane pairs, then neighbours, then 128-bit blocks
    #[inline(always)]
    fn reduce(self, op: impl Fn(Self, Self) -> Self) -> K::Lane {
        let mut acc = op(self, self.shuffle::<0b01_00_11_10>());
        acc = op(acc, acc.shuffle::<0b10_11_00_01>());
        if K::IS_256 {
            let swap_blocks = Vector::<K::Int>::from_fn(|i| (i ^ 4) as i32);
            acc = op(acc, acc.permute(swap_blocks));
        }
        acc.lane(0)
    }
}
