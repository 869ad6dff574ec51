//! Lane masks
//!
//! A [`Mask`] shares its register layout with [`Vector`] of the same kind,
//! but every lane is either all ones (true) or all zeros (false). Masks are
//! produced by the comparison methods and consumed by [`Mask::select`],
//! [`Vector::select`] and the masked memory operations. Keeping them a
//! distinct type stops arbitrary data from being passed where a lane mask is
//! expected.

use core::fmt;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use crate::kind::{Lane, RegisterKind};
use crate::vector::Vector;

/// Per-lane boolean mask for register kind `K`
#[repr(transparent)]
pub struct Mask<K: RegisterKind>(K::Register);

impl<K: RegisterKind> Clone for Mask<K> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: RegisterKind> Copy for Mask<K> {}

#[inline(always)]
const fn lane_bits(lanes: usize) -> u32 {
    (1u32 << lanes) - 1
}

impl<K: RegisterKind> Mask<K> {
    /// Wrap a register whose lanes are already all-ones or all-zeros
    #[inline(always)]
    pub(crate) fn from_register(reg: K::Register) -> Self {
        Self(reg)
    }

    /// Raw register, lanes all ones or all zeros
    #[inline(always)]
    pub fn into_raw(self) -> K::Register {
        self.0
    }

    /// Every lane set to `value`
    #[inline(always)]
    pub fn splat(value: bool) -> Self {
        if value {
            Self(K::all_ones())
        } else {
            Self(K::zero())
        }
    }

    /// Lane `i` is set when bit `i` of `bits` is set; bits above the lane
    /// count are ignored
    #[inline]
    pub fn from_bitmask(bits: u32) -> Self {
        let mut lanes = K::Array::default();
        for (i, lane) in lanes.as_mut().iter_mut().enumerate() {
            let set = (bits >> i) & 1 != 0;
            *lane = <K::Lane as Lane>::from_bits(if set { u32::MAX } else { 0 });
        }
        Self(K::from_array(lanes))
    }

    /// The first `n` lanes set, the rest clear
    ///
    /// Handy for the tail of a slice in masked loads and stores.
    #[inline]
    pub fn first_lanes(n: usize) -> Self {
        if n >= K::LANES {
            Self::splat(true)
        } else {
            Self::from_bitmask(lane_bits(n))
        }
    }

    /// One bit per lane, lane 0 in bit 0
    #[inline(always)]
    pub fn to_bitmask(self) -> u32 {
        K::movemask(self.0)
    }

    /// State of one lane
    #[inline]
    pub fn test(self, lane: usize) -> bool {
        debug_assert!(lane < K::LANES, "lane {} out of range for {}", lane, K::KIND);
        (self.to_bitmask() >> lane) & 1 != 0
    }

    /// True when every lane is set
    #[inline(always)]
    pub fn all(self) -> bool {
        self.to_bitmask() == lane_bits(K::LANES)
    }

    /// True when at least one lane is set
    #[inline(always)]
    pub fn any(self) -> bool {
        self.to_bitmask() != 0
    }

    /// True when no lane is set
    #[inline(always)]
    pub fn none(self) -> bool {
        self.to_bitmask() == 0
    }

    /// Number of set lanes
    #[inline(always)]
    pub fn count(self) -> u32 {
        self.to_bitmask().count_ones()
    }

    /// Lanes of `if_true` where set, `if_false` where clear
    #[inline(always)]
    pub fn select(self, if_true: Vector<K>, if_false: Vector<K>) -> Vector<K> {
        Vector::from_raw(K::blend(self.0, if_true.into_raw(), if_false.into_raw()))
    }

    /// `!self & rhs`
    #[inline(always)]
    pub fn and_not(self, rhs: Self) -> Self {
        Self(K::andnot(self.0, rhs.0))
    }

    /// The mask bits as a data vector (all-ones lanes read as -1 or NaN)
    #[inline(always)]
    pub fn to_vector(self) -> Vector<K> {
        Vector::from_raw(self.0)
    }

    /// Same lanes viewed as a mask of the integer kind of this width
    #[inline(always)]
    pub fn to_int(self) -> Mask<K::Int> {
        Mask(K::to_bits(self.0))
    }
}

impl<K: RegisterKind> Default for Mask<K> {
    #[inline(always)]
    fn default() -> Self {
        Self::splat(false)
    }
}

impl<K: RegisterKind> PartialEq for Mask<K> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.to_bitmask() == other.to_bitmask()
    }
}

impl<K: RegisterKind> Eq for Mask<K> {}

impl<K: RegisterKind> fmt::Debug for Mask<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bits = self.to_bitmask();
        f.debug_list()
            .entries((0..K::LANES).map(|i| (bits >> i) & 1 != 0))
            .finish()
    }
}

impl<K: RegisterKind> BitAnd for Mask<K> {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        Self(K::and(self.0, rhs.0))
    }
}

impl<K: RegisterKind> BitOr for Mask<K> {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        Self(K::or(self.0, rhs.0))
    }
}

impl<K: RegisterKind> BitXor for Mask<K> {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        Self(K::xor(self.0, rhs.0))
    }
}

impl<K: RegisterKind> Not for Mask<K> {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        Self(K::xor(self.0, K::all_ones()))
    }
}

impl<K: RegisterKind> BitAndAssign for Mask<K> {
    #[inline(always)]
    fn bitand_assign(&mut self, rhs: Self) {
        *self = *self & rhs;
    }
}

impl<K: RegisterKind> BitOrAssign for Mask<K> {
    #[inline(always)]
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl<K: RegisterKind> BitXorAssign for Mask<K> {
    #[inline(always)]
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = *self ^ rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::{Float128, Float256, Int128, Int256};

    #[test]
    fn test_bitmask_round_trip() {
        let m = Mask::<Int256>::from_bitmask(0b1010_0110);
        assert_eq!(m.to_bitmask(), 0b1010_0110);
        assert!(m.test(1) && !m.test(0));
        assert_eq!(m.count(), 4);

        // bits past the lane count are dropped
        let m = Mask::<Float128>::from_bitmask(0xFF);
        assert_eq!(m.to_bitmask(), 0xF);
        assert!(m.all());
    }

    #[test]
    fn test_all_any_none() {
        assert!(Mask::<Float256>::splat(true).all());
        assert!(Mask::<Float256>::splat(false).none());
        assert!(!Mask::<Int128>::from_bitmask(0b0100).all());
        assert!(Mask::<Int128>::from_bitmask(0b0100).any());
        assert_eq!(Mask::<Int128>::default(), Mask::splat(false));
    }

    #[test]
    fn test_first_lanes() {
        assert_eq!(Mask::<Int256>::first_lanes(0).to_bitmask(), 0);
        assert_eq!(Mask::<Int256>::first_lanes(3).to_bitmask(), 0b111);
        assert!(Mask::<Int128>::first_lanes(4).all());
        assert!(Mask::<Int128>::first_lanes(100).all());
    }

    #[test]
    fn test_logical_operators() {
        let a = Mask::<Float128>::from_bitmask(0b0011);
        let b = Mask::<Float128>::from_bitmask(0b0110);
        assert_eq!((a & b).to_bitmask(), 0b0010);
        assert_eq!((a | b).to_bitmask(), 0b0111);
        assert_eq!((a ^ b).to_bitmask(), 0b0101);
        assert_eq!((!a).to_bitmask(), 0b1100);
        assert_eq!(a.and_not(b).to_bitmask(), 0b0100);
        assert_eq!(!!a, a);
    }

    #[test]
    fn test_mask_lanes_are_full_width() {
        let lanes = Mask::<Int128>::from_bitmask(0b1001).to_vector().to_array();
        assert_eq!(lanes, [-1, 0, 0, -1]);

        let bits = Mask::<Float256>::from_bitmask(0b1).to_int().to_vector().to_array();
        assert_eq!(bits[0], -1);
        assert_eq!(bits[1..], [0; 7]);
    }
}
