//! Lane broadcast, shuffle, unpack and permute
//!
//! `shuffle`, `shuffle_pair` and the unpacks work inside each 128-bit block,
//! exactly like their instructions; at 256 bits the upper block is processed
//! independently with the same control. `permute` and `broadcast_lane` cross
//! the whole register.

use super::Vector;
use crate::kind::RegisterKind;

/// Shuffle control selecting `l0..l3` for lanes 0..3 of each 128-bit block
///
/// Equivalent to `_MM_SHUFFLE(l3, l2, l1, l0)`.
///
/// ```rust
/// use solid_simd::{shuffle_control, Int128, Vector};
///
/// const REVERSE: i32 = shuffle_control(3, 2, 1, 0);
/// let v = Vector::<Int128>::set(10, 20, 30, 40);
/// assert_eq!(v.shuffle::<REVERSE>().to_array(), [40, 30, 20, 10]);
/// ```
pub const fn shuffle_control(l0: u32, l1: u32, l2: u32, l3: u32) -> i32 {
    ((l0 & 3) | (l1 & 3) << 2 | (l2 & 3) << 4 | (l3 & 3) << 6) as i32
}

impl<K: RegisterKind> Vector<K> {
    /// Every lane set to lane `I`
    ///
    /// This is the indexing form of the API: it returns a whole vector, not a
    /// scalar. Use [`lane`](Self::lane) for scalar extraction. An index past
    /// the lane count fails to compile.
    #[inline(always)]
    pub fn broadcast_lane<const I: usize>(self) -> Self {
        const { assert!(I < K::LANES, "lane index out of range for this register kind") };
        self.permute(Vector::splat(I as i32))
    }

    /// Every lane set to lane `index`
    ///
    /// The index is masked to the lane count as the permute instruction does;
    /// debug builds assert it is in range.
    #[inline(always)]
    pub fn broadcast_lane_dyn(self, index: usize) -> Self {
        debug_assert!(
            index < K::LANES,
            "lane {} out of range for {}",
            index,
            K::KIND
        );
        self.permute(Vector::splat(index as i32))
    }

    /// In-place [`broadcast_lane`](Self::broadcast_lane)
    #[inline(always)]
    pub fn set_broadcast_lane<const I: usize>(&mut self) {
        *self = self.broadcast_lane::<I>();
    }

    /// In-place [`broadcast_lane_dyn`](Self::broadcast_lane_dyn)
    #[inline(always)]
    pub fn set_broadcast_lane_dyn(&mut self, index: usize) {
        *self = self.broadcast_lane_dyn(index);
    }

    /// Single-source shuffle: lane `j` of each block takes lane
    /// `(IMM >> 2j) & 3` of the same block
    #[inline(always)]
    pub fn shuffle<const IMM: i32>(self) -> Self {
        Self(K::shuffle2::<IMM>(self.0, self.0))
    }

    /// Two-source shuffle with `shufps` semantics: lanes 0 and 1 of each block
    /// come from `self`, lanes 2 and 3 from `other`
    #[inline(always)]
    pub fn shuffle_pair<const IMM: i32>(self, other: Self) -> Self {
        Self(K::shuffle2::<IMM>(self.0, other.0))
    }

    /// Interleave the low halves of each block: `[a0, b0, a1, b1]`
    #[inline(always)]
    pub fn unpack_low(self, other: Self) -> Self {
        Self(K::unpack_lo(self.0, other.0))
    }

    /// Interleave the high halves of each block: `[a2, b2, a3, b3]`
    #[inline(always)]
    pub fn unpack_high(self, other: Self) -> Self {
        Self(K::unpack_hi(self.0, other.0))
    }

    /// Lane `i` takes lane `indices[i]` of `self`, crossing blocks
    ///
    /// Only the low 2 (128-bit) or 3 (256-bit) bits of each index are used.
    #[inline(always)]
    pub fn permute(self, indices: Vector<K::Int>) -> Self {
        Self(K::permute(self.0, indices.into_raw()))
    }

    /// Two-source permute: interleave the low halves of `self` and `other`,
    /// then shuffle the result with `IMM`
    #[inline(always)]
    pub fn permute_pair<const IMM: i32>(self, other: Self) -> Self {
        self.unpack_low(other).shuffle::<IMM>()
    }
}

#[cfg(test)]
mod tests {
    use super::shuffle_control;
    use crate::kind::{Float128, Float256, Int128, Int256};
    use crate::vector::Vector;

    #[test]
    fn test_broadcast_lane() {
        let v = Vector::<Int128>::set(10, 20, 30, 40);
        assert_eq!(v.broadcast_lane::<2>().to_array(), [30; 4]);

        let w = Vector::<Float256>::set(0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0);
        assert_eq!(w.broadcast_lane::<6>().to_array(), [6.0; 8]);
        assert_eq!(w.broadcast_lane_dyn(1).to_array(), [1.0; 8]);

        let mut m = v;
        m.set_broadcast_lane::<3>();
        assert_eq!(m.to_array(), [40; 4]);
        m = v;
        m.set_broadcast_lane_dyn(0);
        assert_eq!(m.to_array(), [10; 4]);
    }

    #[test]
    fn test_shuffle_control() {
        assert_eq!(shuffle_control(0, 1, 2, 3), 0b11_10_01_00);
        assert_eq!(shuffle_control(3, 2, 1, 0), 0b00_01_10_11);
    }

    #[test]
    fn test_shuffle_per_block() {
        const ROTATE: i32 = shuffle_control(1, 2, 3, 0);
        let v = Vector::<Int256>::set(0, 1, 2, 3, 4, 5, 6, 7);
        assert_eq!(v.shuffle::<ROTATE>().to_array(), [1, 2, 3, 0, 5, 6, 7, 4]);

        let f = Vector::<Float128>::set(1.0, 2.0, 3.0, 4.0);
        assert_eq!(
            f.shuffle::<{ shuffle_control(0, 0, 3, 3) }>().to_array(),
            [1.0, 1.0, 4.0, 4.0]
        );
    }

    #[test]
    fn test_shuffle_pair() {
        let a = Vector::<Float128>::set(1.0, 2.0, 3.0, 4.0);
        let b = Vector::<Float128>::set(5.0, 6.0, 7.0, 8.0);
        const CTRL: i32 = shuffle_control(3, 0, 1, 2);
        assert_eq!(a.shuffle_pair::<CTRL>(b).to_array(), [4.0, 1.0, 6.0, 7.0]);
    }

    #[test]
    fn test_unpack() {
        let a = Vector::<Int256>::set(0, 1, 2, 3, 4, 5, 6, 7);
        let b = Vector::<Int256>::set(10, 11, 12, 13, 14, 15, 16, 17);
        assert_eq!(a.unpack_low(b).to_array(), [0, 10, 1, 11, 4, 14, 5, 15]);
        assert_eq!(a.unpack_high(b).to_array(), [2, 12, 3, 13, 6, 16, 7, 17]);
    }

    #[test]
    fn test_permute_crosses_blocks() {
        let v = Vector::<Int256>::set(0, 10, 20, 30, 40, 50, 60, 70);
        let idx = Vector::<Int256>::set(7, 6, 5, 4, 3, 2, 1, 0);
        assert_eq!(v.permute(idx).to_array(), [70, 60, 50, 40, 30, 20, 10, 0]);

        // index bits above the lane count are ignored
        let f = Vector::<Float128>::set(1.0, 2.0, 3.0, 4.0);
        let idx = Vector::<Int128>::set(4, 5, -2, 3);
        assert_eq!(f.permute(idx).to_array(), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_permute_pair() {
        let a = Vector::<Int128>::set(1, 2, 3, 4);
        let b = Vector::<Int128>::set(5, 6, 7, 8);
        // unpack_low gives [1, 5, 2, 6]
        const CTRL: i32 = shuffle_control(1, 3, 0, 2);
        assert_eq!(a.permute_pair::<CTRL>(b).to_array(), [5, 6, 1, 2]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of range")]
    fn test_broadcast_lane_dyn_out_of_range_asserts() {
        let _ = Vector::<Int128>::splat(1).broadcast_lane_dyn(4);
    }
}
