//! Generic vector wrapper
//!
//! [`Vector<K>`] holds exactly one register of kind `K` and exposes the whole
//! operation surface. Each method is written once per operation family and
//! lowers through the kind's primitives in [`RegisterKind`] and its
//! sub-traits, so the choice of instruction sequence is made entirely at
//! compile time. Families that only make sense for some kinds live in `impl`
//! blocks bounded on [`IntegerKind`](crate::IntegerKind),
//! [`FloatKind`](crate::FloatKind) or [`Width256`]; calling them on any other
//! kind is a compile error.
//!
//! Lane 0 is always the lowest-addressed element in memory and the first
//! argument of [`Vector::set`].
//!
//! ```rust
//! use solid_simd::{Float128, Vector};
//!
//! let a = Vector::<Float128>::set(1.0, 2.0, 3.0, 4.0);
//! let b = Vector::<Float128>::set(10.0, 20.0, 30.0, 40.0);
//! assert_eq!((a + b).to_array(), [11.0, 22.0, 33.0, 44.0]);
//! ```
//!
//! Integer division does not exist:
//!
//! ```compile_fail
//! use solid_simd::{Int128, Vector};
//!
//! let a = Vector::<Int128>::splat(6);
//! let _ = a / Vector::splat(2);
//! ```

mod arith;
mod bits;
mod compare;
mod horizontal;
pub mod lanes;
mod memory;
mod round;

use core::fmt;

use crate::aligned::Aligned;
use crate::error::{Result, SimdError};
use crate::kind::{
    Float128, Float256, Int128, Int256, IntegerKind, Lane, RegisterKind, Width256,
};

/// One SIMD register of kind `K`
#[repr(transparent)]
pub struct Vector<K: RegisterKind>(K::Register);

impl<K: RegisterKind> Clone for Vector<K> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: RegisterKind> Copy for Vector<K> {}

impl<K: RegisterKind> Vector<K> {
    /// Wrap a raw register
    #[inline(always)]
    pub fn from_raw(reg: K::Register) -> Self {
        Self(reg)
    }

    /// The raw register
    #[inline(always)]
    pub fn into_raw(self) -> K::Register {
        self.0
    }

    /// All lanes zero
    #[inline(always)]
    pub fn zero() -> Self {
        Self(K::zero())
    }

    /// All lanes one (`1` or `1.0`)
    #[inline(always)]
    pub fn one() -> Self {
        Self(K::splat(<K::Lane as Lane>::ONE))
    }

    /// All lanes set to `value`
    #[inline(always)]
    pub fn splat(value: K::Lane) -> Self {
        Self(K::splat(value))
    }

    /// All lanes set to the scalar behind `value`
    #[inline(always)]
    pub fn broadcast(value: &K::Lane) -> Self {
        Self(K::splat(*value))
    }

    /// Lanes taken from an array, lane 0 first
    #[inline(always)]
    pub fn from_array(lanes: K::Array) -> Self {
        Self(K::from_array(lanes))
    }

    /// Lane `i` set to `f(i)`
    #[inline]
    pub fn from_fn(mut f: impl FnMut(usize) -> K::Lane) -> Self {
        let mut lanes = K::Array::default();
        for (i, lane) in lanes.as_mut().iter_mut().enumerate() {
            *lane = f(i);
        }
        Self(K::from_array(lanes))
    }

    /// Lanes copied out to an array, lane 0 first
    #[inline(always)]
    pub fn to_array(self) -> K::Array {
        K::to_array(self.0)
    }

    /// Scalar value of one lane
    ///
    /// # Panics
    ///
    /// Panics if `index >= K::LANES`.
    #[inline]
    pub fn lane(self, index: usize) -> K::Lane {
        self.to_array().as_ref()[index]
    }

    /// First `K::LANES` elements of `slice`
    ///
    /// # Panics
    ///
    /// Panics if the slice is shorter than the lane count.
    #[inline]
    pub fn from_slice(slice: &[K::Lane]) -> Self {
        assert!(
            slice.len() >= K::LANES,
            "slice of length {} is too short for {} lanes",
            slice.len(),
            K::LANES
        );
        unsafe { Self::load_unaligned(slice.as_ptr()) }
    }

    /// First `K::LANES` elements of `slice`, or an error if it is too short
    #[inline]
    pub fn try_from_slice(slice: &[K::Lane]) -> Result<Self> {
        if slice.len() < K::LANES {
            return Err(SimdError::SliceTooShort {
                needed: K::LANES,
                actual: slice.len(),
            });
        }
        Ok(unsafe { Self::load_unaligned(slice.as_ptr()) })
    }

    /// Write every lane to the front of `slice`
    ///
    /// # Panics
    ///
    /// Panics if the slice is shorter than the lane count.
    #[inline]
    pub fn write_to_slice(self, slice: &mut [K::Lane]) {
        assert!(
            slice.len() >= K::LANES,
            "slice of length {} is too short for {} lanes",
            slice.len(),
            K::LANES
        );
        unsafe { self.store_unaligned(slice.as_mut_ptr()) }
    }

    /// Aligned load from memory
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading `K::LANES` elements and aligned to
    /// `K::ALIGN` bytes (16 or 32).
    #[inline(always)]
    pub unsafe fn load_aligned(ptr: *const K::Lane) -> Self {
        debug_assert!(
            ptr as usize % K::ALIGN == 0,
            "aligned load from {:p} needs {}-byte alignment",
            ptr,
            K::ALIGN
        );
        Self(K::load_aligned(ptr))
    }

    /// Unaligned load from memory
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading `K::LANES` elements.
    #[inline(always)]
    pub unsafe fn load_unaligned(ptr: *const K::Lane) -> Self {
        Self(K::load_unaligned(ptr))
    }

    /// Aligned store to memory
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writing `K::LANES` elements and aligned to
    /// `K::ALIGN` bytes.
    #[inline(always)]
    pub unsafe fn store_aligned(self, ptr: *mut K::Lane) {
        debug_assert!(
            ptr as usize % K::ALIGN == 0,
            "aligned store to {:p} needs {}-byte alignment",
            ptr,
            K::ALIGN
        );
        K::store_aligned(self.0, ptr)
    }

    /// Unaligned store to memory
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writing `K::LANES` elements.
    #[inline(always)]
    pub unsafe fn store_unaligned(self, ptr: *mut K::Lane) {
        K::store_unaligned(self.0, ptr)
    }

    /// Aligned load from an over-aligned buffer
    #[inline(always)]
    pub fn load(src: &Aligned<K::Array>) -> Self {
        // Aligned<T> sits on a 32-byte boundary, enough for every kind
        unsafe { Self(K::load_aligned(src.0.as_ref().as_ptr())) }
    }

    /// Aligned store into an over-aligned buffer
    #[inline(always)]
    pub fn store(self, dst: &mut Aligned<K::Array>) {
        unsafe { K::store_aligned(self.0, dst.0.as_mut().as_mut_ptr()) }
    }

    /// Reinterpret the lanes as raw 32-bit integers without conversion
    #[inline(always)]
    pub fn to_bits(self) -> Vector<K::Int> {
        Vector::from_raw(K::to_bits(self.0))
    }

    /// Reinterpret raw 32-bit integer lanes as this kind without conversion
    #[inline(always)]
    pub fn from_bits(bits: Vector<K::Int>) -> Self {
        Self(K::from_bits(bits.into_raw()))
    }
}

impl<K: IntegerKind> Vector<K> {
    /// Numeric conversion of every lane to `f32` (round to nearest even)
    #[inline(always)]
    pub fn to_float(self) -> Vector<K::Float> {
        Vector::from_raw(K::to_float(self.0))
    }
}

impl<K: Width256> Vector<K> {
    /// Lanes 0..4 as a 128-bit vector
    #[inline(always)]
    pub fn low_half(self) -> Vector<K::Half> {
        Vector::from_raw(K::low_half(self.0))
    }

    /// Lanes 4..8 as a 128-bit vector
    #[inline(always)]
    pub fn high_half(self) -> Vector<K::Half> {
        Vector::from_raw(K::high_half(self.0))
    }

    /// Concatenate two 128-bit vectors, `low` in lanes 0..4
    #[inline(always)]
    pub fn from_halves(low: Vector<K::Half>, high: Vector<K::Half>) -> Self {
        Self(K::from_halves(low.into_raw(), high.into_raw()))
    }
}

macro_rules! impl_set {
    ($kind:ty, $lane:ty, $($arg:ident),+) => {
        impl Vector<$kind> {
            /// Lanes given individually, lane 0 first
            #[inline(always)]
            #[allow(clippy::too_many_arguments)]
            pub fn set($($arg: $lane),+) -> Self {
                Self::from_array([$($arg),+])
            }
        }
    };
}

impl_set!(Int128, i32, l0, l1, l2, l3);
impl_set!(Float128, f32, l0, l1, l2, l3);
impl_set!(Int256, i32, l0, l1, l2, l3, l4, l5, l6, l7);
impl_set!(Float256, f32, l0, l1, l2, l3, l4, l5, l6, l7);

impl<K: RegisterKind> Default for Vector<K> {
    #[inline(always)]
    fn default() -> Self {
        Self::zero()
    }
}

impl<K: RegisterKind> fmt::Debug for Vector<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(K::KIND.name()).field(&self.to_array()).finish()
    }
}
