//! Register kind classification
//!
//! Every vector in this crate is parameterized by one of four zero-sized kind
//! markers: [`Int128`], [`Int256`], [`Float128`] and [`Float256`]. The traits in
//! this module are the only mechanism the wrapper uses to pick an instruction
//! sequence. Operation families are bounded on [`IntegerKind`], [`FloatKind`],
//! [`Width128`] or [`Width256`], so an operation that a kind cannot lower is
//! simply absent for it and fails to compile instead of returning garbage.
//!
//! ```rust
//! use solid_simd::{Float256, Int128, Kind, RegisterKind};
//!
//! assert_eq!(Int128::KIND, Kind::Int128);
//! assert!(Int128::IS_INTEGER && Int128::IS_128);
//! assert_eq!(Float256::LANES, 8);
//! assert_eq!(Float256::ALIGN, 32);
//! ```
//!
//! The predicates are also available for raw register types through
//! [`SimdRegister`], which maps a concrete register (for example `__m256i` on
//! x86_64) back to its kind.

use core::fmt::Debug;

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// The closed set of register shapes supported by the wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// 4 × i32 in a 128-bit register
    Int128,
    /// 8 × i32 in a 256-bit register
    Int256,
    /// 4 × f32 in a 128-bit register
    Float128,
    /// 8 × f32 in a 256-bit register
    Float256,
}

impl Kind {
    /// True for the packed 32-bit integer kinds
    #[inline]
    pub const fn is_integer(self) -> bool {
        matches!(self, Kind::Int128 | Kind::Int256)
    }

    /// True for the packed single-precision float kinds
    #[inline]
    pub const fn is_float(self) -> bool {
        !self.is_integer()
    }

    /// True for the 128-bit kinds
    #[inline]
    pub const fn is_128(self) -> bool {
        matches!(self, Kind::Int128 | Kind::Float128)
    }

    /// True for the 256-bit kinds
    #[inline]
    pub const fn is_256(self) -> bool {
        !self.is_128()
    }

    /// Number of 32-bit lanes
    #[inline]
    pub const fn lanes(self) -> usize {
        if self.is_128() {
            4
        } else {
            8
        }
    }

    /// Register width in bits
    #[inline]
    pub const fn width_bits(self) -> usize {
        self.lanes() * 32
    }

    /// Natural alignment in bytes required by aligned loads and stores
    #[inline]
    pub const fn alignment(self) -> usize {
        self.width_bits() / 8
    }

    /// Short lowercase name, e.g. `"int128"`
    pub const fn name(self) -> &'static str {
        match self {
            Kind::Int128 => "int128",
            Kind::Int256 => "int256",
            Kind::Float128 => "float128",
            Kind::Float256 => "float256",
        }
    }
}

impl core::fmt::Display for Kind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Scalar element stored in one lane (`i32` or `f32`)
pub trait Lane:
    sealed::Sealed + Copy + PartialEq + PartialOrd + Default + Debug + Send + Sync + 'static
{
    /// Additive identity
    const ZERO: Self;
    /// Multiplicative identity
    const ONE: Self;

    /// Raw bit pattern of the lane
    fn to_bits(self) -> u32;

    /// Rebuild a lane from its raw bit pattern
    fn from_bits(bits: u32) -> Self;
}

impl sealed::Sealed for i32 {}
impl sealed::Sealed for f32 {}

impl Lane for i32 {
    const ZERO: Self = 0;
    const ONE: Self = 1;

    #[inline(always)]
    fn to_bits(self) -> u32 {
        self as u32
    }

    #[inline(always)]
    fn from_bits(bits: u32) -> Self {
        bits as i32
    }
}

impl Lane for f32 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    #[inline(always)]
    fn to_bits(self) -> u32 {
        f32::to_bits(self)
    }

    #[inline(always)]
    fn from_bits(bits: u32) -> Self {
        f32::from_bits(bits)
    }
}

/// A register kind together with its primitive lowering
///
/// Implemented exactly once per kind by the active backend (see
/// [`crate::backends`]). The trait is sealed: the set of kinds is closed.
///
/// The associated functions are the per-kind primitives that
/// [`Vector`](crate::Vector) composes into its public operation surface. They
/// operate on raw registers and are not meant to be called directly.
pub trait RegisterKind: sealed::Sealed + Copy + Default + Debug + Send + Sync + 'static {
    /// Raw register storage
    type Register: Copy;
    /// Scalar type of one lane
    type Lane: Lane;
    /// Lanes as a plain array in memory order (lane 0 first)
    type Array: Copy
        + Debug
        + Default
        + PartialEq
        + AsRef<[Self::Lane]>
        + AsMut<[Self::Lane]>
        + Send
        + Sync
        + 'static;
    /// Integer kind of the same width
    type Int: IntegerKind;
    /// Float kind of the same width
    type Float: FloatKind;

    /// Runtime tag of this kind
    const KIND: Kind;
    /// Number of lanes (4 or 8)
    const LANES: usize = Self::KIND.lanes();
    /// Natural alignment in bytes (16 or 32)
    const ALIGN: usize = Self::KIND.alignment();
    /// Integer-lane variant of its width
    const IS_INTEGER: bool = Self::KIND.is_integer();
    /// 128-bit wide
    const IS_128: bool = Self::KIND.is_128();
    /// 256-bit wide
    const IS_256: bool = Self::KIND.is_256();

    #[doc(hidden)]
    fn splat(value: Self::Lane) -> Self::Register;
    #[doc(hidden)]
    fn zero() -> Self::Register;
    #[doc(hidden)]
    fn all_ones() -> Self::Register;
    #[doc(hidden)]
    fn from_array(lanes: Self::Array) -> Self::Register;
    #[doc(hidden)]
    fn to_array(reg: Self::Register) -> Self::Array;

    #[doc(hidden)]
    unsafe fn load_aligned(ptr: *const Self::Lane) -> Self::Register;
    #[doc(hidden)]
    unsafe fn load_unaligned(ptr: *const Self::Lane) -> Self::Register;
    #[doc(hidden)]
    unsafe fn store_aligned(reg: Self::Register, ptr: *mut Self::Lane);
    #[doc(hidden)]
    unsafe fn store_unaligned(reg: Self::Register, ptr: *mut Self::Lane);
    #[doc(hidden)]
    unsafe fn masked_load(ptr: *const Self::Lane, mask: Self::Register) -> Self::Register;
    #[doc(hidden)]
    unsafe fn masked_store(reg: Self::Register, ptr: *mut Self::Lane, mask: Self::Register);

    #[doc(hidden)]
    fn add(a: Self::Register, b: Self::Register) -> Self::Register;
    #[doc(hidden)]
    fn sub(a: Self::Register, b: Self::Register) -> Self::Register;
    #[doc(hidden)]
    fn mul(a: Self::Register, b: Self::Register) -> Self::Register;
    #[doc(hidden)]
    fn neg(a: Self::Register) -> Self::Register;
    #[doc(hidden)]
    fn min(a: Self::Register, b: Self::Register) -> Self::Register;
    #[doc(hidden)]
    fn max(a: Self::Register, b: Self::Register) -> Self::Register;
    #[doc(hidden)]
    fn abs(a: Self::Register) -> Self::Register;

    #[doc(hidden)]
    fn cmp_eq(a: Self::Register, b: Self::Register) -> Self::Register;
    #[doc(hidden)]
    fn cmp_lt(a: Self::Register, b: Self::Register) -> Self::Register;

    #[doc(hidden)]
    fn and(a: Self::Register, b: Self::Register) -> Self::Register;
    #[doc(hidden)]
    fn or(a: Self::Register, b: Self::Register) -> Self::Register;
    #[doc(hidden)]
    fn xor(a: Self::Register, b: Self::Register) -> Self::Register;
    /// `!a & b`
    #[doc(hidden)]
    fn andnot(a: Self::Register, b: Self::Register) -> Self::Register;
    /// Lane from `if_set` where the mask lane's sign bit is set, else `if_clear`
    #[doc(hidden)]
    fn blend(mask: Self::Register, if_set: Self::Register, if_clear: Self::Register)
        -> Self::Register;
    /// Sign bit of every lane packed into the low bits
    #[doc(hidden)]
    fn movemask(reg: Self::Register) -> u32;

    #[doc(hidden)]
    fn hadd(a: Self::Register, b: Self::Register) -> Self::Register;
    #[doc(hidden)]
    fn hsub(a: Self::Register, b: Self::Register) -> Self::Register;
    /// Even lanes `a - b`, odd lanes `a + b`
    #[doc(hidden)]
    fn addsub(a: Self::Register, b: Self::Register) -> Self::Register;

    #[doc(hidden)]
    fn unpack_lo(a: Self::Register, b: Self::Register) -> Self::Register;
    #[doc(hidden)]
    fn unpack_hi(a: Self::Register, b: Self::Register) -> Self::Register;
    /// shufps: per 128-bit block, two lanes of `a` then two lanes of `b`
    #[doc(hidden)]
    fn shuffle2<const IMM: i32>(a: Self::Register, b: Self::Register) -> Self::Register;
    /// Cross-lane variable permute, index bits masked to the lane count
    #[doc(hidden)]
    fn permute(a: Self::Register, idx: <Self::Int as RegisterKind>::Register) -> Self::Register;

    #[doc(hidden)]
    fn to_bits(a: Self::Register) -> <Self::Int as RegisterKind>::Register;
    #[doc(hidden)]
    fn from_bits(bits: <Self::Int as RegisterKind>::Register) -> Self::Register;
}

/// Packed 32-bit integer kinds: bitwise operators, shifts, bit counting
pub trait IntegerKind: RegisterKind<Lane = i32> {
    /// Logical left shift by a scalar count; counts ≥ 32 produce zero
    #[doc(hidden)]
    fn shl(a: Self::Register, count: u32) -> Self::Register;
    /// Logical right shift by a scalar count; counts ≥ 32 produce zero
    #[doc(hidden)]
    fn shr(a: Self::Register, count: u32) -> Self::Register;
    /// Per-lane logical left shift; lane counts ≥ 32 (unsigned) produce zero
    #[doc(hidden)]
    fn shl_lanes(a: Self::Register, counts: Self::Register) -> Self::Register;
    /// Per-lane logical right shift; lane counts ≥ 32 (unsigned) produce zero
    #[doc(hidden)]
    fn shr_lanes(a: Self::Register, counts: Self::Register) -> Self::Register;
    /// Numeric i32 → f32 conversion (round to nearest even)
    #[doc(hidden)]
    fn to_float(a: Self::Register) -> <Self::Float as RegisterKind>::Register;
}

/// Packed single-precision kinds: division, rounding, square roots
pub trait FloatKind: RegisterKind<Lane = f32> {
    #[doc(hidden)]
    fn div(a: Self::Register, b: Self::Register) -> Self::Register;
    #[doc(hidden)]
    fn sqrt(a: Self::Register) -> Self::Register;
    #[doc(hidden)]
    fn reciprocal(a: Self::Register) -> Self::Register;
    #[doc(hidden)]
    fn reciprocal_sqrt(a: Self::Register) -> Self::Register;
    #[doc(hidden)]
    fn mul_add(a: Self::Register, b: Self::Register, c: Self::Register) -> Self::Register;
    #[doc(hidden)]
    fn floor(a: Self::Register) -> Self::Register;
    #[doc(hidden)]
    fn ceil(a: Self::Register) -> Self::Register;
    #[doc(hidden)]
    fn truncate(a: Self::Register) -> Self::Register;
    /// Round half to even
    #[doc(hidden)]
    fn round_even(a: Self::Register) -> Self::Register;
    /// cvtps2dq: nearest-even, NaN and overflow become `i32::MIN`
    #[doc(hidden)]
    fn to_int_nearest(a: Self::Register) -> <Self::Int as RegisterKind>::Register;
    /// cvttps2dq: toward zero, NaN and overflow become `i32::MIN`
    #[doc(hidden)]
    fn to_int_truncate(a: Self::Register) -> <Self::Int as RegisterKind>::Register;
}

/// 128-bit kinds (4 lanes)
pub trait Width128: RegisterKind {}

/// 256-bit kinds (8 lanes), splittable into two 128-bit halves
pub trait Width256: RegisterKind {
    /// The 128-bit kind with the same lane type
    type Half: Width128<Lane = Self::Lane>;

    #[doc(hidden)]
    fn low_half(a: Self::Register) -> <Self::Half as RegisterKind>::Register;
    #[doc(hidden)]
    fn high_half(a: Self::Register) -> <Self::Half as RegisterKind>::Register;
    #[doc(hidden)]
    fn from_halves(
        low: <Self::Half as RegisterKind>::Register,
        high: <Self::Half as RegisterKind>::Register,
    ) -> Self::Register;
}

/// Maps a concrete hardware (or emulated) register type to its kind
///
/// Types that do not implement this trait are not SIMD registers as far as
/// this crate is concerned.
///
/// ```rust
/// # #[cfg(target_arch = "x86_64")] {
/// use core::arch::x86_64::__m128;
/// use solid_simd::{classify, Kind};
///
/// assert_eq!(classify::<__m128>(), Kind::Float128);
/// # }
/// ```
pub trait SimdRegister: Copy + 'static {
    /// Kind this register holds
    type Kind: RegisterKind;
}

/// Kind of a concrete register type
#[inline]
pub const fn classify<R: SimdRegister>() -> Kind {
    <R::Kind as RegisterKind>::KIND
}

/// 4 × i32 (`__m128i`)
#[derive(Debug, Clone, Copy, Default)]
pub struct Int128;

/// 8 × i32 (`__m256i`)
#[derive(Debug, Clone, Copy, Default)]
pub struct Int256;

/// 4 × f32 (`__m128`)
#[derive(Debug, Clone, Copy, Default)]
pub struct Float128;

/// 8 × f32 (`__m256`)
#[derive(Debug, Clone, Copy, Default)]
pub struct Float256;

impl sealed::Sealed for Int128 {}
impl sealed::Sealed for Int256 {}
impl sealed::Sealed for Float128 {}
impl sealed::Sealed for Float256 {}

impl Width128 for Int128 {}
impl Width128 for Float128 {}

#[cfg(target_arch = "x86_64")]
mod native {
    use super::{Float128, Float256, Int128, Int256, SimdRegister};
    use core::arch::x86_64::{__m128, __m128i, __m256, __m256i};

    impl SimdRegister for __m128i {
        type Kind = Int128;
    }
    impl SimdRegister for __m256i {
        type Kind = Int256;
    }
    impl SimdRegister for __m128 {
        type Kind = Float128;
    }
    impl SimdRegister for __m256 {
        type Kind = Float256;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predicates<K: RegisterKind>() -> (bool, bool, bool, usize, usize) {
        (K::IS_INTEGER, K::IS_128, K::IS_256, K::LANES, K::ALIGN)
    }

    #[test]
    fn test_kind_predicates() {
        assert_eq!(predicates::<Int128>(), (true, true, false, 4, 16));
        assert_eq!(predicates::<Int256>(), (true, false, true, 8, 32));
        assert_eq!(predicates::<Float128>(), (false, true, false, 4, 16));
        assert_eq!(predicates::<Float256>(), (false, false, true, 8, 32));
    }

    #[test]
    fn test_family_links() {
        assert_eq!(<Float128 as RegisterKind>::Int::KIND, Kind::Int128);
        assert_eq!(<Float256 as RegisterKind>::Int::KIND, Kind::Int256);
        assert_eq!(<Int128 as RegisterKind>::Float::KIND, Kind::Float128);
        assert_eq!(<Int256 as RegisterKind>::Float::KIND, Kind::Float256);
        assert_eq!(<Int256 as Width256>::Half::KIND, Kind::Int128);
        assert_eq!(<Float256 as Width256>::Half::KIND, Kind::Float128);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Kind::Float256.name(), "float256");
        assert_eq!(Kind::Int128.width_bits(), 128);
        assert!(Kind::Float128.is_float());
    }

    #[test]
    #[cfg(target_arch = "x86_64")]
    fn test_native_classification() {
        use core::arch::x86_64::{__m128, __m128i, __m256, __m256i};

        assert_eq!(classify::<__m128i>(), Kind::Int128);
        assert_eq!(classify::<__m256i>(), Kind::Int256);
        assert_eq!(classify::<__m128>(), Kind::Float128);
        assert_eq!(classify::<__m256>(), Kind::Float256);
    }
}
