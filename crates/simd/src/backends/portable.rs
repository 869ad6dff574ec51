//! Portable backend implementation
//!
//! Lane-array registers with the same size, alignment and bit layout as the
//! hardware registers. Every primitive reproduces the x86 instruction it
//! stands in for lane by lane (NaN handling in min/max, zero for shift counts
//! ≥ 32, `i32::MIN` for out-of-range conversions, per-128-bit-block shuffles),
//! so results are bit-identical to the intrinsic backend except for the
//! approximate reciprocals, which are exact here.

use crate::kind::{
    FloatKind, Float128, Float256, Int128, Int256, IntegerKind, Kind, Lane, RegisterKind,
    SimdRegister, Width256,
};

/// Emulated 128-bit register (4 lanes)
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C, align(16))]
pub struct Reg128<T>(pub [T; 4]);

/// Emulated 256-bit register (8 lanes)
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C, align(32))]
pub struct Reg256<T>(pub [T; 8]);

impl SimdRegister for Reg128<i32> {
    type Kind = Int128;
}
impl SimdRegister for Reg256<i32> {
    type Kind = Int256;
}
impl SimdRegister for Reg128<f32> {
    type Kind = Float128;
}
impl SimdRegister for Reg256<f32> {
    type Kind = Float256;
}

const SIGN_BIT: u32 = 0x8000_0000;

/// Lane-level arithmetic with hardware semantics
trait PortableLane: Lane {
    fn add(self, rhs: Self) -> Self;
    fn sub(self, rhs: Self) -> Self;
    fn mul(self, rhs: Self) -> Self;
    fn neg(self) -> Self;
    fn abs(self) -> Self;
}

impl PortableLane for i32 {
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        self.wrapping_add(rhs)
    }
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        self.wrapping_sub(rhs)
    }
    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        self.wrapping_mul(rhs)
    }
    #[inline(always)]
    fn neg(self) -> Self {
        self.wrapping_neg()
    }
    #[inline(always)]
    fn abs(self) -> Self {
        self.wrapping_abs()
    }
}

impl PortableLane for f32 {
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        self + rhs
    }
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        self - rhs
    }
    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        self * rhs
    }
    #[inline(always)]
    fn neg(self) -> Self {
        f32::from_bits(f32::to_bits(self) ^ SIGN_BIT)
    }
    #[inline(always)]
    fn abs(self) -> Self {
        f32::from_bits(f32::to_bits(self) & !SIGN_BIT)
    }
}

#[inline(always)]
fn map<T: Copy, U, const N: usize>(a: [T; N], f: impl Fn(T) -> U) -> [U; N] {
    core::array::from_fn(|i| f(a[i]))
}

#[inline(always)]
fn zip<T: Copy, U, const N: usize>(a: [T; N], b: [T; N], f: impl Fn(T, T) -> U) -> [U; N] {
    core::array::from_fn(|i| f(a[i], b[i]))
}

#[inline(always)]
fn mask_lane<T: Lane>(set: bool) -> T {
    T::from_bits(if set { u32::MAX } else { 0 })
}

#[inline(always)]
fn sign_set<T: Lane>(lane: T) -> bool {
    lane.to_bits() & SIGN_BIT != 0
}

#[inline(always)]
fn bitwise<T: Lane, const N: usize>(a: [T; N], b: [T; N], f: impl Fn(u32, u32) -> u32) -> [T; N] {
    zip(a, b, |x, y| T::from_bits(f(x.to_bits(), y.to_bits())))
}

// minps/pminsd: the second operand wins unless the first is strictly smaller
#[inline(always)]
fn lane_min<T: PartialOrd>(a: T, b: T) -> T {
    if a < b {
        a
    } else {
        b
    }
}

#[inline(always)]
fn lane_max<T: PartialOrd>(a: T, b: T) -> T {
    if a > b {
        a
    } else {
        b
    }
}

#[inline(always)]
fn blend<T: Lane, const N: usize>(mask: [T; N], if_set: [T; N], if_clear: [T; N]) -> [T; N] {
    core::array::from_fn(|i| if sign_set(mask[i]) { if_set[i] } else { if_clear[i] })
}

#[inline(always)]
fn movemask<T: Lane, const N: usize>(a: [T; N]) -> u32 {
    a.iter()
        .enumerate()
        .fold(0, |bits, (i, &lane)| bits | ((sign_set(lane) as u32) << i))
}

/// Per 128-bit block: `[f(a0,a1), f(a2,a3), f(b0,b1), f(b2,b3)]`
#[inline(always)]
fn pairwise<T: Copy, const N: usize>(a: [T; N], b: [T; N], f: impl Fn(T, T) -> T) -> [T; N] {
    core::array::from_fn(|i| {
        let base = i & !3;
        let (src, pair) = if i & 3 < 2 { (&a, i & 1) } else { (&b, i & 1) };
        f(src[base + 2 * pair], src[base + 2 * pair + 1])
    })
}

#[inline(always)]
fn addsub<T: PortableLane, const N: usize>(a: [T; N], b: [T; N]) -> [T; N] {
    core::array::from_fn(|i| if i % 2 == 0 { a[i].sub(b[i]) } else { a[i].add(b[i]) })
}

#[inline(always)]
fn unpack<T: Copy, const N: usize>(a: [T; N], b: [T; N], high: bool) -> [T; N] {
    core::array::from_fn(|i| {
        let base = (i & !3) + if high { 2 } else { 0 };
        let src = base + (i & 3) / 2;
        if i % 2 == 0 {
            a[src]
        } else {
            b[src]
        }
    })
}

#[inline(always)]
fn shuffle2<T: Copy, const N: usize>(a: [T; N], b: [T; N], imm: i32) -> [T; N] {
    let imm = imm as u32;
    core::array::from_fn(|i| {
        let base = i & !3;
        let sel = ((imm >> ((i & 3) * 2)) & 3) as usize;
        if i & 3 < 2 {
            a[base + sel]
        } else {
            b[base + sel]
        }
    })
}

#[inline(always)]
fn permute<T: Copy, const N: usize>(a: [T; N], idx: [i32; N]) -> [T; N] {
    core::array::from_fn(|i| a[(idx[i] as usize) & (N - 1)])
}

#[inline(always)]
fn shift_left(lane: i32, count: u32) -> i32 {
    if count >= 32 {
        0
    } else {
        ((lane as u32) << count) as i32
    }
}

#[inline(always)]
fn shift_right(lane: i32, count: u32) -> i32 {
    if count >= 32 {
        0
    } else {
        ((lane as u32) >> count) as i32
    }
}

/// Integer-indefinite conversion of an already integral float
#[inline(always)]
fn integral_to_i32(x: f32) -> i32 {
    if x.is_nan() || !(-2_147_483_648.0..2_147_483_648.0).contains(&x) {
        i32::MIN
    } else {
        x as i32
    }
}

macro_rules! impl_register_kind {
    ($kind:ident, $tag:ident, $lane:ty, $reg:ident, $n:literal, $int:ident, $float:ident) => {
        impl RegisterKind for $kind {
            type Register = $reg<$lane>;
            type Lane = $lane;
            type Array = [$lane; $n];
            type Int = $int;
            type Float = $float;

            const KIND: Kind = Kind::$tag;

            #[inline(always)]
            fn splat(value: $lane) -> Self::Register {
                $reg([value; $n])
            }

            #[inline(always)]
            fn zero() -> Self::Register {
                $reg([<$lane as Lane>::ZERO; $n])
            }

            #[inline(always)]
            fn all_ones() -> Self::Register {
                $reg([mask_lane::<$lane>(true); $n])
            }

            #[inline(always)]
            fn from_array(lanes: [$lane; $n]) -> Self::Register {
                $reg(lanes)
            }

            #[inline(always)]
            fn to_array(reg: Self::Register) -> [$lane; $n] {
                reg.0
            }

            #[inline(always)]
            unsafe fn load_aligned(ptr: *const $lane) -> Self::Register {
                $reg(core::ptr::read(ptr as *const [$lane; $n]))
            }

            #[inline(always)]
            unsafe fn load_unaligned(ptr: *const $lane) -> Self::Register {
                $reg(core::ptr::read_unaligned(ptr as *const [$lane; $n]))
            }

            #[inline(always)]
            unsafe fn store_aligned(reg: Self::Register, ptr: *mut $lane) {
                core::ptr::write(ptr as *mut [$lane; $n], reg.0)
            }

            #[inline(always)]
            unsafe fn store_unaligned(reg: Self::Register, ptr: *mut $lane) {
                core::ptr::write_unaligned(ptr as *mut [$lane; $n], reg.0)
            }

            #[inline(always)]
            unsafe fn masked_load(ptr: *const $lane, mask: Self::Register) -> Self::Register {
                $reg(core::array::from_fn(|i| {
                    if sign_set(mask.0[i]) {
                        ptr.add(i).read_unaligned()
                    } else {
                        <$lane as Lane>::ZERO
                    }
                }))
            }

            #[inline(always)]
            unsafe fn masked_store(reg: Self::Register, ptr: *mut $lane, mask: Self::Register) {
                for i in 0..$n {
                    if sign_set(mask.0[i]) {
                        ptr.add(i).write_unaligned(reg.0[i]);
                    }
                }
            }

            #[inline(always)]
            fn add(a: Self::Register, b: Self::Register) -> Self::Register {
                $reg(zip(a.0, b.0, <$lane as PortableLane>::add))
            }

            #[inline(always)]
            fn sub(a: Self::Register, b: Self::Register) -> Self::Register {
                $reg(zip(a.0, b.0, <$lane as PortableLane>::sub))
            }

            #[inline(always)]
            fn mul(a: Self::Register, b: Self::Register) -> Self::Register {
                $reg(zip(a.0, b.0, <$lane as PortableLane>::mul))
            }

            #[inline(always)]
            fn neg(a: Self::Register) -> Self::Register {
                $reg(map(a.0, <$lane as PortableLane>::neg))
            }

            #[inline(always)]
            fn min(a: Self::Register, b: Self::Register) -> Self::Register {
                $reg(zip(a.0, b.0, lane_min))
            }

            #[inline(always)]
            fn max(a: Self::Register, b: Self::Register) -> Self::Register {
                $reg(zip(a.0, b.0, lane_max))
            }

            #[inline(always)]
            fn abs(a: Self::Register) -> Self::Register {
                $reg(map(a.0, <$lane as PortableLane>::abs))
            }

            #[inline(always)]
            fn cmp_eq(a: Self::Register, b: Self::Register) -> Self::Register {
                $reg(zip(a.0, b.0, |x, y| mask_lane(x == y)))
            }

            #[inline(always)]
            fn cmp_lt(a: Self::Register, b: Self::Register) -> Self::Register {
                $reg(zip(a.0, b.0, |x, y| mask_lane(x < y)))
            }

            #[inline(always)]
            fn and(a: Self::Register, b: Self::Register) -> Self::Register {
                $reg(bitwise(a.0, b.0, |x, y| x & y))
            }

            #[inline(always)]
            fn or(a: Self::Register, b: Self::Register) -> Self::Register {
                $reg(bitwise(a.0, b.0, |x, y| x | y))
            }

            #[inline(always)]
            fn xor(a: Self::Register, b: Self::Register) -> Self::Register {
                $reg(bitwise(a.0, b.0, |x, y| x ^ y))
            }

            #[inline(always)]
            fn andnot(a: Self::Register, b: Self::Register) -> Self::Register {
                $reg(bitwise(a.0, b.0, |x, y| !x & y))
            }

            #[inline(always)]
            fn blend(
                mask: Self::Register,
                if_set: Self::Register,
                if_clear: Self::Register,
            ) -> Self::Register {
                $reg(blend(mask.0, if_set.0, if_clear.0))
            }

            #[inline(always)]
            fn movemask(reg: Self::Register) -> u32 {
                movemask(reg.0)
            }

            #[inline(always)]
            fn hadd(a: Self::Register, b: Self::Register) -> Self::Register {
                $reg(pairwise(a.0, b.0, <$lane as PortableLane>::add))
            }

            #[inline(always)]
            fn hsub(a: Self::Register, b: Self::Register) -> Self::Register {
                $reg(pairwise(a.0, b.0, <$lane as PortableLane>::sub))
            }

            #[inline(always)]
            fn addsub(a: Self::Register, b: Self::Register) -> Self::Register {
                $reg(addsub(a.0, b.0))
            }

            #[inline(always)]
            fn unpack_lo(a: Self::Register, b: Self::Register) -> Self::Register {
                $reg(unpack(a.0, b.0, false))
            }

            #[inline(always)]
            fn unpack_hi(a: Self::Register, b: Self::Register) -> Self::Register {
                $reg(unpack(a.0, b.0, true))
            }

            #[inline(always)]
            fn shuffle2<const IMM: i32>(a: Self::Register, b: Self::Register) -> Self::Register {
                $reg(shuffle2(a.0, b.0, IMM))
            }

            #[inline(always)]
            fn permute(a: Self::Register, idx: $reg<i32>) -> Self::Register {
                $reg(permute(a.0, idx.0))
            }

            #[inline(always)]
            fn to_bits(a: Self::Register) -> $reg<i32> {
                $reg(map(a.0, |lane| Lane::to_bits(lane) as i32))
            }

            #[inline(always)]
            fn from_bits(bits: $reg<i32>) -> Self::Register {
                $reg(map(bits.0, |lane| <$lane as Lane>::from_bits(lane as u32)))
            }
        }
    };
}

impl_register_kind!(Int128, Int128, i32, Reg128, 4, Int128, Float128);
impl_register_kind!(Int256, Int256, i32, Reg256, 8, Int256, Float256);
impl_register_kind!(Float128, Float128, f32, Reg128, 4, Int128, Float128);
impl_register_kind!(Float256, Float256, f32, Reg256, 8, Int256, Float256);

macro_rules! impl_integer_kind {
    ($kind:ident, $reg:ident) => {
        impl IntegerKind for $kind {
            #[inline(always)]
            fn shl(a: Self::Register, count: u32) -> Self::Register {
                $reg(map(a.0, |lane| shift_left(lane, count)))
            }

            #[inline(always)]
            fn shr(a: Self::Register, count: u32) -> Self::Register {
                $reg(map(a.0, |lane| shift_right(lane, count)))
            }

            #[inline(always)]
            fn shl_lanes(a: Self::Register, counts: Self::Register) -> Self::Register {
                $reg(zip(a.0, counts.0, |lane, count| shift_left(lane, count as u32)))
            }

            #[inline(always)]
            fn shr_lanes(a: Self::Register, counts: Self::Register) -> Self::Register {
                $reg(zip(a.0, counts.0, |lane, count| shift_right(lane, count as u32)))
            }

            #[inline(always)]
            fn to_float(a: Self::Register) -> $reg<f32> {
                $reg(map(a.0, |lane| lane as f32))
            }
        }
    };
}

impl_integer_kind!(Int128, Reg128);
impl_integer_kind!(Int256, Reg256);

macro_rules! impl_float_kind {
    ($kind:ident, $reg:ident) => {
        impl FloatKind for $kind {
            #[inline(always)]
            fn div(a: Self::Register, b: Self::Register) -> Self::Register {
                $reg(zip(a.0, b.0, |x, y| x / y))
            }

            #[inline(always)]
            fn sqrt(a: Self::Register) -> Self::Register {
                $reg(map(a.0, libm::sqrtf))
            }

            #[inline(always)]
            fn reciprocal(a: Self::Register) -> Self::Register {
                $reg(map(a.0, |x| 1.0 / x))
            }

            #[inline(always)]
            fn reciprocal_sqrt(a: Self::Register) -> Self::Register {
                $reg(map(a.0, |x| 1.0 / libm::sqrtf(x)))
            }

            #[inline(always)]
            fn mul_add(a: Self::Register, b: Self::Register, c: Self::Register) -> Self::Register {
                $reg(core::array::from_fn(|i| libm::fmaf(a.0[i], b.0[i], c.0[i])))
            }

            #[inline(always)]
            fn floor(a: Self::Register) -> Self::Register {
                $reg(map(a.0, libm::floorf))
            }

            #[inline(always)]
            fn ceil(a: Self::Register) -> Self::Register {
                $reg(map(a.0, libm::ceilf))
            }

            #[inline(always)]
            fn truncate(a: Self::Register) -> Self::Register {
                $reg(map(a.0, libm::truncf))
            }

            #[inline(always)]
            fn round_even(a: Self::Register) -> Self::Register {
                $reg(map(a.0, libm::rintf))
            }

            #[inline(always)]
            fn to_int_nearest(a: Self::Register) -> $reg<i32> {
                $reg(map(a.0, |x| integral_to_i32(libm::rintf(x))))
            }

            #[inline(always)]
            fn to_int_truncate(a: Self::Register) -> $reg<i32> {
                $reg(map(a.0, |x| integral_to_i32(libm::truncf(x))))
            }
        }
    };
}

impl_float_kind!(Float128, Reg128);
impl_float_kind!(Float256, Reg256);

macro_rules! impl_width256 {
    ($kind:ident, $half:ident) => {
        impl Width256 for $kind {
            type Half = $half;

            #[inline(always)]
            fn low_half(a: Self::Register) -> <$half as RegisterKind>::Register {
                Reg128(core::array::from_fn(|i| a.0[i]))
            }

            #[inline(always)]
            fn high_half(a: Self::Register) -> <$half as RegisterKind>::Register {
                Reg128(core::array::from_fn(|i| a.0[i + 4]))
            }

            #[inline(always)]
            fn from_halves(
                low: <$half as RegisterKind>::Register,
                high: <$half as RegisterKind>::Register,
            ) -> Self::Register {
                Reg256(core::array::from_fn(|i| if i < 4 { low.0[i] } else { high.0[i - 4] }))
            }
        }
    };
}

impl_width256!(Int256, Int128);
impl_width256!(Float256, Float128);
