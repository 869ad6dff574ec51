//! AVX2 backend implementation (x86-64)
//!
//! Lowers every kind primitive to SSE4.1/AVX/AVX2/FMA intrinsics on the native
//! register types.
//!
//! **Note**: This backend assumes AVX2 and FMA are available when the `avx2`
//! feature is enabled. Runtime CPU detection is not performed here; see
//! [`crate::dispatch`] for a diagnostic check.

use crate::kind::{
    FloatKind, Float128, Float256, Int128, Int256, IntegerKind, Kind, RegisterKind, Width256,
};

use core::arch::x86_64::*;

const SIGN: f32 = -0.0;

impl RegisterKind for Int128 {
    type Register = __m128i;
    type Lane = i32;
    type Array = [i32; 4];
    type Int = Int128;
    type Float = Float128;

    const KIND: Kind = Kind::Int128;

    #[inline(always)]
    fn splat(value: i32) -> __m128i {
        unsafe { _mm_set1_epi32(value) }
    }

    #[inline(always)]
    fn zero() -> __m128i {
        unsafe { _mm_setzero_si128() }
    }

    #[inline(always)]
    fn all_ones() -> __m128i {
        unsafe { _mm_set1_epi32(-1) }
    }

    #[inline(always)]
    fn from_array(lanes: [i32; 4]) -> __m128i {
        unsafe { _mm_loadu_si128(lanes.as_ptr() as *const __m128i) }
    }

    #[inline(always)]
    fn to_array(reg: __m128i) -> [i32; 4] {
        let mut out = [0i32; 4];
        unsafe { _mm_storeu_si128(out.as_mut_ptr() as *mut __m128i, reg) };
        out
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const i32) -> __m128i {
        _mm_load_si128(ptr as *const __m128i)
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const i32) -> __m128i {
        _mm_loadu_si128(ptr as *const __m128i)
    }

    #[inline(always)]
    unsafe fn store_aligned(reg: __m128i, ptr: *mut i32) {
        _mm_store_si128(ptr as *mut __m128i, reg)
    }

    #[inline(always)]
    unsafe fn store_unaligned(reg: __m128i, ptr: *mut i32) {
        _mm_storeu_si128(ptr as *mut __m128i, reg)
    }

    #[inline(always)]
    unsafe fn masked_load(ptr: *const i32, mask: __m128i) -> __m128i {
        _mm_maskload_epi32(ptr, mask)
    }

    #[inline(always)]
    unsafe fn masked_store(reg: __m128i, ptr: *mut i32, mask: __m128i) {
        _mm_maskstore_epi32(ptr, mask, reg)
    }

    #[inline(always)]
    fn add(a: __m128i, b: __m128i) -> __m128i {
        unsafe { _mm_add_epi32(a, b) }
    }

    #[inline(always)]
    fn sub(a: __m128i, b: __m128i) -> __m128i {
        unsafe { _mm_sub_epi32(a, b) }
    }

    #[inline(always)]
    fn mul(a: __m128i, b: __m128i) -> __m128i {
        unsafe { _mm_mullo_epi32(a, b) }
    }

    #[inline(always)]
    fn neg(a: __m128i) -> __m128i {
        unsafe { _mm_sub_epi32(_mm_setzero_si128(), a) }
    }

    #[inline(always)]
    fn min(a: __m128i, b: __m128i) -> __m128i {
        unsafe { _mm_min_epi32(a, b) }
    }

    #[inline(always)]
    fn max(a: __m128i, b: __m128i) -> __m128i {
        unsafe { _mm_max_epi32(a, b) }
    }

    #[inline(always)]
    fn abs(a: __m128i) -> __m128i {
        unsafe { _mm_abs_epi32(a) }
    }

    #[inline(always)]
    fn cmp_eq(a: __m128i, b: __m128i) -> __m128i {
        unsafe { _mm_cmpeq_epi32(a, b) }
    }

    #[inline(always)]
    fn cmp_lt(a: __m128i, b: __m128i) -> __m128i {
        unsafe { _mm_cmplt_epi32(a, b) }
    }

    #[inline(always)]
    fn and(a: __m128i, b: __m128i) -> __m128i {
        unsafe { _mm_and_si128(a, b) }
    }

    #[inline(always)]
    fn or(a: __m128i, b: __m128i) -> __m128i {
        unsafe { _mm_or_si128(a, b) }
    }

    #[inline(always)]
    fn xor(a: __m128i, b: __m128i) -> __m128i {
        unsafe { _mm_xor_si128(a, b) }
    }

    #[inline(always)]
    fn andnot(a: __m128i, b: __m128i) -> __m128i {
        unsafe { _mm_andnot_si128(a, b) }
    }

    #[inline(always)]
    fn blend(mask: __m128i, if_set: __m128i, if_clear: __m128i) -> __m128i {
        // blendvps selects on the lane sign bit, blendvb would select per byte
        unsafe {
            _mm_castps_si128(_mm_blendv_ps(
                _mm_castsi128_ps(if_clear),
                _mm_castsi128_ps(if_set),
                _mm_castsi128_ps(mask),
            ))
        }
    }

    #[inline(always)]
    fn movemask(reg: __m128i) -> u32 {
        unsafe { _mm_movemask_ps(_mm_castsi128_ps(reg)) as u32 }
    }

    #[inline(always)]
    fn hadd(a: __m128i, b: __m128i) -> __m128i {
        unsafe { _mm_hadd_epi32(a, b) }
    }

    #[inline(always)]
    fn hsub(a: __m128i, b: __m128i) -> __m128i {
        unsafe { _mm_hsub_epi32(a, b) }
    }

    #[inline(always)]
    fn addsub(a: __m128i, b: __m128i) -> __m128i {
        unsafe { _mm_blend_epi32::<0b1010>(_mm_sub_epi32(a, b), _mm_add_epi32(a, b)) }
    }

    #[inline(always)]
    fn unpack_lo(a: __m128i, b: __m128i) -> __m128i {
        unsafe { _mm_unpacklo_epi32(a, b) }
    }

    #[inline(always)]
    fn unpack_hi(a: __m128i, b: __m128i) -> __m128i {
        unsafe { _mm_unpackhi_epi32(a, b) }
    }

    #[inline(always)]
    fn shuffle2<const IMM: i32>(a: __m128i, b: __m128i) -> __m128i {
        unsafe {
            _mm_castps_si128(_mm_shuffle_ps::<IMM>(
                _mm_castsi128_ps(a),
                _mm_castsi128_ps(b),
            ))
        }
    }

    #[inline(always)]
    fn permute(a: __m128i, idx: __m128i) -> __m128i {
        unsafe { _mm_castps_si128(_mm_permutevar_ps(_mm_castsi128_ps(a), idx)) }
    }

    #[inline(always)]
    fn to_bits(a: __m128i) -> __m128i {
        a
    }

    #[inline(always)]
    fn from_bits(bits: __m128i) -> __m128i {
        bits
    }
}

impl IntegerKind for Int128 {
    #[inline(always)]
    fn shl(a: __m128i, count: u32) -> __m128i {
        unsafe { _mm_sll_epi32(a, _mm_cvtsi32_si128(count as i32)) }
    }

    #[inline(always)]
    fn shr(a: __m128i, count: u32) -> __m128i {
        unsafe { _mm_srl_epi32(a, _mm_cvtsi32_si128(count as i32)) }
    }

    #[inline(always)]
    fn shl_lanes(a: __m128i, counts: __m128i) -> __m128i {
        unsafe { _mm_sllv_epi32(a, counts) }
    }

    #[inline(always)]
    fn shr_lanes(a: __m128i, counts: __m128i) -> __m128i {
        unsafe { _mm_srlv_epi32(a, counts) }
    }

    #[inline(always)]
    fn to_float(a: __m128i) -> __m128 {
        unsafe { _mm_cvtepi32_ps(a) }
    }
}

impl RegisterKind for Float128 {
    type Register = __m128;
    type Lane = f32;
    type Array = [f32; 4];
    type Int = Int128;
    type Float = Float128;

    const KIND: Kind = Kind::Float128;

    #[inline(always)]
    fn splat(value: f32) -> __m128 {
        unsafe { _mm_set1_ps(value) }
    }

    #[inline(always)]
    fn zero() -> __m128 {
        unsafe { _mm_setzero_ps() }
    }

    #[inline(always)]
    fn all_ones() -> __m128 {
        unsafe { _mm_castsi128_ps(_mm_set1_epi32(-1)) }
    }

    #[inline(always)]
    fn from_array(lanes: [f32; 4]) -> __m128 {
        unsafe { _mm_loadu_ps(lanes.as_ptr()) }
    }

    #[inline(always)]
    fn to_array(reg: __m128) -> [f32; 4] {
        let mut out = [0.0f32; 4];
        unsafe { _mm_storeu_ps(out.as_mut_ptr(), reg) };
        out
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f32) -> __m128 {
        _mm_load_ps(ptr)
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f32) -> __m128 {
        _mm_loadu_ps(ptr)
    }

    #[inline(always)]
    unsafe fn store_aligned(reg: __m128, ptr: *mut f32) {
        _mm_store_ps(ptr, reg)
    }

    #[inline(always)]
    unsafe fn store_unaligned(reg: __m128, ptr: *mut f32) {
        _mm_storeu_ps(ptr, reg)
    }

    #[inline(always)]
    unsafe fn masked_load(ptr: *const f32, mask: __m128) -> __m128 {
        _mm_maskload_ps(ptr, _mm_castps_si128(mask))
    }

    #[inline(always)]
    unsafe fn masked_store(reg: __m128, ptr: *mut f32, mask: __m128) {
        _mm_maskstore_ps(ptr, _mm_castps_si128(mask), reg)
    }

    #[inline(always)]
    fn add(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_add_ps(a, b) }
    }

    #[inline(always)]
    fn sub(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_sub_ps(a, b) }
    }

    #[inline(always)]
    fn mul(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_mul_ps(a, b) }
    }

    #[inline(always)]
    fn neg(a: __m128) -> __m128 {
        unsafe { _mm_xor_ps(a, _mm_set1_ps(SIGN)) }
    }

    #[inline(always)]
    fn min(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_min_ps(a, b) }
    }

    #[inline(always)]
    fn max(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_max_ps(a, b) }
    }

    #[inline(always)]
    fn abs(a: __m128) -> __m128 {
        unsafe { _mm_andnot_ps(_mm_set1_ps(SIGN), a) }
    }

    #[inline(always)]
    fn cmp_eq(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_cmpeq_ps(a, b) }
    }

    #[inline(always)]
    fn cmp_lt(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_cmplt_ps(a, b) }
    }

    #[inline(always)]
    fn and(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_and_ps(a, b) }
    }

    #[inline(always)]
    fn or(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_or_ps(a, b) }
    }

    #[inline(always)]
    fn xor(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_xor_ps(a, b) }
    }

    #[inline(always)]
    fn andnot(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_andnot_ps(a, b) }
    }

    #[inline(always)]
    fn blend(mask: __m128, if_set: __m128, if_clear: __m128) -> __m128 {
        unsafe { _mm_blendv_ps(if_clear, if_set, mask) }
    }

    #[inline(always)]
    fn movemask(reg: __m128) -> u32 {
        unsafe { _mm_movemask_ps(reg) as u32 }
    }

    #[inline(always)]
    fn hadd(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_hadd_ps(a, b) }
    }

    #[inline(always)]
    fn hsub(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_hsub_ps(a, b) }
    }

    #[inline(always)]
    fn addsub(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_addsub_ps(a, b) }
    }

    #[inline(always)]
    fn unpack_lo(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_unpacklo_ps(a, b) }
    }

    #[inline(always)]
    fn unpack_hi(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_unpackhi_ps(a, b) }
    }

    #[inline(always)]
    fn shuffle2<const IMM: i32>(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_shuffle_ps::<IMM>(a, b) }
    }

    #[inline(always)]
    fn permute(a: __m128, idx: __m128i) -> __m128 {
        unsafe { _mm_permutevar_ps(a, idx) }
    }

    #[inline(always)]
    fn to_bits(a: __m128) -> __m128i {
        unsafe { _mm_castps_si128(a) }
    }

    #[inline(always)]
    fn from_bits(bits: __m128i) -> __m128 {
        unsafe { _mm_castsi128_ps(bits) }
    }
}

impl FloatKind for Float128 {
    #[inline(always)]
    fn div(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_div_ps(a, b) }
    }

    #[inline(always)]
    fn sqrt(a: __m128) -> __m128 {
        unsafe { _mm_sqrt_ps(a) }
    }

    #[inline(always)]
    fn reciprocal(a: __m128) -> __m128 {
        unsafe { _mm_rcp_ps(a) }
    }

    #[inline(always)]
    fn reciprocal_sqrt(a: __m128) -> __m128 {
        unsafe { _mm_rsqrt_ps(a) }
    }

    #[inline(always)]
    fn mul_add(a: __m128, b: __m128, c: __m128) -> __m128 {
        unsafe { _mm_fmadd_ps(a, b, c) }
    }

    #[inline(always)]
    fn floor(a: __m128) -> __m128 {
        unsafe { _mm_floor_ps(a) }
    }

    #[inline(always)]
    fn ceil(a: __m128) -> __m128 {
        unsafe { _mm_ceil_ps(a) }
    }

    #[inline(always)]
    fn truncate(a: __m128) -> __m128 {
        unsafe { _mm_round_ps::<{ _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC }>(a) }
    }

    #[inline(always)]
    fn round_even(a: __m128) -> __m128 {
        unsafe { _mm_round_ps::<{ _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC }>(a) }
    }

    #[inline(always)]
    fn to_int_nearest(a: __m128) -> __m128i {
        unsafe { _mm_cvtps_epi32(a) }
    }

    #[inline(always)]
    fn to_int_truncate(a: __m128) -> __m128i {
        unsafe { _mm_cvttps_epi32(a) }
    }
}

impl RegisterKind for Int256 {
    type Register = __m256i;
    type Lane = i32;
    type Array = [i32; 8];
    type Int = Int256;
    type Float = Float256;

    const KIND: Kind = Kind::Int256;

    #[inline(always)]
    fn splat(value: i32) -> __m256i {
        unsafe { _mm256_set1_epi32(value) }
    }

    #[inline(always)]
    fn zero() -> __m256i {
        unsafe { _mm256_setzero_si256() }
    }

    #[inline(always)]
    fn all_ones() -> __m256i {
        unsafe { _mm256_set1_epi32(-1) }
    }

    #[inline(always)]
    fn from_array(lanes: [i32; 8]) -> __m256i {
        unsafe { _mm256_loadu_si256(lanes.as_ptr() as *const __m256i) }
    }

    #[inline(always)]
    fn to_array(reg: __m256i) -> [i32; 8] {
        let mut out = [0i32; 8];
        unsafe { _mm256_storeu_si256(out.as_mut_ptr() as *mut __m256i, reg) };
        out
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const i32) -> __m256i {
        _mm256_load_si256(ptr as *const __m256i)
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const i32) -> __m256i {
        _mm256_loadu_si256(ptr as *const __m256i)
    }

    #[inline(always)]
    unsafe fn store_aligned(reg: __m256i, ptr: *mut i32) {
        _mm256_store_si256(ptr as *mut __m256i, reg)
    }

    #[inline(always)]
    unsafe fn store_unaligned(reg: __m256i, ptr: *mut i32) {
        _mm256_storeu_si256(ptr as *mut __m256i, reg)
    }

    #[inline(always)]
    unsafe fn masked_load(ptr: *const i32, mask: __m256i) -> __m256i {
        _mm256_maskload_epi32(ptr, mask)
    }

    #[inline(always)]
    unsafe fn masked_store(reg: __m256i, ptr: *mut i32, mask: __m256i) {
        _mm256_maskstore_epi32(ptr, mask, reg)
    }

    #[inline(always)]
    fn add(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_add_epi32(a, b) }
    }

    #[inline(always)]
    fn sub(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_sub_epi32(a, b) }
    }

    #[inline(always)]
    fn mul(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_mullo_epi32(a, b) }
    }

    #[inline(always)]
    fn neg(a: __m256i) -> __m256i {
        unsafe { _mm256_sub_epi32(_mm256_setzero_si256(), a) }
    }

    #[inline(always)]
    fn min(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_min_epi32(a, b) }
    }

    #[inline(always)]
    fn max(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_max_epi32(a, b) }
    }

    #[inline(always)]
    fn abs(a: __m256i) -> __m256i {
        unsafe { _mm256_abs_epi32(a) }
    }

    #[inline(always)]
    fn cmp_eq(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_cmpeq_epi32(a, b) }
    }

    #[inline(always)]
    fn cmp_lt(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_cmpgt_epi32(b, a) }
    }

    #[inline(always)]
    fn and(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_and_si256(a, b) }
    }

    #[inline(always)]
    fn or(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_or_si256(a, b) }
    }

    #[inline(always)]
    fn xor(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_xor_si256(a, b) }
    }

    #[inline(always)]
    fn andnot(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_andnot_si256(a, b) }
    }

    #[inline(always)]
    fn blend(mask: __m256i, if_set: __m256i, if_clear: __m256i) -> __m256i {
        unsafe {
            _mm256_castps_si256(_mm256_blendv_ps(
                _mm256_castsi256_ps(if_clear),
                _mm256_castsi256_ps(if_set),
                _mm256_castsi256_ps(mask),
            ))
        }
    }

    #[inline(always)]
    fn movemask(reg: __m256i) -> u32 {
        unsafe { _mm256_movemask_ps(_mm256_castsi256_ps(reg)) as u32 }
    }

    #[inline(always)]
    fn hadd(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_hadd_epi32(a, b) }
    }

    #[inline(always)]
    fn hsub(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_hsub_epi32(a, b) }
    }

    #[inline(always)]
    fn addsub(a: __m256i, b: __m256i) -> __m256i {
        unsafe {
            _mm256_blend_epi32::<0b1010_1010>(_mm256_sub_epi32(a, b), _mm256_add_epi32(a, b))
        }
    }

    #[inline(always)]
    fn unpack_lo(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_unpacklo_epi32(a, b) }
    }

    #[inline(always)]
    fn unpack_hi(a: __m256i, b: __m256i) -> __m256i {
        unsafe { _mm256_unpackhi_epi32(a, b) }
    }

    #[inline(always)]
    fn shuffle2<const IMM: i32>(a: __m256i, b: __m256i) -> __m256i {
        unsafe {
            _mm256_castps_si256(_mm256_shuffle_ps::<IMM>(
                _mm256_castsi256_ps(a),
                _mm256_castsi256_ps(b),
            ))
        }
    }

    #[inline(always)]
    fn permute(a: __m256i, idx: __m256i) -> __m256i {
        unsafe { _mm256_permutevar8x32_epi32(a, idx) }
    }

    #[inline(always)]
    fn to_bits(a: __m256i) -> __m256i {
        a
    }

    #[inline(always)]
    fn from_bits(bits: __m256i) -> __m256i {
        bits
    }
}

impl IntegerKind for Int256 {
    #[inline(always)]
    fn shl(a: __m256i, count: u32) -> __m256i {
        unsafe { _mm256_sll_epi32(a, _mm_cvtsi32_si128(count as i32)) }
    }

    #[inline(always)]
    fn shr(a: __m256i, count: u32) -> __m256i {
        unsafe { _mm256_srl_epi32(a, _mm_cvtsi32_si128(count as i32)) }
    }

    #[inline(always)]
    fn shl_lanes(a: __m256i, counts: __m256i) -> __m256i {
        unsafe { _mm256_sllv_epi32(a, counts) }
    }

    #[inline(always)]
    fn shr_lanes(a: __m256i, counts: __m256i) -> __m256i {
        unsafe { _mm256_srlv_epi32(a, counts) }
    }

    #[inline(always)]
    fn to_float(a: __m256i) -> __m256 {
        unsafe { _mm256_cvtepi32_ps(a) }
    }
}

impl Width256 for Int256 {
    type Half = Int128;

    #[inline(always)]
    fn low_half(a: __m256i) -> __m128i {
        unsafe { _mm256_castsi256_si128(a) }
    }

    #[inline(always)]
    fn high_half(a: __m256i) -> __m128i {
        unsafe { _mm256_extracti128_si256::<1>(a) }
    }

    #[inline(always)]
    fn from_halves(low: __m128i, high: __m128i) -> __m256i {
        unsafe { _mm256_set_m128i(high, low) }
    }
}

impl RegisterKind for Float256 {
    type Register = __m256;
    type Lane = f32;
    type Array = [f32; 8];
    type Int = Int256;
    type Float = Float256;

    const KIND: Kind = Kind::Float256;

    #[inline(always)]
    fn splat(value: f32) -> __m256 {
        unsafe { _mm256_set1_ps(value) }
    }

    #[inline(always)]
    fn zero() -> __m256 {
        unsafe { _mm256_setzero_ps() }
    }

    #[inline(always)]
    fn all_ones() -> __m256 {
        unsafe { _mm256_castsi256_ps(_mm256_set1_epi32(-1)) }
    }

    #[inline(always)]
    fn from_array(lanes: [f32; 8]) -> __m256 {
        unsafe { _mm256_loadu_ps(lanes.as_ptr()) }
    }

    #[inline(always)]
    fn to_array(reg: __m256) -> [f32; 8] {
        let mut out = [0.0f32; 8];
        unsafe { _mm256_storeu_ps(out.as_mut_ptr(), reg) };
        out
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f32) -> __m256 {
        _mm256_load_ps(ptr)
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f32) -> __m256 {
        _mm256_loadu_ps(ptr)
    }

    #[inline(always)]
    unsafe fn store_aligned(reg: __m256, ptr: *mut f32) {
        _mm256_store_ps(ptr, reg)
    }

    #[inline(always)]
    unsafe fn store_unaligned(reg: __m256, ptr: *mut f32) {
        _mm256_storeu_ps(ptr, reg)
    }

    #[inline(always)]
    unsafe fn masked_load(ptr: *const f32, mask: __m256) -> __m256 {
        _mm256_maskload_ps(ptr, _mm256_castps_si256(mask))
    }

    #[inline(always)]
    unsafe fn masked_store(reg: __m256, ptr: *mut f32, mask: __m256) {
        _mm256_maskstore_ps(ptr, _mm256_castps_si256(mask), reg)
    }

    #[inline(always)]
    fn add(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_add_ps(a, b) }
    }

    #[inline(always)]
    fn sub(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_sub_ps(a, b) }
    }

    #[inline(always)]
    fn mul(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_mul_ps(a, b) }
    }

    #[inline(always)]
    fn neg(a: __m256) -> __m256 {
        unsafe { _mm256_xor_ps(a, _mm256_set1_ps(SIGN)) }
    }

    #[inline(always)]
    fn min(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_min_ps(a, b) }
    }

    #[inline(always)]
    fn max(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_max_ps(a, b) }
    }

    #[inline(always)]
    fn abs(a: __m256) -> __m256 {
        unsafe { _mm256_andnot_ps(_mm256_set1_ps(SIGN), a) }
    }

    #[inline(always)]
    fn cmp_eq(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_cmp_ps::<_CMP_EQ_OQ>(a, b) }
    }

    #[inline(always)]
    fn cmp_lt(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_cmp_ps::<_CMP_LT_OQ>(a, b) }
    }

    #[inline(always)]
    fn and(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_and_ps(a, b) }
    }

    #[inline(always)]
    fn or(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_or_ps(a, b) }
    }

    #[inline(always)]
    fn xor(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_xor_ps(a, b) }
    }

    #[inline(always)]
    fn andnot(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_andnot_ps(a, b) }
    }

    #[inline(always)]
    fn blend(mask: __m256, if_set: __m256, if_clear: __m256) -> __m256 {
        unsafe { _mm256_blendv_ps(if_clear, if_set, mask) }
    }

    #[inline(always)]
    fn movemask(reg: __m256) -> u32 {
        unsafe { _mm256_movemask_ps(reg) as u32 }
    }

    #[inline(always)]
    fn hadd(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_hadd_ps(a, b) }
    }

    #[inline(always)]
    fn hsub(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_hsub_ps(a, b) }
    }

    #[inline(always)]
    fn addsub(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_addsub_ps(a, b) }
    }

    #[inline(always)]
    fn unpack_lo(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_unpacklo_ps(a, b) }
    }

    #[inline(always)]
    fn unpack_hi(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_unpackhi_ps(a, b) }
    }

    #[inline(always)]
    fn shuffle2<const IMM: i32>(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_shuffle_ps::<IMM>(a, b) }
    }

    #[inline(always)]
    fn permute(a: __m256, idx: __m256i) -> __m256 {
        unsafe { _mm256_permutevar8x32_ps(a, idx) }
    }

    #[inline(always)]
    fn to_bits(a: __m256) -> __m256i {
        unsafe { _mm256_castps_si256(a) }
    }

    #[inline(always)]
    fn from_bits(bits: __m256i) -> __m256 {
        unsafe { _mm256_castsi256_ps(bits) }
    }
}

impl FloatKind for Float256 {
    #[inline(always)]
    fn div(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_div_ps(a, b) }
    }

    #[inline(always)]
    fn sqrt(a: __m256) -> __m256 {
        unsafe { _mm256_sqrt_ps(a) }
    }

    #[inline(always)]
    fn reciprocal(a: __m256) -> __m256 {
        unsafe { _mm256_rcp_ps(a) }
    }

    #[inline(always)]
    fn reciprocal_sqrt(a: __m256) -> __m256 {
        unsafe { _mm256_rsqrt_ps(a) }
    }

    #[inline(always)]
    fn mul_add(a: __m256, b: __m256, c: __m256) -> __m256 {
        unsafe { _mm256_fmadd_ps(a, b, c) }
    }

    #[inline(always)]
    fn floor(a: __m256) -> __m256 {
        unsafe { _mm256_floor_ps(a) }
    }

    #[inline(always)]
    fn ceil(a: __m256) -> __m256 {
        unsafe { _mm256_ceil_ps(a) }
    }

    #[inline(always)]
    fn truncate(a: __m256) -> __m256 {
        unsafe { _mm256_round_ps::<{ _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC }>(a) }
    }

    #[inline(always)]
    fn round_even(a: __m256) -> __m256 {
        unsafe { _mm256_round_ps::<{ _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC }>(a) }
    }

    #[inline(always)]
    fn to_int_nearest(a: __m256) -> __m256i {
        unsafe { _mm256_cvtps_epi32(a) }
    }

    #[inline(always)]
    fn to_int_truncate(a: __m256) -> __m256i {
        unsafe { _mm256_cvttps_epi32(a) }
    }
}

impl Width256 for Float256 {
    type Half = Float128;

    #[inline(always)]
    fn low_half(a: __m256) -> __m128 {
        unsafe { _mm256_castps256_ps128(a) }
    }

    #[inline(always)]
    fn high_half(a: __m256) -> __m128 {
        unsafe { _mm256_extractf128_ps::<1>(a) }
    }

    #[inline(always)]
    fn from_halves(low: __m128, high: __m128) -> __m256 {
        unsafe { _mm256_set_m128(high, low) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests assume AVX2 is available when compiled with the avx2 feature

    #[test]
    fn test_avx2_int_arithmetic() {
        let a = Int256::from_array([1, 2, 3, 4, 5, 6, 7, 8]);
        let b = Int256::splat(10);
        assert_eq!(
            Int256::to_array(Int256::add(a, b)),
            [11, 12, 13, 14, 15, 16, 17, 18]
        );
        assert_eq!(Int256::to_array(Int256::cmp_lt(a, Int256::splat(3)))[..3], [-1, -1, 0]);
    }

    #[test]
    fn test_avx2_blend_uses_sign_bit() {
        let mask = Int128::from_array([i32::MIN, 0, -1, 0x7FFF_FFFF]);
        let picked = Int128::blend(mask, Int128::splat(1), Int128::splat(2));
        assert_eq!(Int128::to_array(picked), [1, 2, 1, 2]);
    }

    #[test]
    fn test_avx2_shift_count_not_masked() {
        let a = Int128::splat(-1);
        assert_eq!(Int128::to_array(Int128::shl(a, 32)), [0; 4]);
        assert_eq!(Int128::to_array(Int128::shr(a, 31)), [1; 4]);
    }

    #[test]
    fn test_avx2_halves() {
        let v = Float256::from_array([0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        let low = Float256::low_half(v);
        let high = Float256::high_half(v);
        assert_eq!(Float128::to_array(high), [4.0, 5.0, 6.0, 7.0]);
        assert_eq!(
            Float256::to_array(Float256::from_halves(high, low)),
            [4.0, 5.0, 6.0, 7.0, 0.0, 1.0, 2.0, 3.0]
        );
    }
}
