#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(clippy::all)]

//! solid-simd: typed 128/256-bit SIMD vectors over packed `i32` and `f32`
//!
//! One generic value type, [`Vector<K>`], wraps exactly one hardware register
//! of kind `K` ([`Int128`], [`Int256`], [`Float128`] or [`Float256`]) and
//! lowers every operation to the matching instruction sequence at compile
//! time. Operations that a kind has no instruction for are not available on
//! it: integer division, float bitwise operators, integer rounding and float
//! bit counting all fail to compile.
//!
//! # Features
//!
//! - **Kind classifier**: [`Kind`], [`RegisterKind`] and [`classify`] answer
//!   "integer or float" and "128 or 256 bits" for any supported register
//! - **Distinct masks**: comparisons return [`Mask<K>`], consumed by
//!   [`Vector::select`] and the masked memory operations
//! - **Compile-time backend selection**: AVX2 intrinsics via the `avx2`
//!   feature, a bit-exact portable backend otherwise
//! - **No allocations**: `no_std`, registers are plain values
//!
//! # Quick Start
//!
//! ```rust
//! use solid_simd::{Int128, Vector};
//!
//! let a = Vector::<Int128>::set(1, 5, 3, 9);
//! let b = Vector::<Int128>::set(4, 2, 6, 0);
//!
//! assert_eq!(a.min(b).to_array(), [1, 2, 3, 0]);
//! assert_eq!(a.simd_gt(b).to_bitmask(), 0b1010);
//! assert_eq!(a.horizontal_sum(), 18);
//! ```

#[cfg(test)]
extern crate std;

// Register kinds and the primitive traits backends implement
pub mod kind;

// Backend implementations
pub mod backends;

// Generic vector wrapper
pub mod vector;

// Lane masks
pub mod mask;

// Over-aligned buffers
pub mod aligned;

// Errors for the fallible slice APIs
pub mod error;

// Runtime CPU feature detection
pub mod dispatch;

pub use aligned::Aligned;
pub use error::SimdError;
pub use kind::{
    classify, Float128, Float256, FloatKind, Int128, Int256, IntegerKind, Kind, Lane,
    RegisterKind, SimdRegister, Width128, Width256,
};
pub use mask::Mask;
pub use vector::lanes::shuffle_control;
pub use vector::Vector;

/// 4 × i32
pub type I32x4 = Vector<Int128>;
/// 8 × i32
pub type I32x8 = Vector<Int256>;
/// 4 × f32
pub type F32x4 = Vector<Float128>;
/// 8 × f32
pub type F32x8 = Vector<Float256>;
