//! Register backends
//!
//! Exactly one backend implements the kind traits per build, selected at
//! compile time via cargo features:
//!
//! - `x86`: AVX2/FMA intrinsics over `__m128i`, `__m256i`, `__m128`, `__m256`.
//!   Active with the `avx2` feature on x86_64. Assumes the CPU supports AVX2
//!   and FMA; build with `-C target-feature=+avx2,+fma` (or
//!   `target-cpu=native`) so the intrinsics inline.
//! - `portable`: lane arrays with identical layout and bit-exact semantics.
//!   Used everywhere else, and always when `force-portable` is set. Enabling
//!   `avx2` on a non-x86_64 target silently falls back to this backend.

#[cfg(all(feature = "avx2", target_arch = "x86_64", not(feature = "force-portable")))]
pub mod x86;

#[cfg(not(all(feature = "avx2", target_arch = "x86_64", not(feature = "force-portable"))))]
pub mod portable;

/// Name of the backend compiled into this build
#[cfg(all(feature = "avx2", target_arch = "x86_64", not(feature = "force-portable")))]
pub const BACKEND_NAME: &str = "avx2";

/// Name of the backend compiled into this build
#[cfg(not(all(feature = "avx2", target_arch = "x86_64", not(feature = "force-portable"))))]
pub const BACKEND_NAME: &str = "portable";

