//! CPU capability detection and backend reporting
//!
//! Backend selection itself is compile-time only (see [`crate::backends`]).
//! This module answers two runtime questions: which backend was compiled in,
//! and whether the host CPU can actually execute it.

/// CPU Feature Detection Results
///
/// Represents the instruction set extensions the intrinsic backend relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CpuFeatures {
    /// SSE4.1 (x86_64): blends, rounding, 32-bit min/max/mullo
    pub has_sse41: bool,

    /// AVX (x86_64): 256-bit float ops, variable permutes
    pub has_avx: bool,

    /// AVX2 (x86_64): 256-bit integer ops, masked integer I/O, variable shifts
    pub has_avx2: bool,

    /// FMA3 (x86_64): fused multiply-add
    pub has_fma: bool,
}

impl CpuFeatures {
    /// Detect CPU features at runtime
    ///
    /// # Platform Behavior
    /// - **x86_64**: Runtime CPUID detection using `cpufeatures` crate
    /// - **other**: All fields `false`
    ///
    /// The first call executes CPUID; later calls hit the cache kept by
    /// `cpufeatures`.
    pub fn detect() -> Self {
        #[cfg(target_arch = "x86_64")]
        let features = {
            cpufeatures::new!(cpuid_sse41, "sse4.1");
            cpufeatures::new!(cpuid_avx, "avx");
            cpufeatures::new!(cpuid_avx2, "avx2");
            cpufeatures::new!(cpuid_fma, "fma");

            Self {
                has_sse41: cpuid_sse41::get(),
                has_avx: cpuid_avx::get(),
                has_avx2: cpuid_avx2::get(),
                has_fma: cpuid_fma::get(),
            }
        };

        #[cfg(not(target_arch = "x86_64"))]
        let features = Self::default();

        log::debug!(
            "detected cpu features: sse4.1={} avx={} avx2={} fma={}",
            features.has_sse41,
            features.has_avx,
            features.has_avx2,
            features.has_fma
        );
        features
    }

    /// True when every extension used by the intrinsic backend is present
    pub fn supports_intrinsic_backend(&self) -> bool {
        self.has_sse41 && self.has_avx && self.has_avx2 && self.has_fma
    }
}

/// Backend Type Enumeration
///
/// Represents the register backend compiled into this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// Lane-array emulation, always available
    Portable,

    /// AVX2/FMA intrinsics (x86_64)
    Avx2,
}

impl BackendType {
    /// Human-readable backend name
    pub fn name(&self) -> &'static str {
        match self {
            BackendType::Portable => "portable",
            BackendType::Avx2 => "avx2",
        }
    }

    /// Whether this backend can run on a CPU with `features`
    pub fn is_supported(&self, features: &CpuFeatures) -> bool {
        match self {
            BackendType::Portable => true,
            BackendType::Avx2 => features.supports_intrinsic_backend(),
        }
    }
}

/// Backend compiled into this build
pub const fn active_backend() -> BackendType {
    #[cfg(all(feature = "avx2", target_arch = "x86_64", not(feature = "force-portable")))]
    {
        BackendType::Avx2
    }

    #[cfg(not(all(feature = "avx2", target_arch = "x86_64", not(feature = "force-portable"))))]
    {
        BackendType::Portable
    }
}

/// Check the host against the compiled backend
///
/// Logs a warning and returns `false` when the intrinsic backend was
/// compiled in but the CPU lacks one of its extensions. Executing any vector
/// operation on such a host faults with an illegal instruction, so call this
/// once at startup.
pub fn warn_if_unsupported() -> bool {
    let backend = active_backend();
    let features = CpuFeatures::detect();
    let supported = backend.is_supported(&features);
    if !supported {
        log::warn!(
            "{} backend compiled in but host cpu lacks required features: {:?}",
            backend.name(),
            features
        );
    }
    supported
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::BACKEND_NAME;

    #[test]
    fn test_active_backend_matches_compiled_backend() {
        assert_eq!(active_backend().name(), BACKEND_NAME);
    }

    #[test]
    fn test_portable_always_supported() {
        assert!(BackendType::Portable.is_supported(&CpuFeatures::default()));
        assert!(!BackendType::Avx2.is_supported(&CpuFeatures::default()));
    }

    #[test]
    fn test_detect_is_stable() {
        assert_eq!(CpuFeatures::detect(), CpuFeatures::detect());
    }

    #[test]
    #[cfg(target_arch = "x86_64")]
    fn test_avx2_implies_avx() {
        let features = CpuFeatures::detect();
        if features.has_avx2 {
            assert!(features.has_avx && features.has_sse41);
        }
    }

    #[test]
    #[cfg(not(target_arch = "x86_64"))]
    fn test_no_x86_features_elsewhere() {
        assert_eq!(CpuFeatures::detect(), CpuFeatures::default());
    }

    #[test]
    #[cfg(not(all(feature = "avx2", target_arch = "x86_64", not(feature = "force-portable"))))]
    fn test_portable_build_never_warns() {
        assert!(warn_if_unsupported());
    }

    #[test]
    fn test_warn_if_unsupported_agrees_with_detection() {
        let expected = active_backend().is_supported(&CpuFeatures::detect());
        assert_eq!(warn_if_unsupported(), expected);
    }
}
