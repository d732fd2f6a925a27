//! CPU feature detection for runtime SIMD dispatch.
//!
//! Detection runs once on first use and is cached for the lifetime of the
//! process. Use these functions instead of `is_x86_feature_detected!`
//! directly to avoid repeated CPUID calls on hot paths.

use std::sync::OnceLock;

/// CPU feature flags detected once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct X86Features {
    pub sse4_1: bool,
    pub avx: bool,
    pub avx2: bool,
}

static FEATURES: OnceLock<X86Features> = OnceLock::new();

/// Get cached CPU features (detected once on first call).
#[cfg(target_arch = "x86_64")]
#[inline]
pub fn get() -> X86Features {
    *FEATURES.get_or_init(|| X86Features {
        sse4_1: is_x86_feature_detected!("sse4.1"),
        avx: is_x86_feature_detected!("avx"),
        avx2: is_x86_feature_detected!("avx2"),
    })
}

/// Get cached CPU features - stub for non-x86 platforms.
#[cfg(not(target_arch = "x86_64"))]
#[inline]
pub fn get() -> X86Features {
    *FEATURES.get_or_init(|| X86Features {
        sse4_1: false,
        avx: false,
        avx2: false,
    })
}

/// Check if SSE4.1 is available.
#[inline]
pub fn has_sse4_1() -> bool {
    get().sse4_1
}

/// Check if AVX2 (and therefore AVX) is available.
#[inline]
pub fn has_avx2() -> bool {
    let f = get();
    f.avx && f.avx2
}
