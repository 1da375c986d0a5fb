//! Platform setup: per-ISA canonical qNaN payload and NaN-propagation
//! scheme selection.

/// Canonical quiet NaN for binary32 (positive, quiet, zero payload).
pub const CANONICAL_QNAN_F32: u32 = 0x7fc0_0000;
/// Canonical quiet NaN for binary64 (positive, quiet, zero payload).
pub const CANONICAL_QNAN_F64: u64 = 0x7ff8_0000_0000_0000;

/// Target instruction-set architecture being emulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    RiscV,
    X86,
    Arm,
}

/// How NaN outputs are produced from NaN-free-or-not operand sets.
///
/// All three emulated platforms canonicalize: every NaN output lane is
/// replaced with the platform's canonical qNaN, discarding any operand
/// payload, matching `original_source`'s unconditional
/// `stdx::where(c != c, c) = vqnan32;` in `simd_float.cpp` (its
/// payload-propagating `SetupToArm`/`SetupToX86` paths are marked
/// "currently not implemented" in `vfpu.h` and were never wired to any
/// arithmetic). There is a single variant rather than one per platform
/// because there is only one behavior to select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NanPropagationScheme {
    Canonical,
}

/// Per-platform configuration bundle applied atomically by
/// [`crate::engine::Engine::configure_platform`].
#[derive(Debug, Clone, Copy)]
pub struct PlatformConfig {
    pub qnan32: u32,
    pub qnan64: u64,
    pub nan_prop_scheme: NanPropagationScheme,
    pub invalid_fma: bool,
}

impl Platform {
    /// Resolve the configuration bundle for this platform.
    ///
    /// Grounded in `original_source`'s `Vfpu::SetupToRiscv/SetupToArm/
    /// SetupToX86`: all three platforms share the same canonical qNaN
    /// bit-pattern (the ISA manuals agree on the encoding) and the same
    /// NaN-propagation behavior, and the same invalid-FMA policy (all
    /// default `true` here, matching `Vfpu`'s default member
    /// initializer). `Platform` stays a three-way enum because callers
    /// reason about "which ISA am I emulating", even though `config()`
    /// currently resolves all three to identical qNaN/NaN-scheme values.
    pub fn config(self) -> PlatformConfig {
        let invalid_fma = match self {
            Platform::RiscV | Platform::X86 | Platform::Arm => true,
        };
        PlatformConfig {
            qnan32: CANONICAL_QNAN_F32,
            qnan64: CANONICAL_QNAN_F64,
            nan_prop_scheme: NanPropagationScheme::Canonical,
            invalid_fma,
        }
    }
}
