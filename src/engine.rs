//! Engine lifecycle: configuration, sticky-flag access, and the six
//! vector entry points.
//!
//! Grounded on the teacher's top-level `Emulator` struct (construct, then
//! drive via methods) and `Fpu::execute_full`'s "compute once, derive
//! flags" shape — the body is entirely new since the teacher's was
//! RV32-ELF-loading specific.

use crate::flags::FpFlags;
use crate::ops;
use crate::platform::{NanPropagationScheme, Platform};
use crate::rounding::RoundingMode;
use crate::scalar::ApBridge;
use crate::simd::VectorWidth;

/// Per-width bridge from [`Engine`]'s configuration to the concrete
/// qNaN payload and minimum-normal threshold used by the vector drivers.
pub trait EngineFloat: VectorWidth + ApBridge + PartialOrd {
    /// Current canonical qNaN for this width, per `engine`'s platform.
    fn qnan(engine: &Engine) -> Self;
    /// Smallest positive normal value for this width (the `vmin<W>`
    /// underflow boundary).
    fn min_normal() -> Self;
    /// Directed-rounding scalar square root; see `crate::scalar`.
    fn sqrt_scalar(a: Self, rm: crate::rounding::RoundingMode, flags: &mut FpFlags) -> Self;
}

impl EngineFloat for f32 {
    #[inline]
    fn qnan(engine: &Engine) -> f32 {
        f32::from_bits(engine.qnan32)
    }
    #[inline]
    fn min_normal() -> f32 {
        f32::MIN_POSITIVE
    }
    #[inline]
    fn sqrt_scalar(a: f32, rm: crate::rounding::RoundingMode, flags: &mut FpFlags) -> f32 {
        crate::scalar::sqrt_f32(a, rm, flags)
    }
}

impl EngineFloat for f64 {
    #[inline]
    fn qnan(engine: &Engine) -> f64 {
        f64::from_bits(engine.qnan64)
    }
    #[inline]
    fn min_normal() -> f64 {
        f64::MIN_POSITIVE
    }
    #[inline]
    fn sqrt_scalar(a: f64, rm: crate::rounding::RoundingMode, flags: &mut FpFlags) -> f64 {
        crate::scalar::sqrt_f64(a, rm, flags)
    }
}

/// A single emulated FPU instance: sticky flags, rounding mode, and
/// platform configuration, plus the six vectorized arithmetic entry
/// points.
///
/// `Send` (no reason a caller couldn't move one to another thread) but
/// deliberately not `Sync` — there is no interior synchronization, so
/// sharing one instance across threads without external locking is a
/// caller error, matching the single-scalar-resource, sequential-access
/// model described for this crate.
#[derive(Debug, Clone)]
pub struct Engine {
    flags: FpFlags,
    rounding_mode: RoundingMode,
    platform: Platform,
    pub(crate) qnan32: u32,
    pub(crate) qnan64: u64,
    nan_prop_scheme: NanPropagationScheme,
    invalid_fma: bool,
    tininess_before_rounding: bool,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

impl Engine {
    /// A new engine defaulted to the RISC-V platform and
    /// round-ties-to-even, with all sticky flags clear.
    pub fn new() -> Self {
        let mut engine = Engine {
            flags: FpFlags::empty(),
            rounding_mode: RoundingMode::TiesToEven,
            platform: Platform::RiscV,
            qnan32: 0,
            qnan64: 0,
            nan_prop_scheme: NanPropagationScheme::Canonical,
            invalid_fma: true,
            tininess_before_rounding: false,
        };
        engine.configure_platform(Platform::RiscV);
        engine
    }

    /// Select the emulated target platform: canonical qNaN payloads,
    /// NaN-propagation scheme, and invalid-FMA policy are all updated
    /// atomically. The vector qNaN constants used by the drivers are
    /// re-derived from `qnan32`/`qnan64` eagerly on every vector call, so
    /// there is no stale-constant window.
    pub fn configure_platform(&mut self, platform: Platform) {
        let cfg = platform.config();
        self.platform = platform;
        self.qnan32 = cfg.qnan32;
        self.qnan64 = cfg.qnan64;
        self.nan_prop_scheme = cfg.nan_prop_scheme;
        self.invalid_fma = cfg.invalid_fma;
        log::debug!(
            "configure_platform: platform={:?} qnan32={:#010x} qnan64={:#018x} nan_prop={:?}",
            self.platform,
            self.qnan32,
            self.qnan64,
            self.nan_prop_scheme
        );
    }

    pub fn set_rounding(&mut self, mode: RoundingMode) {
        self.rounding_mode = mode;
    }

    pub fn rounding_mode(&self) -> RoundingMode {
        self.rounding_mode
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn nan_prop_scheme(&self) -> NanPropagationScheme {
        self.nan_prop_scheme
    }

    pub fn invalid_fma(&self) -> bool {
        self.invalid_fma
    }

    pub fn tininess_before_rounding(&self) -> bool {
        self.tininess_before_rounding
    }

    pub fn set_tininess_before_rounding(&mut self, value: bool) {
        self.tininess_before_rounding = value;
    }

    /// Reset all five sticky flags to false.
    pub fn clear_flags(&mut self) {
        self.flags.clear();
    }

    /// Current sticky flag state.
    pub fn read_flags(&self) -> FpFlags {
        self.flags
    }

    pub(crate) fn accumulate(&mut self, flags: FpFlags) {
        self.flags.accumulate(flags);
    }

    /// `dest[i] = a[i] + b[i]` for every `i`, updating sticky flags.
    pub fn v_add<T: EngineFloat>(&mut self, a: &[T], b: &[T], dest: &mut [T]) {
        ops::v_add(self, a, b, dest);
    }

    /// `dest[i] = a[i] - b[i]` for every `i`, updating sticky flags.
    pub fn v_sub<T: EngineFloat>(&mut self, a: &[T], b: &[T], dest: &mut [T]) {
        ops::v_sub(self, a, b, dest);
    }

    /// `dest[i] = a[i] * b[i]` for every `i`, updating sticky flags.
    pub fn v_mul<T: EngineFloat + crate::simd::residual::UpMul>(
        &mut self,
        a: &[T],
        b: &[T],
        dest: &mut [T],
    ) {
        ops::v_mul(self, a, b, dest);
    }

    /// `dest[i] = a[i] / b[i]` for every `i`, updating sticky flags.
    pub fn v_div<T: EngineFloat>(&mut self, a: &[T], b: &[T], dest: &mut [T]) {
        ops::v_div(self, a, b, dest);
    }

    /// `dest[i] = sqrt(a[i])` for every `i`, updating sticky flags.
    pub fn v_sqrt<T: EngineFloat>(&mut self, a: &[T], dest: &mut [T]) {
        ops::v_sqrt(self, a, dest);
    }

    /// `dest[i] = a[i] * b[i] + c[i]` for every `i`, updating sticky
    /// flags.
    pub fn v_fma<T: EngineFloat>(&mut self, a: &[T], b: &[T], c: &[T], dest: &mut [T]) {
        ops::v_fma(self, a, b, c, dest);
    }
}
