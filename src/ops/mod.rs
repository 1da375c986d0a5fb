//! Vector operation drivers: one per arithmetic operation, each following
//! the common shape `original_source`'s `SimdFloat::Vadd/VSub/VMul` lay
//! out — entry guard on rounding mode, chunked SIMD loop with
//! special-case mask detection, scalar tail.

mod add;
mod div;
mod fma;
mod mul;
mod sqrt;
mod sub;

pub(crate) use add::v_add;
pub(crate) use div::v_div;
pub(crate) use fma::v_fma;
pub(crate) use mul::v_mul;
pub(crate) use sqrt::v_sqrt;
pub(crate) use sub::v_sub;

use crate::engine::{Engine, EngineFloat};
use crate::flags::FpFlags;
use crate::rounding::RoundingMode;

/// Whole-array scalar fallback for a binary op, used when the configured
/// rounding mode isn't `TiesToEven`.
pub(crate) fn scalar_binary_fallback<T: EngineFloat>(
    engine: &mut Engine,
    a: &[T],
    b: &[T],
    dest: &mut [T],
    op: impl Fn(T, T, RoundingMode, &mut FpFlags) -> T,
) {
    let rm = engine.rounding_mode();
    let mut local = FpFlags::empty();
    for i in 0..a.len() {
        dest[i] = op(a[i], b[i], rm, &mut local);
    }
    engine.accumulate(local);
}

/// Whole-array scalar fallback for a unary op (sqrt).
pub(crate) fn scalar_unary_fallback<T: EngineFloat>(
    engine: &mut Engine,
    a: &[T],
    dest: &mut [T],
    op: impl Fn(T, RoundingMode, &mut FpFlags) -> T,
) {
    let rm = engine.rounding_mode();
    let mut local = FpFlags::empty();
    for i in 0..a.len() {
        dest[i] = op(a[i], rm, &mut local);
    }
    engine.accumulate(local);
}

/// Whole-array scalar fallback for a ternary op (fma).
pub(crate) fn scalar_ternary_fallback<T: EngineFloat>(
    engine: &mut Engine,
    a: &[T],
    b: &[T],
    c: &[T],
    dest: &mut [T],
    op: impl Fn(T, T, T, RoundingMode, &mut FpFlags) -> T,
) {
    let rm = engine.rounding_mode();
    let mut local = FpFlags::empty();
    for i in 0..a.len() {
        dest[i] = op(a[i], b[i], c[i], rm, &mut local);
    }
    engine.accumulate(local);
}
