//! Vector square-root driver (SPEC §4.4.5). No overflow/underflow path:
//! sqrt can't overflow from a finite input, nor underflow into subnormal
//! from a non-subnormal one.

use crate::engine::{Engine, EngineFloat};
use crate::flags::FpFlags;
use crate::rounding::RoundingMode;
use crate::simd::vector::{any, mask_is_inf_or_nan, mask_is_nan, mask_is_negative, mask_is_snan, select};
use crate::simd::VectorWidth;

use super::scalar_unary_fallback;

pub(crate) fn v_sqrt<T: EngineFloat>(engine: &mut Engine, a: &[T], dest: &mut [T]) {
    debug_assert_eq!(a.len(), dest.len());

    if !engine.rounding_mode().is_ties_to_even() {
        scalar_unary_fallback(engine, a, dest, scalar_sqrt::<T>);
        return;
    }

    let len = a.len();
    let width = T::WIDTH;
    let qnan = T::splat(T::qnan(engine));
    let mut local = FpFlags::empty();
    let mut i = 0;

    while i + width <= len {
        let va = T::load(&a[i..i + width]);
        let mut vc = T::sqrt(va);

        if any::<T>(mask_is_inf_or_nan::<T>(vc)) {
            let nan_mask = mask_is_nan::<T>(vc);
            let snan = mask_is_snan::<T>(va);
            let negative = mask_is_negative::<T>(va);
            if any::<T>(snan | negative) {
                local |= FpFlags::INVALID;
            }
            vc = select::<T>(nan_mask, qnan, vc);
        }

        if !local.contains(FpFlags::INEXACT) {
            log::trace!("v_sqrt: downgrading chunk to scalar for inexact");
            let mut chunk_flags = FpFlags::empty();
            for lane in 0..width {
                let _ = scalar_sqrt::<T>(a[i + lane], RoundingMode::TiesToEven, &mut chunk_flags);
            }
            local.accumulate(chunk_flags);
        }

        T::store(vc, &mut dest[i..i + width]);
        i += width;
    }

    engine.accumulate(local);

    if i < len {
        log::trace!("v_sqrt: scalar tail of {} element(s)", len - i);
        let mut tail = FpFlags::empty();
        for j in i..len {
            dest[j] = scalar_sqrt::<T>(a[j], RoundingMode::TiesToEven, &mut tail);
        }
        engine.accumulate(tail);
    }
}

/// Width-generic bridge to `scalar::sqrt_f32`/`scalar::sqrt_f64`.
#[inline]
fn scalar_sqrt<T: EngineFloat>(a: T, rm: RoundingMode, flags: &mut FpFlags) -> T {
    T::sqrt_scalar(a, rm, flags)
}
