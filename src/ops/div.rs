//! Vector divide driver (SPEC §4.4.4).
//!
//! A SIMD divide gives no cheap per-lane residual the way Add/Sub/Mul do,
//! so whenever inexact or underflow isn't already pinned by a special
//! case this chunk, the driver downgrades: it re-invokes the scalar
//! reference lane-by-lane purely to recover the flags, keeping the
//! SIMD-computed value as the stored result (bit-identical under
//! TiesToEven for correctly-rounded divide).

use crate::engine::{Engine, EngineFloat};
use crate::flags::FpFlags;
use crate::rounding::RoundingMode;
use crate::scalar;
use crate::simd::vector::{any, mask_is_inf, mask_is_inf_or_nan, mask_is_nan, mask_is_snan, mask_is_zero, select};
use crate::simd::VectorWidth;

use super::scalar_binary_fallback;

pub(crate) fn v_div<T: EngineFloat>(engine: &mut Engine, a: &[T], b: &[T], dest: &mut [T]) {
    debug_assert_eq!(a.len(), b.len());
    debug_assert_eq!(a.len(), dest.len());

    if !engine.rounding_mode().is_ties_to_even() {
        scalar_binary_fallback(engine, a, b, dest, scalar::div);
        return;
    }

    let len = a.len();
    let width = T::WIDTH;
    let qnan = T::splat(T::qnan(engine));
    let mut local = FpFlags::empty();
    let mut i = 0;

    while i + width <= len {
        let va = T::load(&a[i..i + width]);
        let vb = T::load(&b[i..i + width]);
        let mut vc = T::div(va, vb);

        if any::<T>(mask_is_inf_or_nan::<T>(vc)) {
            let snan = mask_is_snan::<T>(va) | mask_is_snan::<T>(vb);
            if any::<T>(snan) {
                local |= FpFlags::INVALID;
            }
            let div_by_zero = mask_is_inf::<T>(vc) & !mask_is_inf::<T>(va) & mask_is_zero::<T>(vb);
            if any::<T>(div_by_zero) {
                local |= FpFlags::DIV_BY_ZERO;
            }
            let overflow = mask_is_inf::<T>(vc)
                & !mask_is_inf::<T>(va)
                & !mask_is_inf::<T>(vb)
                & !mask_is_zero::<T>(vb);
            if any::<T>(overflow) {
                local |= FpFlags::OVERFLOW | FpFlags::INEXACT;
            }
            vc = select::<T>(mask_is_nan::<T>(vc), qnan, vc);
        }

        if !local.contains(FpFlags::INEXACT) || !local.contains(FpFlags::UNDERFLOW) {
            log::trace!("v_div: downgrading chunk to scalar for inexact/underflow");
            let mut chunk_flags = FpFlags::empty();
            for lane in 0..width {
                let _ = scalar::div(
                    a[i + lane],
                    b[i + lane],
                    RoundingMode::TiesToEven,
                    &mut chunk_flags,
                );
            }
            local.accumulate(chunk_flags);
        }

        T::store(vc, &mut dest[i..i + width]);
        i += width;
    }

    engine.accumulate(local);

    if i < len {
        log::trace!("v_div: scalar tail of {} element(s)", len - i);
        let mut tail = FpFlags::empty();
        for j in i..len {
            dest[j] = scalar::div(a[j], b[j], RoundingMode::TiesToEven, &mut tail);
        }
        engine.accumulate(tail);
    }
}
