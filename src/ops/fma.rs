//! Vector fused multiply-add driver (SPEC §4.4.6).

use crate::engine::{Engine, EngineFloat};
use crate::flags::FpFlags;
use crate::rounding::RoundingMode;
use crate::scalar;
use crate::simd::vector::{any, mask_is_inf, mask_is_inf_or_nan, mask_is_nan, mask_is_snan, select};
use crate::simd::VectorWidth;

use super::scalar_ternary_fallback;

pub(crate) fn v_fma<T: EngineFloat>(engine: &mut Engine, a: &[T], b: &[T], c: &[T], dest: &mut [T]) {
    debug_assert_eq!(a.len(), b.len());
    debug_assert_eq!(a.len(), c.len());
    debug_assert_eq!(a.len(), dest.len());

    if !engine.rounding_mode().is_ties_to_even() {
        scalar_ternary_fallback(engine, a, b, c, dest, scalar::fma);
        return;
    }

    let len = a.len();
    let width = T::WIDTH;
    let qnan = T::splat(T::qnan(engine));
    let invalid_fma = engine.invalid_fma();
    let mut local = FpFlags::empty();
    let mut i = 0;

    while i + width <= len {
        let va = T::load(&a[i..i + width]);
        let vb = T::load(&b[i..i + width]);
        let vc_in = T::load(&c[i..i + width]);
        let mut vd = T::fma(va, vb, vc_in);

        if any::<T>(mask_is_inf_or_nan::<T>(vd)) {
            let nan_mask = mask_is_nan::<T>(vd);
            let snan = mask_is_snan::<T>(va) | mask_is_snan::<T>(vb) | mask_is_snan::<T>(vc_in);
            let manufactured_nan =
                nan_mask & !mask_is_nan::<T>(va) & !mask_is_nan::<T>(vb) & !mask_is_nan::<T>(vc_in);
            let invalid = snan | (if invalid_fma { manufactured_nan } else { 0 });
            if any::<T>(invalid) {
                local |= FpFlags::INVALID;
            }
            let overflow = mask_is_inf::<T>(vd)
                & !mask_is_inf::<T>(va)
                & !mask_is_inf::<T>(vb)
                & !mask_is_inf::<T>(vc_in);
            if any::<T>(overflow) {
                local |= FpFlags::OVERFLOW | FpFlags::INEXACT;
            }
            vd = select::<T>(nan_mask, qnan, vd);
        }

        if !local.contains(FpFlags::INEXACT) || !local.contains(FpFlags::UNDERFLOW) {
            log::trace!("v_fma: downgrading chunk to scalar for inexact/underflow");
            let mut chunk_flags = FpFlags::empty();
            for lane in 0..width {
                let _ = scalar::fma(
                    a[i + lane],
                    b[i + lane],
                    c[i + lane],
                    RoundingMode::TiesToEven,
                    &mut chunk_flags,
                );
            }
            local.accumulate(chunk_flags);
        }

        T::store(vd, &mut dest[i..i + width]);
        i += width;
    }

    engine.accumulate(local);

    if i < len {
        log::trace!("v_fma: scalar tail of {} element(s)", len - i);
        let mut tail = FpFlags::empty();
        for j in i..len {
            dest[j] = scalar::fma(a[j], b[j], c[j], RoundingMode::TiesToEven, &mut tail);
        }
        engine.accumulate(tail);
    }
}
