//! Vector add driver (SPEC §4.4.1).

use crate::engine::{Engine, EngineFloat};
use crate::flags::FpFlags;
use crate::rounding::RoundingMode;
use crate::scalar;
use crate::simd::residual::fast_two_sum;
use crate::simd::vector::{
    any, mask_is_inf, mask_is_inf_or_nan, mask_is_nan, mask_is_nonzero, mask_is_snan, select,
};
use crate::simd::VectorWidth;

use super::scalar_binary_fallback;

pub(crate) fn v_add<T: EngineFloat>(engine: &mut Engine, a: &[T], b: &[T], dest: &mut [T]) {
    debug_assert_eq!(a.len(), b.len());
    debug_assert_eq!(a.len(), dest.len());

    if !engine.rounding_mode().is_ties_to_even() {
        scalar_binary_fallback(engine, a, b, dest, scalar::add);
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
        let mut vc = T::add(va, vb);

        if any::<T>(mask_is_inf_or_nan::<T>(vc)) {
            let nan_mask = mask_is_nan::<T>(vc);
            let both_inf = mask_is_inf::<T>(va) & mask_is_inf::<T>(vb);
            let snan = mask_is_snan::<T>(va) | mask_is_snan::<T>(vb);
            if any::<T>((nan_mask & both_inf) | snan) {
                local |= FpFlags::INVALID;
            }
            let overflow = mask_is_inf::<T>(vc) & !mask_is_inf::<T>(va) & !mask_is_inf::<T>(vb);
            if any::<T>(overflow) {
                local |= FpFlags::OVERFLOW | FpFlags::INEXACT;
            }
            vc = select::<T>(nan_mask, qnan, vc);
        }

        if !local.contains(FpFlags::INEXACT) {
            let r = fast_two_sum::<T>(va, vb, vc);
            if any::<T>(mask_is_nonzero::<T>(r)) {
                local |= FpFlags::INEXACT;
            }
        }

        T::store(vc, &mut dest[i..i + width]);
        i += width;
    }

    engine.accumulate(local);

    if i < len {
        log::trace!("v_add: scalar tail of {} element(s)", len - i);
        let mut tail = FpFlags::empty();
        for j in i..len {
            dest[j] = scalar::add(a[j], b[j], RoundingMode::TiesToEven, &mut tail);
        }
        engine.accumulate(tail);
    }
}
