//! Vector multiply driver (SPEC §4.4.3).
//!
//! binary64's UpMul kernel requires a true single-rounding hardware FMA.
//! Without `target_feature = "fma"` this crate can't trust `wide`'s
//! `mul_add` to lower to one, so every binary64 chunk's inexact/underflow
//! determination is downgraded to the scalar reference instead (Design
//! Notes, "FMA availability").

use crate::engine::{Engine, EngineFloat};
use crate::flags::FpFlags;
use crate::rounding::RoundingMode;
use crate::scalar;
use crate::simd::residual::UpMul;
use crate::simd::vector::{
    any, mask_is_inf, mask_is_inf_or_nan, mask_is_nan, mask_is_small, mask_is_snan, mask_is_zero,
    select,
};
use crate::simd::VectorWidth;

use super::scalar_binary_fallback;

pub(crate) fn v_mul<T: EngineFloat + UpMul>(engine: &mut Engine, a: &[T], b: &[T], dest: &mut [T]) {
    debug_assert_eq!(a.len(), b.len());
    debug_assert_eq!(a.len(), dest.len());

    if !engine.rounding_mode().is_ties_to_even() {
        scalar_binary_fallback(engine, a, b, dest, scalar::mul);
        return;
    }

    let len = a.len();
    let width = T::WIDTH;
    let qnan = T::splat(T::qnan(engine));
    let vmin = T::min_normal();
    let mut local = FpFlags::empty();
    let mut i = 0;

    while i + width <= len {
        let va = T::load(&a[i..i + width]);
        let vb = T::load(&b[i..i + width]);
        let mut vc = T::mul(va, vb);

        if any::<T>(mask_is_inf_or_nan::<T>(vc)) {
            let snan = mask_is_snan::<T>(va) | mask_is_snan::<T>(vb);
            let zero_inf = (mask_is_zero::<T>(va) & mask_is_inf::<T>(vb))
                | (mask_is_inf::<T>(va) & mask_is_zero::<T>(vb));
            if any::<T>(snan | zero_inf) {
                local |= FpFlags::INVALID;
            }
            let overflow = mask_is_inf::<T>(vc) & !mask_is_inf::<T>(va) & !mask_is_inf::<T>(vb);
            if any::<T>(overflow) {
                local |= FpFlags::OVERFLOW | FpFlags::INEXACT;
            }
            vc = select::<T>(mask_is_nan::<T>(vc), qnan, vc);
        }

        if trusted_up_mul::<T>() {
            let residual_mask = T::up_mul_nonzero_mask(va, vb, vc);
            if !local.contains(FpFlags::INEXACT) && any::<T>(residual_mask) {
                local |= FpFlags::INEXACT;
            }
            if !local.contains(FpFlags::UNDERFLOW) {
                let is_small = mask_is_small::<T>(vc, vmin);
                if any::<T>(is_small & residual_mask) {
                    local |= FpFlags::UNDERFLOW;
                }
            }
        } else {
            log::trace!("v_mul: UpMul untrusted for this width, downgrading chunk to scalar");
            let mut chunk_flags = FpFlags::empty();
            for lane in 0..width {
                // Result discarded: the stored value stays the
                // SIMD-computed one (bit-identical under TiesToEven);
                // this call exists solely to recover the flags.
                let _ = scalar::mul(
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
        log::trace!("v_mul: scalar tail of {} element(s)", len - i);
        let mut tail = FpFlags::empty();
        for j in i..len {
            dest[j] = scalar::mul(a[j], b[j], RoundingMode::TiesToEven, &mut tail);
        }
        engine.accumulate(tail);
    }
}

/// binary32's UpMul (widen to f64) is always exact; binary64's FMA-based
/// UpMul is trusted only when the target is known to lower `mul_add` to a
/// true single-rounding hardware FMA.
#[inline]
fn trusted_up_mul<T: VectorWidth>() -> bool {
    if T::WIDTH == 8 {
        true
    } else {
        cfg!(target_feature = "fma")
    }
}
