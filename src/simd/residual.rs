//! Exact-residual kernels: TwoSum, FastTwoSum, UpMul.
//!
//! Translated expression-for-expression from `original_source`'s
//! `VTwoSum`/`VFastTwoSum`/`VUpMul` (the C++ this crate's arithmetic was
//! distilled from) into the [`VectorWidth`] vocabulary — not transliterated
//! syntactically. The masked swap in `VFastTwoSum`
//! (`stdx::where(a_abs < b_abs, x) = b`) becomes a [`select`] call.

use super::vector::{abs, mask_lt, select, VectorWidth};

/// Exact residual of `a + b = c + r`, branch-free. Exact when the sum
/// doesn't overflow.
#[inline]
pub fn two_sum<T: VectorWidth>(a: T::Simd, b: T::Simd, c: T::Simd) -> T::Simd {
    let ad = T::sub(c, b);
    let bd = T::sub(c, ad);
    let da = T::sub(ad, a);
    let db = T::sub(bd, b);
    T::add(da, db)
}

/// Exact residual of `a + b = c + r` when the larger-magnitude operand is
/// known or can be selected lane-wise. Exact when `|x| ≥ |y|` and the sum
/// doesn't overflow.
#[inline]
pub fn fast_two_sum<T>(a: T::Simd, b: T::Simd, c: T::Simd) -> T::Simd
where
    T: VectorWidth + PartialOrd,
{
    let abs_a = abs::<T>(a);
    let abs_b = abs::<T>(b);
    let swap = mask_lt::<T>(abs_a, abs_b);
    let x = select::<T>(swap, b, a);
    let y = select::<T>(swap, a, b);
    T::sub(T::sub(c, x), y)
}

/// Per-width UpMul residual test, dispatched to the binary32
/// widen-to-f64 form or the binary64 FMA form.
///
/// Returns a lane bitmask rather than the residual value itself: the
/// residual only needs to be tested against zero, and narrowing it back
/// into `Self::Simd` before that test can flush a genuinely nonzero
/// residual to zero (e.g. `1.0e-30f32 * 1.0e-10f32`'s true residual is
/// about `5.4e-46`, which rounds to `0.0f32` but must still report
/// nonzero so `v_mul` can set INEXACT/UNDERFLOW). Testing nonzero-ness at
/// full widened precision and returning only the mask avoids that loss.
pub trait UpMul: VectorWidth {
    /// Bit `i` set iff `a*b != c` exactly, for lane `i`.
    fn up_mul_nonzero_mask(a: Self::Simd, b: Self::Simd, c: Self::Simd) -> u8;
}

impl UpMul for f32 {
    /// Widens each lane to `f64` so the product of two 24-bit
    /// significands (fits in 48 bits) is exact in `f64`'s 53-bit
    /// mantissa, and tests that exact value against zero before any
    /// narrowing occurs.
    #[inline]
    fn up_mul_nonzero_mask(a: wide::f32x8, b: wide::f32x8, c: wide::f32x8) -> u8 {
        let aa = a.to_array();
        let ba = b.to_array();
        let ca = c.to_array();
        let mut mask = 0u8;
        for i in 0..8 {
            let exact = aa[i] as f64 * ba[i] as f64 - ca[i] as f64;
            if exact != 0.0 {
                mask |= 1 << i;
            }
        }
        mask
    }
}

impl UpMul for f64 {
    /// `r = fma(a, b, −c)`, a single rounding, tested against zero at
    /// the same `f64` precision it was produced in (no narrowing step
    /// exists for this width). Trusted whenever the host FMA is a true
    /// single-rounding instruction (see the `target_feature = "fma"`
    /// gate at the call site in `crate::ops::mul`).
    #[inline]
    fn up_mul_nonzero_mask(a: wide::f64x4, b: wide::f64x4, c: wide::f64x4) -> u8 {
        let r = a.mul_add(b, -c).to_array();
        let mut mask = 0u8;
        for (i, &x) in r.iter().enumerate() {
            if x != 0.0 {
                mask |= 1 << i;
            }
        }
        mask
    }
}
