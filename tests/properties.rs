//! Property-based checks of SPEC §8's universal invariants 1, 2, 4, and 6,
//! grounded on `willmccallion-rvsim`'s `proptest` dev-dependency (this
//! crate's own teacher has no property tests; `proptest` is pack
//! enrichment).

use proptest::prelude::*;

use vfpsim::simd::residual::{fast_two_sum, two_sum};
use vfpsim::{scalar, Engine, FpFlags, Platform, RoundingMode, VectorWidth};

const WIDTH_F32: usize = 8;

fn finite_f32() -> impl Strategy<Value = f32> {
    prop::num::f32::ANY.prop_filter("finite", |x| x.is_finite())
}

fn length_bucket() -> impl Strategy<Value = usize> {
    prop::sample::select(vec![
        0usize,
        1,
        WIDTH_F32 - 1,
        WIDTH_F32,
        WIDTH_F32 + 1,
        3 * WIDTH_F32,
        3 * WIDTH_F32 + 3,
    ])
}

fn equal_length_f32_pairs() -> impl Strategy<Value = (Vec<f32>, Vec<f32>)> {
    length_bucket().prop_flat_map(|len| {
        (
            prop::collection::vec(finite_f32(), len..=len),
            prop::collection::vec(finite_f32(), len..=len),
        )
    })
}

fn riscv_engine() -> Engine {
    let mut engine = Engine::new();
    engine.configure_platform(Platform::RiscV);
    engine.clear_flags();
    engine
}

proptest! {
    /// Invariant 1: bit-exact equivalence to the scalar reference, across
    /// the length bucket list, for Add.
    #[test]
    fn add_bit_exact_vs_scalar((a, b) in equal_length_f32_pairs()) {
        let mut engine = riscv_engine();
        let mut dest = vec![0.0f32; a.len()];
        engine.v_add(&a, &b, &mut dest);

        let mut reference_flags = FpFlags::empty();
        for i in 0..a.len() {
            let expected = scalar::add(a[i], b[i], RoundingMode::TiesToEven, &mut reference_flags);
            prop_assert!(
                dest[i].to_bits() == expected.to_bits() || (dest[i].is_nan() && expected.is_nan())
            );
        }
        prop_assert_eq!(engine.read_flags(), reference_flags);
    }

    /// Invariant 1, Mul.
    #[test]
    fn mul_bit_exact_vs_scalar((a, b) in equal_length_f32_pairs()) {
        let mut engine = riscv_engine();
        let mut dest = vec![0.0f32; a.len()];
        engine.v_mul(&a, &b, &mut dest);

        let mut reference_flags = FpFlags::empty();
        for i in 0..a.len() {
            let expected = scalar::mul(a[i], b[i], RoundingMode::TiesToEven, &mut reference_flags);
            prop_assert!(
                dest[i].to_bits() == expected.to_bits() || (dest[i].is_nan() && expected.is_nan())
            );
        }
        prop_assert_eq!(engine.read_flags(), reference_flags);
    }

    /// Invariant 2: within a single call, flags never transition from
    /// true to false — approximated here by confirming two successive
    /// calls only ever grow the sticky set.
    #[test]
    fn flags_are_monotonic_across_calls((a, b) in equal_length_f32_pairs()) {
        let mut engine = riscv_engine();
        let mut dest = vec![0.0f32; a.len()];
        engine.v_div(&a, &b, &mut dest);
        let after_first = engine.read_flags();

        engine.v_add(&a, &b, &mut dest);
        let after_second = engine.read_flags();

        prop_assert!(after_second.contains(after_first));
    }

    /// Invariant 4: residual identity for Add, finite non-overflowing
    /// operands — `c + r` (widened to f64) equals `a + b` exactly.
    #[test]
    fn add_residual_identity(a in -1.0e30f32..1.0e30, b in -1.0e30f32..1.0e30) {
        let va = <f32 as VectorWidth>::splat(a);
        let vb = <f32 as VectorWidth>::splat(b);
        let vc = <f32 as VectorWidth>::add(va, vb);
        let vr = fast_two_sum::<f32>(va, vb, vc);

        let c = <f32 as VectorWidth>::to_array(vc)[0];
        let r = <f32 as VectorWidth>::to_array(vr)[0];

        if c.is_finite() {
            prop_assert_eq!(c as f64 + r as f64, a as f64 + b as f64);
        }
    }

    /// Invariant 4, Sub: residual via `TwoSum(a, −b, c)`.
    #[test]
    fn sub_residual_identity(a in -1.0e30f32..1.0e30, b in -1.0e30f32..1.0e30) {
        let va = <f32 as VectorWidth>::splat(a);
        let vb = <f32 as VectorWidth>::splat(b);
        let vc = <f32 as VectorWidth>::sub(va, vb);
        let vr = two_sum::<f32>(va, <f32 as VectorWidth>::neg(vb), vc);

        let c = <f32 as VectorWidth>::to_array(vc)[0];
        let r = <f32 as VectorWidth>::to_array(vr)[0];

        if c.is_finite() {
            prop_assert_eq!(c as f64 + r as f64, a as f64 - b as f64);
        }
    }

    /// Invariant 6: any op that sets overflow also sets inexact.
    #[test]
    fn overflow_implies_inexact((a, b) in equal_length_f32_pairs()) {
        let mut engine = riscv_engine();
        let mut dest = vec![0.0f32; a.len()];
        engine.v_mul(&a, &b, &mut dest);
        let flags = engine.read_flags();
        if flags.contains(FpFlags::OVERFLOW) {
            prop_assert!(flags.contains(FpFlags::INEXACT));
        }
    }
}
