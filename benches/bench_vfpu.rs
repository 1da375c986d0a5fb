//! Micro-benchmark over the six vector ops at a representative array
//! length. Scaffold (`criterion_group!`/`criterion_main!` shape) kept
//! from the teacher's own `benches/bench_emulator.rs`; the body is new
//! since that bench drove full CPU instruction execution.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vfpsim::{Engine, Platform};

const LEN: usize = 4096;

fn bench_add(c: &mut Criterion) {
    let mut engine = Engine::new();
    engine.configure_platform(Platform::RiscV);
    let a: Vec<f32> = (0..LEN).map(|i| i as f32 * 0.5).collect();
    let b: Vec<f32> = (0..LEN).map(|i| i as f32 * 0.25).collect();
    let mut dest = vec![0.0f32; LEN];

    c.bench_function("v_add_f32", |bencher| {
        bencher.iter(|| {
            engine.v_add(black_box(&a), black_box(&b), black_box(&mut dest));
        });
    });
}

fn bench_mul(c: &mut Criterion) {
    let mut engine = Engine::new();
    engine.configure_platform(Platform::RiscV);
    let a: Vec<f32> = (0..LEN).map(|i| i as f32 * 0.5 + 1.0).collect();
    let b: Vec<f32> = (0..LEN).map(|i| i as f32 * 0.25 + 1.0).collect();
    let mut dest = vec![0.0f32; LEN];

    c.bench_function("v_mul_f32", |bencher| {
        bencher.iter(|| {
            engine.v_mul(black_box(&a), black_box(&b), black_box(&mut dest));
        });
    });
}

fn bench_sub(c: &mut Criterion) {
    let mut engine = Engine::new();
    engine.configure_platform(Platform::RiscV);
    let a: Vec<f32> = (0..LEN).map(|i| i as f32 * 0.5).collect();
    let b: Vec<f32> = (0..LEN).map(|i| i as f32 * 0.25).collect();
    let mut dest = vec![0.0f32; LEN];

    c.bench_function("v_sub_f32", |bencher| {
        bencher.iter(|| {
            engine.v_sub(black_box(&a), black_box(&b), black_box(&mut dest));
        });
    });
}

fn bench_div(c: &mut Criterion) {
    let mut engine = Engine::new();
    engine.configure_platform(Platform::RiscV);
    let a: Vec<f64> = (0..LEN).map(|i| i as f64 + 1.0).collect();
    let b: Vec<f64> = (0..LEN).map(|i| i as f64 * 0.5 + 1.0).collect();
    let mut dest = vec![0.0f64; LEN];

    c.bench_function("v_div_f64", |bencher| {
        bencher.iter(|| {
            engine.v_div(black_box(&a), black_box(&b), black_box(&mut dest));
        });
    });
}

fn bench_sqrt(c: &mut Criterion) {
    let mut engine = Engine::new();
    engine.configure_platform(Platform::RiscV);
    let a: Vec<f32> = (0..LEN).map(|i| i as f32 + 1.0).collect();
    let mut dest = vec![0.0f32; LEN];

    c.bench_function("v_sqrt_f32", |bencher| {
        bencher.iter(|| {
            engine.v_sqrt(black_box(&a), black_box(&mut dest));
        });
    });
}

fn bench_fma(c: &mut Criterion) {
    let mut engine = Engine::new();
    engine.configure_platform(Platform::RiscV);
    let a: Vec<f64> = (0..LEN).map(|i| i as f64 * 0.5).collect();
    let b: Vec<f64> = (0..LEN).map(|i| i as f64 * 0.25).collect();
    let c_in: Vec<f64> = (0..LEN).map(|i| i as f64 * 0.125).collect();
    let mut dest = vec![0.0f64; LEN];

    c.bench_function("v_fma_f64", |bencher| {
        bencher.iter(|| {
            engine.v_fma(
                black_box(&a),
                black_box(&b),
                black_box(&c_in),
                black_box(&mut dest),
            );
        });
    });
}

criterion_group!(
    benches,
    bench_add,
    bench_sub,
    bench_mul,
    bench_div,
    bench_sqrt,
    bench_fma
);
criterion_main!(benches);
