//! SIMD primitives and exact-residual kernels backing the vector operation
//! drivers in [`crate::ops`].

pub mod residual;
pub mod vector;

pub use vector::VectorWidth;
