//! Vectorized IEEE-754 binary32/binary64 arithmetic emulator.
//!
//! Reproduces a target platform's (RISC-V, x86/SSE, ARMv8) rounding,
//! NaN-propagation, and sticky-exception-flag behavior on arbitrary host
//! hardware. The engine computes whole arrays of add/sub/mul/div/sqrt/fma
//! through a SIMD fast path (see [`simd`], [`ops`]) backed by a
//! correctly-rounded scalar reference (see [`scalar`]) for tails,
//! non-default rounding modes, and the handful of cases the vector path
//! can't cheaply prove a flag for.
//!
//! ```
//! use vfpsim::{Engine, Platform};
//!
//! let mut engine = Engine::new();
//! engine.configure_platform(Platform::RiscV);
//!
//! let a = [1.0f32, 3.4e38];
//! let b = [1.0f32, 2.0];
//! let mut dest = [0.0f32; 2];
//! engine.v_mul(&a, &b, &mut dest);
//!
//! assert!(dest[1].is_infinite());
//! assert!(engine.read_flags().contains(vfpsim::FpFlags::OVERFLOW));
//! ```

pub mod engine;
pub mod error;
pub mod flags;
#[cfg(feature = "logging")]
pub mod logging;
mod ops;
pub mod platform;
pub mod rounding;
pub mod scalar;
pub mod simd;

pub use engine::{Engine, EngineFloat};
pub use error::ConfigError;
pub use flags::FpFlags;
pub use platform::{NanPropagationScheme, Platform};
pub use rounding::RoundingMode;
pub use simd::VectorWidth;
