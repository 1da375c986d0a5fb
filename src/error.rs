//! Configuration-error type.
//!
//! Floating-point anomalies (invalid, div-by-zero, overflow, underflow,
//! inexact) never produce an `Err` — they're sticky flags, polled after
//! the call. The only fatal class is misconfiguration: an out-of-range
//! rounding mode or NaN-propagation scheme reaching the scalar reference.

use thiserror::Error;

/// Misconfiguration reaching the scalar reference engine.
///
/// The public [`crate::rounding::RoundingMode`] and
/// [`crate::platform::NanPropagationScheme`] enums are closed Rust enums
/// with no out-of-range representation, so this is unreachable through
/// the safe public API. It exists to mirror the emulated hardware's own
/// contract (an unrecognized `frm`/`FPCR` encoding is fatal) and is
/// reachable only through the internal `#[cfg(test)]` sentinel
/// constructors used in `tests/properties.rs`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The 3-bit rounding-mode encoding did not match one of the five
    /// defined IEEE directions.
    #[error("unrecognized rounding mode encoding: {0}")]
    UnknownRoundingMode(u8),
    /// The NaN-propagation scheme selector did not match one of the four
    /// defined platform schemes.
    #[error("unrecognized NaN-propagation scheme encoding: {0}")]
    UnknownNanScheme(u8),
}
