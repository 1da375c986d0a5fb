//! Sticky IEEE-754 exception flags (invalid, divide-by-zero, overflow,
//! underflow, inexact).
//!
//! Mirrors the five `fcsr.fflags` bits RISC-V defines (and which x86's
//! MXCSR / ARM's FPSR encode under different names but the same
//! semantics): once a flag is set within an operation batch, it stays set
//! until [`FpFlags::clear`] — there is no per-operation reset.

use bitflags::bitflags;

bitflags! {
    /// Five sticky IEEE-754 exception flags, one bit each.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct FpFlags: u8 {
        /// Invalid operation (NV).
        const INVALID      = 1 << 4;
        /// Division by zero (DZ).
        const DIV_BY_ZERO  = 1 << 3;
        /// Overflow (OF).
        const OVERFLOW     = 1 << 2;
        /// Underflow (UF).
        const UNDERFLOW    = 1 << 1;
        /// Inexact (NX).
        const INEXACT      = 1 << 0;
    }
}

impl FpFlags {
    /// Merge `other` into `self` — monotonic, never clears a bit already
    /// set. This is the "batched local accumulator OR'd in at chunk end"
    /// pattern the spec's design notes explicitly permit.
    #[inline]
    pub fn accumulate(&mut self, other: FpFlags) {
        *self |= other;
    }

    /// Reset all five flags to false.
    #[inline]
    pub fn clear(&mut self) {
        *self = FpFlags::empty();
    }
}
