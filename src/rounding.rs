//! Rounding-direction attributes (IEEE 754-2019 §4.3).

use rustc_apfloat::Round as ApRound;

/// One of the five IEEE-754 rounding directions.
///
/// The vector fast path is specified only for [`RoundingMode::TiesToEven`];
/// every other mode routes the whole call to the scalar reference (see
/// [`crate::engine::Engine`]'s per-op entry guard).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundingMode {
    /// Round to nearest, ties to even — the only mode the SIMD fast path
    /// handles directly.
    TiesToEven,
    /// Round toward zero (truncation).
    TowardZero,
    /// Round toward negative infinity.
    TowardNegative,
    /// Round toward positive infinity.
    TowardPositive,
    /// Round to nearest, ties away from zero.
    TiesToAway,
}

impl RoundingMode {
    /// True for the one mode the vector drivers handle without falling
    /// back to the scalar reference.
    #[inline]
    pub fn is_ties_to_even(self) -> bool {
        matches!(self, RoundingMode::TiesToEven)
    }
}

impl From<RoundingMode> for ApRound {
    fn from(rm: RoundingMode) -> Self {
        match rm {
            RoundingMode::TiesToEven => ApRound::NearestTiesToEven,
            RoundingMode::TowardZero => ApRound::TowardZero,
            RoundingMode::TowardNegative => ApRound::TowardNegative,
            RoundingMode::TowardPositive => ApRound::TowardPositive,
            RoundingMode::TiesToAway => ApRound::NearestTiesToAway,
        }
    }
}
