//! The two supported game variants.

use std::fmt;

/// Which win condition is in force.
///
/// The variant drives move ordering, static evaluation, and game-over
/// detection; everything else (piece movement, check rules) is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    /// The side that delivers its opponent's third check wins.
    #[default]
    ThreeChecks,
    /// The side whose king first reaches the far rank wins.
    KingsCross,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::ThreeChecks => write!(f, "three-checks"),
            Variant::KingsCross => write!(f, "kings-cross"),
        }
    }
}
