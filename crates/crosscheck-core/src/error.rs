//! Error types for move parsing and position validation.

use crate::side::Side;
use crate::square::Square;

/// Errors from parsing a textual move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseMoveError {
    /// The input does not have the shape of a move.
    #[error("expected a move like \"b1a3\" or \"b1-a3\", got \"{text}\"")]
    Malformed {
        /// The offending input.
        text: String,
    },
    /// A coordinate in the input is not a board square.
    #[error("\"{text}\" is not a square (files a..f, ranks 1..6)")]
    BadSquare {
        /// The offending coordinate pair.
        text: String,
    },
}

/// Errors from structural validation of a [`Position`](crate::Position).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    /// Two pieces claim the same square.
    #[error("two pieces occupy {square}")]
    OverlappingPieces {
        /// The doubly occupied square.
        square: Square,
    },
    /// A side has more knights than the board allows.
    #[error("{side} has {count} knights, maximum is 4")]
    TooManyKnights {
        /// The offending side.
        side: Side,
        /// Number of knights supplied.
        count: usize,
    },
    /// A check counter is outside 0..=3.
    #[error("{side} has {count} checks remaining, maximum is 3")]
    InvalidCheckCount {
        /// The offending side.
        side: Side,
        /// The supplied counter.
        count: u8,
    },
}
