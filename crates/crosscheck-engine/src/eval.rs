//! Static evaluation and game-over detection.

use crosscheck_core::{BOARD_SIZE, Position, Side, Variant};

use crate::score::{BLACK_WINS, DRAW, WHITE_WINS};

/// Evaluate a position statically, from White's perspective.
///
/// Three-Checks weighs material against checks in hand; King's-Cross weighs
/// material against king progress. Both stay strictly inside the forced-win
/// band, so a static value can never masquerade as a win.
pub fn evaluate(pos: &Position, variant: Variant) -> i32 {
    let white_knights = pos.knight_count(Side::White) as i32;
    let black_knights = pos.knight_count(Side::Black) as i32;
    match variant {
        Variant::ThreeChecks => {
            let white = 2 * white_knights + pos.checks_remaining(Side::White) as i32;
            let black = 2 * black_knights + pos.checks_remaining(Side::Black) as i32;
            white - black
        }
        Variant::KingsCross => {
            let size = BOARD_SIZE as i32;
            let white = 2 * white_knights + (size - pos.king(Side::White).row() as i32);
            let black = 2 * black_knights + pos.king(Side::Black).row() as i32 + 1;
            white - black
        }
    }
}

/// Detect a finished game, given the number of legal moves available.
///
/// Returns the terminal value from White's perspective, or `None` when the
/// game goes on. In Three-Checks a side whose counter reached zero has
/// absorbed its third check and loses; with no knights left on either side
/// no further check is possible and the game is drawn. In King's-Cross a
/// king standing on the far rank has won. In both variants a side with no
/// legal moves loses if in check and draws otherwise.
pub fn terminal_value(pos: &Position, legal_move_count: usize, variant: Variant) -> Option<i32> {
    match variant {
        Variant::ThreeChecks => {
            if pos.checks_remaining(Side::White) == 0 {
                return Some(BLACK_WINS);
            }
            if pos.checks_remaining(Side::Black) == 0 {
                return Some(WHITE_WINS);
            }
            if pos.knight_count(Side::White) == 0 && pos.knight_count(Side::Black) == 0 {
                return Some(DRAW);
            }
        }
        Variant::KingsCross => {
            if pos.king(Side::White).row() == Side::White.goal_row() {
                return Some(WHITE_WINS);
            }
            if pos.king(Side::Black).row() == Side::Black.goal_row() {
                return Some(BLACK_WINS);
            }
        }
    }
    if legal_move_count == 0 {
        if pos.in_check() {
            return Some(match pos.to_move() {
                Side::White => BLACK_WINS,
                Side::Black => WHITE_WINS,
            });
        }
        return Some(DRAW);
    }
    None
}
