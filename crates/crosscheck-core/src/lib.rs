//! Core game types for crosscheck: the 6×6 board, positions, and legal
//! move generation for the Three-Checks and King's-Cross variants.

mod attacks;
mod error;
mod make_move;
mod movegen;
mod moves;
mod perft;
mod position;
mod side;
mod square;
mod variant;

pub use attacks::{KING_OFFSETS, KNIGHT_OFFSETS, king_attacks, knight_attacks};
pub use error::{ParseMoveError, PositionError};
pub use movegen::{MoveList, legal_moves};
pub use moves::Move;
pub use perft::{divide, perft};
pub use position::{KnightList, MAX_KNIGHTS, Position};
pub use side::Side;
pub use square::{BOARD_SIZE, Square};
pub use variant::Variant;
