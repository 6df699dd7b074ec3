//! Bijective packing of positions into fixed-width keys.

use crosscheck_core::{MAX_KNIGHTS, Position, PositionError, Side, Square};

/// Bits per packed square slot.
const SLOT_BITS: u32 = 6;

/// Mask for one packed square slot.
const SLOT_MASK: u32 = (1 << SLOT_BITS) - 1;

/// Bit offset of the king slot (directly above the four knight slots).
const KING_SHIFT: u32 = SLOT_BITS * MAX_KNIGHTS as u32;

/// A compressed position.
///
/// One 32-bit word per side: four 6-bit knight slots from bit 0 holding
/// `square index + 1` (so an unused slot reads 0), and the king's square
/// index in the six bits above them. The meta byte packs the side to move
/// (bit 0) and both check counters (White in bits 1–2, Black in bits 3–4).
///
/// The mapping is a bijection on reachable states: knight lists keep a
/// stable order through capture shifts, so equal positions always compress
/// to equal keys. Check state is intentionally absent; it is derivable
/// from the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Key {
    /// White's packed knights and king.
    pub white: u32,
    /// Black's packed knights and king.
    pub black: u32,
    /// Side to move and check counters.
    pub meta: u8,
}

/// Compress a position into its key.
pub fn compress(pos: &Position) -> Key {
    let pack_side = |side: Side| {
        let mut word = 0u32;
        for (slot, &square) in pos.knights(side).iter().enumerate() {
            word |= (square.index() as u32 + 1) << (SLOT_BITS * slot as u32);
        }
        word | (pos.king(side).index() as u32) << KING_SHIFT
    };
    let meta = pos.to_move() as u8
        | pos.checks_remaining(Side::White) << 1
        | pos.checks_remaining(Side::Black) << 3;
    Key {
        white: pack_side(Side::White),
        black: pack_side(Side::Black),
        meta,
    }
}

/// Reconstruct the position a key was compressed from.
///
/// The check state is recomputed from the board. Fails only on keys that
/// did not come from [`compress`] (overlapping or out-of-range squares).
pub fn decompress(key: Key) -> Result<Position, PositionError> {
    let unpack_knights = |word: u32| {
        let mut squares = Vec::with_capacity(MAX_KNIGHTS);
        for slot in 0..MAX_KNIGHTS as u32 {
            let bits = (word >> (SLOT_BITS * slot)) & SLOT_MASK;
            if bits != 0 {
                if let Some(square) = Square::from_index(bits as u8 - 1) {
                    squares.push(square);
                }
            }
        }
        squares
    };
    let unpack_king = |word: u32| {
        Square::from_index(((word >> KING_SHIFT) & SLOT_MASK) as u8)
            .unwrap_or(Square::new(0, 0))
    };
    let to_move = if key.meta & 1 == 0 { Side::White } else { Side::Black };
    let checks = [(key.meta >> 1) & 0x3, (key.meta >> 3) & 0x3];
    Position::from_parts(
        &unpack_knights(key.white),
        &unpack_knights(key.black),
        unpack_king(key.white),
        unpack_king(key.black),
        checks,
        to_move,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crosscheck_core::{Variant, legal_moves};

    #[test]
    fn single_knight_occupies_first_slot() {
        let pos = Position::from_parts(
            &[Square::new(0, 0)],
            &[],
            Square::new(5, 0),
            Square::new(0, 5),
            [3, 3],
            Side::White,
        )
        .unwrap();
        let key = compress(&pos);
        // Square a6 has index 0; the +1 offset keeps it distinct from an
        // empty slot.
        assert_eq!(key.white & 0x3F, 1);
        assert_eq!((key.white >> 6) & 0x3F, 0);
        assert_eq!(key.white >> 24, 30); // king on a1 = index 30
        assert_eq!(key.black >> 24, 5); // king on f6 = index 5
    }

    #[test]
    fn meta_packs_turn_and_checks() {
        let pos = Position::from_parts(
            &[],
            &[],
            Square::new(5, 0),
            Square::new(0, 5),
            [2, 1],
            Side::Black,
        )
        .unwrap();
        let key = compress(&pos);
        assert_eq!(key.meta, 1 | (2 << 1) | (1 << 3));
    }

    #[test]
    fn starting_position_roundtrip() {
        let pos = Position::starting();
        let key = compress(&pos);
        let restored = decompress(key).unwrap();
        assert_eq!(restored, pos);
        assert_eq!(compress(&restored), key);
    }

    #[test]
    fn roundtrip_along_a_game() {
        // Walk a deterministic line and verify the bijection at each step.
        let variant = Variant::ThreeChecks;
        let mut pos = Position::starting();
        for ply in 0..12 {
            let moves = legal_moves(&pos, variant);
            if moves.is_empty() {
                break;
            }
            pos = pos.make_move(moves[ply % moves.len()], variant);
            let key = compress(&pos);
            let restored = decompress(key).unwrap();
            assert_eq!(compress(&restored), key, "roundtrip diverged at ply {ply}");
            assert_eq!(restored, pos);
        }
    }

    #[test]
    fn distinct_positions_get_distinct_keys() {
        let a = Position::starting();
        let moves = legal_moves(&a, Variant::ThreeChecks);
        let mut keys: Vec<Key> = moves
            .as_slice()
            .iter()
            .map(|&mv| compress(&a.make_move(mv, Variant::ThreeChecks)))
            .collect();
        keys.push(compress(&a));
        let before = keys.len();
        keys.sort_by_key(|k| (k.white, k.black, k.meta));
        keys.dedup();
        assert_eq!(keys.len(), before);
    }

    #[test]
    fn check_state_is_recomputed() {
        let pos = Position::from_parts(
            &[],
            &[Square::new(3, 1)],
            Square::new(5, 0),
            Square::new(0, 5),
            [3, 3],
            Side::White,
        )
        .unwrap();
        assert!(pos.in_check());
        let restored = decompress(compress(&pos)).unwrap();
        assert!(restored.in_check());
        assert_eq!(restored.checker(), Some(Square::new(3, 1)));
    }
}
