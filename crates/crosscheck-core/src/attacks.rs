//! Attack geometry for the two piece kinds.

use crate::square::Square;

/// The eight L-shaped knight offsets.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// The eight adjacent king offsets.
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Return `true` if a knight on `from` attacks `to`.
#[inline]
pub fn knight_attacks(from: Square, to: Square) -> bool {
    let dr = (from.row() as i8 - to.row() as i8).abs();
    let dc = (from.col() as i8 - to.col() as i8).abs();
    (dr == 2 && dc == 1) || (dr == 1 && dc == 2)
}

/// Return `true` if a king on `from` attacks `to`.
///
/// A piece does not attack its own square.
#[inline]
pub fn king_attacks(from: Square, to: Square) -> bool {
    let dr = (from.row() as i8 - to.row() as i8).abs();
    let dc = (from.col() as i8 - to.col() as i8).abs();
    dr.max(dc) == 1
}

#[cfg(test)]
mod tests {
    use super::{KING_OFFSETS, KNIGHT_OFFSETS, king_attacks, knight_attacks};
    use crate::square::Square;

    #[test]
    fn knight_attack_pattern() {
        let from = Square::new(2, 2);
        let attacked: Vec<Square> = Square::all().filter(|&to| knight_attacks(from, to)).collect();
        assert_eq!(attacked.len(), 8);
        assert!(attacked.contains(&Square::new(0, 1)));
        assert!(attacked.contains(&Square::new(4, 3)));
        assert!(!attacked.contains(&Square::new(2, 2)));
        assert!(!attacked.contains(&Square::new(3, 3)));
    }

    #[test]
    fn knight_attack_is_symmetric() {
        for from in Square::all() {
            for to in Square::all() {
                assert_eq!(knight_attacks(from, to), knight_attacks(to, from));
            }
        }
    }

    #[test]
    fn king_attack_pattern() {
        let from = Square::new(3, 3);
        let attacked: Vec<Square> = Square::all().filter(|&to| king_attacks(from, to)).collect();
        assert_eq!(attacked.len(), 8);
        assert!(attacked.contains(&Square::new(2, 2)));
        assert!(attacked.contains(&Square::new(4, 4)));
        assert!(!attacked.contains(&from));
    }

    #[test]
    fn king_corner_attacks_three() {
        let from = Square::new(0, 0);
        let attacked = Square::all().filter(|&to| king_attacks(from, to)).count();
        assert_eq!(attacked, 3);
    }

    #[test]
    fn offsets_match_predicates() {
        let from = Square::new(3, 3);
        for (dr, dc) in KNIGHT_OFFSETS {
            let to = from.offset(dr, dc).unwrap();
            assert!(knight_attacks(from, to));
        }
        for (dr, dc) in KING_OFFSETS {
            let to = from.offset(dr, dc).unwrap();
            assert!(king_attacks(from, to));
        }
    }
}
