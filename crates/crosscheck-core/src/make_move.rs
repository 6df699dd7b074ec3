//! Move execution via copy-make.

use crate::attacks::knight_attacks;
use crate::moves::Move;
use crate::position::Position;
use crate::variant::Variant;

impl Position {
    /// Apply a legal move, producing the child position.
    ///
    /// The parent is untouched. The destination knight of the side that did
    /// not move is captured if present; kings are never captured because a
    /// protected square is not a legal king destination.
    ///
    /// # Panics
    ///
    /// Panics if no piece of the side to move stands on the source square.
    /// The generator only emits moves from occupied squares, so this
    /// indicates a caller bug.
    pub fn make_move(&self, mv: Move, variant: Variant) -> Position {
        let mover = self.to_move;
        let mut child = *self;
        child.to_move = !mover;

        debug_assert!(
            child.kings[child.to_move.index()] != mv.end(),
            "king on a protected square was captured"
        );
        if let Some(index) = child.knight_index(child.to_move, mv.end()) {
            child.knights[child.to_move.index()].remove(index);
        }

        if mv.start() == self.kings[mover.index()] {
            child.kings[mover.index()] = mv.end();
            child.checker = None;
        } else {
            let index = child
                .knight_index(mover, mv.start())
                .expect("no piece of the side to move on the source square");
            child.knights[mover.index()].set(index, mv.end());
            let gives_check = knight_attacks(mv.end(), child.kings[child.to_move.index()]);
            child.checker = gives_check.then_some(mv.end());
            if gives_check && variant == Variant::ThreeChecks {
                let checked = child.to_move.index();
                // Floors at 0; a side already out of checks is terminal.
                child.checks[checked] = child.checks[checked].saturating_sub(1);
            }
        }
        child
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::side::Side;
    use crate::square::Square;

    fn custom(
        white_knights: &[Square],
        black_knights: &[Square],
        white_king: Square,
        black_king: Square,
        to_move: Side,
    ) -> Position {
        Position::from_parts(white_knights, black_knights, white_king, black_king, [3, 3], to_move)
            .unwrap()
    }

    #[test]
    fn quiet_knight_move_flips_turn() {
        let pos = Position::starting();
        let mv = Move::new(Square::new(5, 2), Square::new(3, 1));
        let child = pos.make_move(mv, Variant::ThreeChecks);
        assert_eq!(child.to_move(), Side::Black);
        assert!(child.knights(Side::White).contains(&Square::new(3, 1)));
        assert!(!child.knights(Side::White).contains(&Square::new(5, 2)));
        assert!(!child.in_check());
        assert_eq!(child.checks_remaining(Side::Black), 3);
        // Parent untouched.
        assert!(pos.knights(Side::White).contains(&Square::new(5, 2)));
    }

    #[test]
    fn capture_removes_enemy_knight() {
        let pos = custom(
            &[Square::new(4, 2)],
            &[Square::new(2, 1), Square::new(0, 0)],
            Square::new(5, 5),
            Square::new(0, 5),
            Side::White,
        );
        let mv = Move::new(Square::new(4, 2), Square::new(2, 1));
        let child = pos.make_move(mv, Variant::ThreeChecks);
        assert_eq!(child.knight_count(Side::Black), 1);
        assert_eq!(child.knights(Side::Black), &[Square::new(0, 0)]);
        assert!(child.knights(Side::White).contains(&Square::new(2, 1)));
    }

    #[test]
    fn capture_preserves_knight_order() {
        let pos = custom(
            &[Square::new(4, 2)],
            &[Square::new(0, 0), Square::new(2, 1), Square::new(0, 4)],
            Square::new(5, 5),
            Square::new(0, 5),
            Side::White,
        );
        let child = pos.make_move(Move::new(Square::new(4, 2), Square::new(2, 1)), Variant::ThreeChecks);
        assert_eq!(child.knights(Side::Black), &[Square::new(0, 0), Square::new(0, 4)]);
    }

    #[test]
    fn check_sets_checker_and_decrements() {
        // Nb4 (from a2) attacks the black king on a6.
        let pos = custom(
            &[Square::new(4, 0)],
            &[],
            Square::new(5, 5),
            Square::new(0, 0),
            Side::White,
        );
        let mv = Move::new(Square::new(4, 0), Square::new(2, 1));
        let child = pos.make_move(mv, Variant::ThreeChecks);
        assert!(child.in_check());
        assert_eq!(child.checker(), Some(Square::new(2, 1)));
        assert_eq!(child.checks_remaining(Side::Black), 2);
        assert_eq!(child.checks_remaining(Side::White), 3);
    }

    #[test]
    fn kings_cross_check_does_not_decrement() {
        let pos = custom(
            &[Square::new(4, 0)],
            &[],
            Square::new(5, 5),
            Square::new(0, 0),
            Side::White,
        );
        let child = pos.make_move(Move::new(Square::new(4, 0), Square::new(2, 1)), Variant::KingsCross);
        assert!(child.in_check());
        assert_eq!(child.checks_remaining(Side::Black), 3);
    }

    #[test]
    fn king_move_clears_check_state() {
        // White king in check escapes; the child has no checker.
        let pos = custom(
            &[],
            &[Square::new(3, 1)],
            Square::new(5, 0),
            Square::new(0, 5),
            Side::White,
        );
        assert!(pos.in_check());
        let child = pos.make_move(Move::new(Square::new(5, 0), Square::new(5, 1)), Variant::ThreeChecks);
        assert!(!child.in_check());
        assert_eq!(child.king(Side::White), Square::new(5, 1));
        assert_eq!(child.to_move(), Side::Black);
    }

    #[test]
    fn capturing_the_checker_clears_check() {
        let pos = custom(
            &[Square::new(1, 0)],
            &[Square::new(3, 1)],
            Square::new(5, 0),
            Square::new(0, 5),
            Side::White,
        );
        assert_eq!(pos.checker(), Some(Square::new(3, 1)));
        let child = pos.make_move(Move::new(Square::new(1, 0), Square::new(3, 1)), Variant::ThreeChecks);
        assert!(!child.in_check());
        assert_eq!(child.knight_count(Side::Black), 0);
    }
}
