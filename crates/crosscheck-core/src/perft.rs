//! Perft (performance test) over the legal move generator.

use crate::movegen::legal_moves;
use crate::position::Position;
use crate::variant::Variant;

/// Count the number of leaf nodes at the given depth.
///
/// Walks the generator only; win conditions are not consulted, so this is a
/// pure movegen/apply exerciser. Depth 0 returns 1, depth 1 returns the
/// number of legal moves without recursing.
pub fn perft(pos: &Position, variant: Variant, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(pos, variant);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for &mv in moves.as_slice() {
        let child = pos.make_move(mv, variant);
        nodes += perft(&child, variant, depth - 1);
    }
    nodes
}

/// Run perft with a per-move breakdown (useful for debugging).
///
/// Returns `(move, node_count)` pairs sorted by textual move form.
pub fn divide(pos: &Position, variant: Variant, depth: usize) -> Vec<(String, u64)> {
    let moves = legal_moves(pos, variant);
    let mut results: Vec<(String, u64)> = moves
        .as_slice()
        .iter()
        .map(|&mv| {
            let child = pos.make_move(mv, variant);
            let count = if depth <= 1 { 1 } else { perft(&child, variant, depth - 1) };
            (mv.to_string(), count)
        })
        .collect();
    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::side::Side;
    use crate::square::Square;

    #[test]
    fn perft_depth_0_is_1() {
        assert_eq!(perft(&Position::starting(), Variant::ThreeChecks, 0), 1);
    }

    #[test]
    fn perft_startpos_depth_1() {
        assert_eq!(perft(&Position::starting(), Variant::ThreeChecks, 1), 16);
    }

    #[test]
    fn perft_lone_kings() {
        let pos = Position::from_parts(
            &[],
            &[],
            Square::new(1, 0),
            Square::new(4, 5),
            [3, 3],
            Side::White,
        )
        .unwrap();
        assert_eq!(perft(&pos, Variant::ThreeChecks, 1), 5);
    }

    #[test]
    fn perft_matches_mirror() {
        let pos = Position::starting();
        let mirrored = pos.mirror();
        for depth in 1..=3 {
            assert_eq!(
                perft(&pos, Variant::ThreeChecks, depth),
                perft(&mirrored, Variant::ThreeChecks, depth),
                "mirror perft diverges at depth {depth}"
            );
        }
    }

    #[test]
    fn divide_sums_to_perft() {
        let pos = Position::starting();
        let total: u64 = divide(&pos, Variant::ThreeChecks, 3).iter().map(|(_, n)| n).sum();
        assert_eq!(total, perft(&pos, Variant::ThreeChecks, 3));
    }

    #[test]
    fn perft_same_for_both_variants_at_start() {
        // Legality is variant-independent; only ordering differs.
        let pos = Position::starting();
        for depth in 1..=2 {
            assert_eq!(
                perft(&pos, Variant::ThreeChecks, depth),
                perft(&pos, Variant::KingsCross, depth)
            );
        }
    }
}
