//! The recursive alpha-beta search kernel.

use crosscheck_core::{Move, MoveList, Position, Side, Variant, legal_moves};

use crate::compress::compress;
use crate::eval::{evaluate, terminal_value};
use crate::score::{ALPHA_REJECT, BETA_REJECT, fade_decided};
use crate::search::tt::{Lookup, TranspositionTable};

/// Depth of the forward-pruning probe searches.
pub const SHALLOW_SEARCH_DEPTH: u8 = 5;

/// Minimum remaining depth at which forward pruning runs.
pub const SHALLOW_EXECUTION_DEPTH: u8 = 8;

/// The outcome of one search call.
///
/// A bound violation short-circuits the caller's loop instead of producing
/// an evaluation, so it is a distinct variant rather than an in-band value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A minimax evaluation in `[-120, 120]`.
    Value(i32),
    /// The subtree's value falls at or below the caller's `alpha`.
    AlphaReject,
    /// The subtree's value rises to or above the caller's `beta`.
    BetaReject,
}

/// Per-worker search state. The table reference is the only shared piece.
pub struct SearchContext<'a> {
    pub(crate) table: &'a TranspositionTable,
    pub(crate) variant: Variant,
    /// Positions entered (kernel invocations).
    pub(crate) nodes: u64,
    /// Candidate moves discarded by the shallow probe.
    pub(crate) shallow_rejects: u64,
}

impl<'a> SearchContext<'a> {
    /// Create a context for one worker.
    pub fn new(table: &'a TranspositionTable, variant: Variant) -> SearchContext<'a> {
        SearchContext { table, variant, nodes: 0, shallow_rejects: 0 }
    }

    /// Positions entered so far.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Moves discarded by the shallow probe so far.
    pub fn shallow_rejects(&self) -> u64 {
        self.shallow_rejects
    }
}

/// Depth-limited alpha-beta search, dispatched on the side to move.
///
/// White raises `alpha`, Black lowers `beta`; a crossed bound returns the
/// matching reject immediately. Child evaluations come from the shared
/// table when a deep-enough entry exists, otherwise from recursion; fresh
/// values are stored into the slot reserved by the table probe (rejects are
/// never cached; they are bound-relative, not evaluations).
///
/// At high remaining depth each candidate after the first is first probed
/// with a depth-[`SHALLOW_SEARCH_DEPTH`] search; a candidate whose probe
/// already fails the current window on the moving side's side of it, and
/// does not improve on the best probe seen at this node, is skipped.
///
/// A decided best value is faded one step per frame on the way up, so its
/// distance from ±120 counts the plies to the win. Ties prefer the move
/// generated last, which together with score bucketing varies tie-breaks
/// across depths.
pub fn find_best_move(
    pos: &Position,
    mut alpha: i32,
    mut beta: i32,
    depth: u8,
    ctx: &mut SearchContext<'_>,
) -> (SearchOutcome, Option<Move>) {
    ctx.nodes += 1;

    if depth == 0 {
        return (SearchOutcome::Value(evaluate(pos, ctx.variant)), None);
    }

    let moves = legal_moves(pos, ctx.variant);
    if let Some(value) = terminal_value(pos, moves.len(), ctx.variant) {
        return (SearchOutcome::Value(value), None);
    }

    let white_to_move = pos.to_move() == Side::White;
    let mut evaluations = [0i32; MoveList::CAPACITY];
    let mut shallow_best: Option<i32> = None;

    for (i, &mv) in moves.as_slice().iter().enumerate() {
        let child = pos.make_move(mv, ctx.variant);

        if depth >= SHALLOW_EXECUTION_DEPTH {
            let probe =
                find_best_move(&child, ALPHA_REJECT, BETA_REJECT, SHALLOW_SEARCH_DEPTH, ctx).0;
            if let SearchOutcome::Value(shallow) = probe {
                match shallow_best {
                    None => shallow_best = Some(shallow),
                    Some(best_probe) => {
                        let rejected = if white_to_move {
                            shallow < alpha && shallow <= best_probe
                        } else {
                            shallow > beta && shallow >= best_probe
                        };
                        if rejected {
                            ctx.shallow_rejects += 1;
                            evaluations[i] = if white_to_move { ALPHA_REJECT } else { BETA_REJECT };
                            continue;
                        }
                        shallow_best = Some(if white_to_move {
                            best_probe.max(shallow)
                        } else {
                            best_probe.min(shallow)
                        });
                    }
                }
            }
        }

        let key = compress(&child);
        let evaluation = match ctx.table.check(key, depth) {
            Lookup::Hit(value) => value,
            Lookup::Miss(index) => match find_best_move(&child, alpha, beta, depth - 1, ctx).0 {
                SearchOutcome::Value(value) => {
                    ctx.table.store(index, key, value, depth);
                    value
                }
                // The reservation stays pending; revisits of this position
                // within the same response recompute without caching.
                SearchOutcome::AlphaReject => ALPHA_REJECT,
                SearchOutcome::BetaReject => BETA_REJECT,
            },
            Lookup::InProgress | Lookup::Full => {
                match find_best_move(&child, alpha, beta, depth - 1, ctx).0 {
                    SearchOutcome::Value(value) => value,
                    SearchOutcome::AlphaReject => ALPHA_REJECT,
                    SearchOutcome::BetaReject => BETA_REJECT,
                }
            }
        };
        evaluations[i] = evaluation;

        if white_to_move {
            if evaluation >= beta {
                return (SearchOutcome::BetaReject, None);
            }
            alpha = alpha.max(evaluation);
        } else {
            if evaluation <= alpha {
                return (SearchOutcome::AlphaReject, None);
            }
            beta = beta.min(evaluation);
        }
    }

    let mut best = 0;
    for i in 0..moves.len() {
        let better = if white_to_move {
            evaluations[i] >= evaluations[best]
        } else {
            evaluations[i] <= evaluations[best]
        };
        if better {
            best = i;
        }
    }

    // Every candidate failed the same bound: propagate the failure.
    match evaluations[best] {
        ALPHA_REJECT => (SearchOutcome::AlphaReject, None),
        BETA_REJECT => (SearchOutcome::BetaReject, None),
        value => (SearchOutcome::Value(fade_decided(value)), Some(moves[best])),
    }
}
