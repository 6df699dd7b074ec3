//! Root fan-out across a semaphore-bounded worker pool.

use rand::Rng;
use tracing::debug;

use crosscheck_core::{Move, Position, Side, Variant, legal_moves};

use crate::eval::terminal_value;
use crate::score::{ALPHA_REJECT, BETA_REJECT};
use crate::search::kernel::{SearchContext, SearchOutcome, find_best_move};
use crate::search::semaphore::Semaphore;
use crate::search::tt::TranspositionTable;

/// Engine configuration, validated by [`Engine::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Which variant's rules to play by.
    pub variant: Variant,
    /// Root search depth in plies (1..=12).
    pub depth: u8,
    /// Concurrent worker bound (1..=64).
    pub threads: usize,
    /// Requested transposition table slots (1..=1_000_000); rounded down
    /// to a prime.
    pub hash_slots: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            variant: Variant::ThreeChecks,
            depth: 9,
            threads: 8,
            hash_slots: 99_991,
        }
    }
}

/// Errors from engine construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The search depth is outside 1..=12.
    #[error("search depth {depth} is outside 1..=12")]
    InvalidDepth {
        /// The rejected depth.
        depth: u8,
    },
    /// The worker count is outside 1..=64.
    #[error("thread count {threads} is outside 1..=64")]
    InvalidThreadCount {
        /// The rejected count.
        threads: usize,
    },
    /// The table size is outside 1..=1_000_000.
    #[error("hash table size {slots} is outside 1..=1000000")]
    InvalidTableSize {
        /// The rejected size.
        slots: usize,
    },
}

/// A root move with its minimax evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatedMove {
    /// The root move.
    pub mv: Move,
    /// Its evaluation, from White's perspective.
    pub evaluation: i32,
}

/// The outcome of one engine response.
#[derive(Debug, Clone)]
pub struct RootChoice {
    /// The chosen move.
    pub mv: Move,
    /// The chosen move's evaluation (the extremum for the side to move).
    pub evaluation: i32,
    /// Every root move with its evaluation, in generation order.
    pub root_moves: Vec<EvaluatedMove>,
    /// Positions entered across all workers.
    pub nodes: u64,
    /// Candidates discarded by shallow probes across all workers.
    pub shallow_rejects: u64,
}

/// The engine: a transposition table plus the root driver that shares it
/// across a bounded pool of workers.
///
/// The table and the per-call semaphore are owned here and passed down by
/// reference; there is no module-level state.
pub struct Engine {
    config: EngineConfig,
    table: TranspositionTable,
}

impl Engine {
    /// Create an engine, allocating its transposition table.
    pub fn new(config: EngineConfig) -> Result<Engine, EngineError> {
        if !(1..=12).contains(&config.depth) {
            return Err(EngineError::InvalidDepth { depth: config.depth });
        }
        if !(1..=64).contains(&config.threads) {
            return Err(EngineError::InvalidThreadCount { threads: config.threads });
        }
        if !(1..=1_000_000).contains(&config.hash_slots) {
            return Err(EngineError::InvalidTableSize { slots: config.hash_slots });
        }
        Ok(Engine {
            config,
            table: TranspositionTable::new(config.hash_slots),
        })
    }

    /// Return the configuration the engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Return `(probes, hits)` recorded by the table during the last call.
    pub fn table_stats(&self) -> (u64, u64) {
        self.table.stats()
    }

    /// Compute the engine's move for `pos`, or `None` when the game is
    /// already over.
    ///
    /// Each root move is applied and handed to a worker that searches the
    /// child with the open window at the full starting depth. A counting
    /// semaphore keeps at most `threads` workers in flight; each worker
    /// writes to its own result slot, so the table is the only shared
    /// mutable state. Ties at the extremum are broken uniformly at random.
    pub fn choose_move(&self, pos: &Position) -> Option<RootChoice> {
        let variant = self.config.variant;
        let depth = self.config.depth;

        // No memory is kept across engine responses.
        self.table.clear();

        let moves = legal_moves(pos, variant);
        if terminal_value(pos, moves.len(), variant).is_some() {
            return None;
        }

        debug!(
            moves = moves.len(),
            depth,
            threads = self.config.threads,
            %variant,
            "root fan-out"
        );

        let mut reports: Vec<Option<(i32, u64, u64)>> = vec![None; moves.len()];
        let semaphore = Semaphore::new(self.config.threads);

        std::thread::scope(|s| {
            for (slot, &mv) in reports.iter_mut().zip(moves.as_slice()) {
                semaphore.acquire();
                let child = pos.make_move(mv, variant);
                let table = &self.table;
                let semaphore = &semaphore;
                s.spawn(move || {
                    let mut ctx = SearchContext::new(table, variant);
                    let (outcome, _) =
                        find_best_move(&child, ALPHA_REJECT, BETA_REJECT, depth, &mut ctx);
                    let evaluation = match outcome {
                        SearchOutcome::Value(value) => value,
                        SearchOutcome::AlphaReject | SearchOutcome::BetaReject => {
                            unreachable!("open-window search cannot fail outside the window")
                        }
                    };
                    *slot = Some((evaluation, ctx.nodes(), ctx.shallow_rejects()));
                    semaphore.release();
                });
            }
        });

        let mut nodes = 0;
        let mut shallow_rejects = 0;
        let root_moves: Vec<EvaluatedMove> = moves
            .as_slice()
            .iter()
            .zip(&reports)
            .map(|(&mv, report)| {
                let (evaluation, worker_nodes, worker_rejects) =
                    report.expect("worker exited without reporting");
                nodes += worker_nodes;
                shallow_rejects += worker_rejects;
                EvaluatedMove { mv, evaluation }
            })
            .collect();

        let evaluations = root_moves.iter().map(|em| em.evaluation);
        let best = match pos.to_move() {
            Side::White => evaluations.max(),
            Side::Black => evaluations.min(),
        }
        .expect("a non-terminal position has root moves");

        let ties: Vec<&EvaluatedMove> = root_moves
            .iter()
            .filter(|em| em.evaluation == best)
            .collect();
        let chosen = ties[rand::thread_rng().gen_range(0..ties.len())];

        let (probes, hits) = self.table.stats();
        debug!(
            nodes,
            shallow_rejects,
            table_probes = probes,
            table_hits = hits,
            evaluation = best,
            mv = %chosen.mv,
            "root search finished"
        );

        Some(RootChoice {
            mv: chosen.mv,
            evaluation: best,
            root_moves,
            nodes,
            shallow_rejects,
        })
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("table", &self.table)
            .finish()
    }
}
