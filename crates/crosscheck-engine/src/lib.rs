//! Search and evaluation for crosscheck: static evaluation, position
//! compression, the shared transposition table, the alpha-beta kernel, and
//! the parallel root driver.

pub mod compress;
pub mod eval;
pub mod score;
pub mod search;

pub use compress::{Key, compress, decompress};
pub use eval::{evaluate, terminal_value};
pub use search::{
    Engine, EngineConfig, EngineError, EvaluatedMove, Lookup, RootChoice, SearchContext,
    SearchOutcome, TranspositionTable, find_best_move,
};
