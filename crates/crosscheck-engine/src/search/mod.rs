//! The search stack: kernel, transposition table, and root driver.

pub mod kernel;
pub mod pool;
mod semaphore;
pub mod tt;

pub use kernel::{SHALLOW_EXECUTION_DEPTH, SHALLOW_SEARCH_DEPTH, SearchContext, SearchOutcome, find_best_move};
pub use pool::{Engine, EngineConfig, EngineError, EvaluatedMove, RootChoice};
pub use tt::{HASH_DEPTH, Lookup, TranspositionTable};
