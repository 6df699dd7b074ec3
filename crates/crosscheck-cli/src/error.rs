//! Error types for the terminal front end.

use crosscheck_core::{Move, ParseMoveError};
use crosscheck_engine::EngineError;

/// Errors from command-line flag parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    /// A flag that requires a value was given none.
    #[error("flag {flag} requires a value")]
    MissingValue {
        /// The flag (e.g. "-h").
        flag: &'static str,
    },
    /// A flag value could not be parsed as a number.
    #[error("invalid value \"{value}\" for flag {flag}")]
    InvalidValue {
        /// The flag.
        flag: &'static str,
        /// The value string that failed to parse.
        value: String,
    },
    /// A flag value parsed but falls outside its accepted range.
    #[error("value {value} for flag {flag} is outside {min}..={max}")]
    OutOfRange {
        /// The flag.
        flag: &'static str,
        /// The rejected value.
        value: u64,
        /// Lowest accepted value.
        min: u64,
        /// Highest accepted value.
        max: u64,
    },
    /// An argument that is not a recognized flag.
    #[error("unknown flag \"{flag}\"")]
    UnknownFlag {
        /// The offending argument.
        flag: String,
    },
}

/// Errors from reading and validating a user move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// The input does not parse as a move.
    #[error(transparent)]
    Parse(#[from] ParseMoveError),
    /// The move parses but is not legal in the current position.
    #[error("{mv} is not a legal move here")]
    Illegal {
        /// The rejected move.
        mv: Move,
    },
}

/// Top-level errors of the terminal game.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Flag parsing failed.
    #[error(transparent)]
    Options(#[from] OptionsError),
    /// Engine construction failed.
    #[error(transparent)]
    Engine(#[from] EngineError),
    /// Reading or writing the terminal failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
