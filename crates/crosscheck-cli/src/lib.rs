//! Terminal front end for crosscheck: option parsing, rendering, user
//! input, and the interactive game loop.

pub mod error;
pub mod game;
pub mod input;
pub mod options;
pub mod render;

pub use error::{CliError, InputError, OptionsError};
pub use game::Game;
pub use options::Options;
