//! The interactive game loop: the user plays White, the engine answers.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use tracing::{debug, info, warn};

use crosscheck_core::{Move, Position, Side, legal_moves};
use crosscheck_engine::{Engine, Key, compress, terminal_value};
use crosscheck_engine::score::{BLACK_WINS, WHITE_WINS};

use crate::error::CliError;
use crate::input::parse_user_move;
use crate::options::Options;
use crate::render::{format_evaluated_move, format_evaluation, format_move, render_board};

/// Plies after which an unfinished game is called a draw.
const PLY_CAP: usize = 200;

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GameEnd {
    /// A win or draw under the variant's rules (terminal value).
    Decided(i32),
    /// The same position occurred three times.
    Repetition,
    /// The ply cap was reached.
    MoveCap,
}

fn describe_end(end: GameEnd) -> &'static str {
    match end {
        GameEnd::Decided(WHITE_WINS) => "White wins.",
        GameEnd::Decided(BLACK_WINS) => "Black wins.",
        GameEnd::Decided(_) => "Draw.",
        GameEnd::Repetition => "Draw by threefold repetition.",
        GameEnd::MoveCap => "Draw by move cap.",
    }
}

/// Check the current position and game history for an ended game.
fn game_end(pos: &Position, history: &[Key], options: &Options) -> Option<GameEnd> {
    let n = legal_moves(pos, options.variant).len();
    if let Some(value) = terminal_value(pos, n, options.variant) {
        return Some(GameEnd::Decided(value));
    }
    let key = compress(pos);
    if history.iter().filter(|&&k| k == key).count() >= 3 {
        return Some(GameEnd::Repetition);
    }
    if history.len() > PLY_CAP {
        return Some(GameEnd::MoveCap);
    }
    None
}

/// One interactive game.
pub struct Game {
    position: Position,
    engine: Engine,
    options: Options,
    history: Vec<Key>,
}

impl Game {
    /// Set up a game from the starting position.
    pub fn new(options: Options) -> Result<Game, CliError> {
        let engine = Engine::new(options.engine_config())?;
        let position = Position::starting();
        Ok(Game {
            position,
            engine,
            options,
            history: vec![compress(&position)],
        })
    }

    /// Run the game until it ends or input closes.
    pub fn run(&mut self) -> Result<(), CliError> {
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            print!("{}", render_board(&self.position));
            if let Some(end) = game_end(&self.position, &self.history, &self.options) {
                println!("{}", describe_end(end));
                break;
            }

            if self.position.to_move() == Side::White {
                let Some(mv) = self.read_user_move(&mut lines)? else {
                    info!("input closed, leaving the game");
                    break;
                };
                self.apply(mv);
            } else {
                self.engine_turn();
            }
        }
        Ok(())
    }

    fn engine_turn(&mut self) {
        let started = Instant::now();
        let Some(choice) = self.engine.choose_move(&self.position) else {
            // The loop checks for a finished game first.
            warn!("engine asked to move in a finished position");
            return;
        };
        let elapsed = started.elapsed();
        let (probes, hits) = self.engine.table_stats();

        debug!(
            mv = %choice.mv,
            evaluation = choice.evaluation,
            nodes = choice.nodes,
            shallow_rejects = choice.shallow_rejects,
            table_probes = probes,
            table_hits = hits,
            elapsed_ms = elapsed.as_millis() as u64,
            "engine move computed"
        );

        if self.options.verbose {
            for em in &choice.root_moves {
                println!("{}", format_evaluated_move(em));
            }
            println!(
                "nodes {}  table {hits}/{probes}  shallow rejects {}  time {:.1}s",
                choice.nodes,
                choice.shallow_rejects,
                elapsed.as_secs_f64()
            );
        }
        println!(
            "Engine plays {} ({})",
            format_move(choice.mv, self.options.verbose),
            format_evaluation(choice.evaluation)
        );
        self.apply(choice.mv);
    }

    fn apply(&mut self, mv: Move) {
        self.position = self.position.make_move(mv, self.options.variant);
        self.history.push(compress(&self.position));
    }

    /// Prompt until a legal move arrives; `None` means input closed.
    fn read_user_move<I>(&self, lines: &mut I) -> Result<Option<Move>, CliError>
    where
        I: Iterator<Item = io::Result<String>>,
    {
        loop {
            print!("Move: ");
            io::stdout().flush()?;
            let Some(line) = lines.next() else {
                return Ok(None);
            };
            match parse_user_move(&line?, &self.position, self.options.variant) {
                Ok(mv) => return Ok(Some(mv)),
                Err(err) => println!("{err}"),
            }
        }
    }
}
