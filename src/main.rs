use anyhow::Result;
use tracing::info;

use crosscheck_cli::{Game, Options};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let options = Options::parse_args(std::env::args().skip(1))?;
    info!(
        variant = %options.variant,
        depth = options.depth,
        threads = options.threads,
        hash_slots = options.hash_slots,
        "crosscheck starting"
    );
    Game::new(options)?.run()?;
    Ok(())
}
