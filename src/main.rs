//! Gridfall terminal runner (default binary).
//!
//! Reads the session configuration from `GRIDFALL_*` environment variables,
//! takes over the terminal and runs the game until the player quits.

use anyhow::Result;

use gridfall::engine::{run, SessionConfig};
use gridfall::term::TerminalRenderer;

fn main() -> Result<()> {
    let config = SessionConfig::from_env();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}
