//! Alpha-beta move-selection agent
//!
//! One-request/one-response: the controller writes a single state line
//! to stdin and expects exactly one move token on stdout before the
//! time limit.

use std::io::BufRead;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use mancala_core::{parse_state_line, Searcher};

pub fn run(time_limit: f64) -> Result<()> {
    if time_limit.is_nan() || time_limit <= 0.0 {
        bail!("time limit must be positive, got {}", time_limit);
    }

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read state line from stdin")?;

    let state = parse_state_line(&line)
        .with_context(|| format!("malformed state line: {:?}", line.trim()))?;

    let budget = Duration::from_secs_f64(time_limit);
    let searcher = Searcher::default();
    let mv = searcher
        .select_move(&state, budget)
        .context("no legal move in received state")?;

    tracing::debug!(ply = state.ply, side = %state.to_move, %mv, "selected move");
    println!("{}", mv);
    Ok(())
}
