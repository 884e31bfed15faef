//! Random move agent
//!
//! Picks uniformly among the legal moves. The seed is an explicit
//! argument rather than wall-clock time so runs are reproducible.

use std::io::BufRead;

use anyhow::{bail, Context, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use mancala_core::parse_state_line;

pub fn run(seed: u64) -> Result<()> {
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read state line from stdin")?;

    let state = parse_state_line(&line)
        .with_context(|| format!("malformed state line: {:?}", line.trim()))?;

    let moves = state.legal_moves();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let Some(mv) = moves.choose(&mut rng) else {
        bail!("no legal move in received state");
    };

    println!("{}", mv);
    Ok(())
}
