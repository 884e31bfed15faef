//! Mancala CLI - Command-line interface
//!
//! Commands:
//! - agent: alpha-beta player (one state line in, one move out)
//! - random: seeded random player
//! - match: controller pitting two player programs against each other

mod agent;
mod match_cmd;
mod random_agent;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mancala")]
#[command(about = "Mancala game engine, search agent, and match controller")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read one state line from stdin, print the searched best move
    Agent {
        /// Per-move time budget in seconds
        #[arg(long, default_value = "0.95")]
        time_limit: f64,
    },
    /// Read one state line from stdin, print a uniformly random legal move
    Random {
        /// RNG seed (explicit for reproducibility)
        #[arg(long)]
        seed: u64,
    },
    /// Run games between two player programs
    Match(match_cmd::MatchArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr: stdout is the wire protocol for the agent
    // subcommands, and the controller's report also prints there.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Agent { time_limit } => agent::run(time_limit),
        Commands::Random { seed } => random_agent::run(seed),
        Commands::Match(args) => match_cmd::run(args),
    }
}
