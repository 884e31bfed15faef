//! Match command - run games between two player programs
//!
//! The controller owns the authoritative game state. Each turn it
//! spawns the current side's player command, writes one state line to
//! its stdin, reads one move token from its stdout, and applies the
//! move through the rules engine. An illegal or missing reply forfeits
//! the game to the opponent; rule enforcement is never bypassed.

use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};
use clap::Args;

use mancala_core::{format_state_line, GameState, Move, Player};

/// Hard cap on plies per game; a stuck pairing is scored as a draw
const MAX_PLIES: u32 = 1000;

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Command line (quoted) for the first player program
    #[arg(long)]
    pub player1: String,

    /// Command line (quoted) for the second player program
    #[arg(long)]
    pub player2: String,

    /// Number of games to play (colors alternate)
    #[arg(long, default_value = "1")]
    pub games: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    /// Winning side, if any
    winner: Option<Player>,
    /// Program (1 or 2 as given on the command line) playing side 1
    program_as_side1: usize,
    p1_score: u8,
    p2_score: u8,
    plies: u32,
    forfeit: bool,
}

/// Aggregated match results per program
#[derive(Clone, Debug)]
struct MatchResults {
    games: Vec<GameRecord>,
    program1_wins: usize,
    program2_wins: usize,
    draws: usize,
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

pub fn run(args: MatchArgs) -> Result<()> {
    tracing::info!(
        player1 = %args.player1,
        player2 = %args.player2,
        games = args.games,
        "starting match"
    );

    let mut games = Vec::with_capacity(args.games);
    for game_num in 0..args.games {
        // Alternate which program opens as side 1 for fairness
        let program_as_side1 = if game_num % 2 == 0 { 1 } else { 2 };
        let (side1_cmd, side2_cmd) = if program_as_side1 == 1 {
            (&args.player1, &args.player2)
        } else {
            (&args.player2, &args.player1)
        };

        let record = play_single_game(side1_cmd, side2_cmd, game_num + 1, program_as_side1)?;
        tracing::info!(
            game = record.game_number,
            winner = ?record.winner,
            score = %format!("{}-{}", record.p1_score, record.p2_score),
            plies = record.plies,
            "game finished"
        );
        games.push(record);
    }

    let results = compute_match_statistics(games);
    if args.json {
        print_json_results(&results)?;
    } else {
        print_text_results(&results);
    }
    Ok(())
}

// ============================================================================
// GAME LOOP
// ============================================================================

/// Play one game, spawning a fresh player process per move
fn play_single_game(
    side1_cmd: &str,
    side2_cmd: &str,
    game_number: usize,
    program_as_side1: usize,
) -> Result<GameRecord> {
    let mut state = GameState::new();
    let mut plies = 0u32;

    while !state.is_terminal() && plies < MAX_PLIES {
        let mover = state.to_move;
        let cmd = match mover {
            Player::One => side1_cmd,
            Player::Two => side2_cmd,
        };

        let reply = match request_move(cmd, &state) {
            Ok(reply) => reply,
            Err(err) => {
                tracing::warn!(side = %mover, error = %err, "player failed to respond");
                return Ok(forfeit_record(game_number, program_as_side1, mover, state, plies));
            }
        };

        let mv: Move = match reply.parse() {
            Ok(mv) => mv,
            Err(err) => {
                tracing::warn!(side = %mover, reply = %reply, error = %err, "unparseable move");
                return Ok(forfeit_record(game_number, program_as_side1, mover, state, plies));
            }
        };

        // Illegal moves end the game; they are never absorbed
        state = match state.apply(mv) {
            Ok(next) => next,
            Err(err) => {
                tracing::warn!(side = %mover, %mv, error = %err, "illegal move");
                return Ok(forfeit_record(game_number, program_as_side1, mover, state, plies));
            }
        };

        tracing::debug!(ply = state.ply, side = %mover, %mv, "applied move");
        plies += 1;
    }

    let p1_score = state.store(Player::One);
    let p2_score = state.store(Player::Two);
    let winner = match p1_score.cmp(&p2_score) {
        std::cmp::Ordering::Greater => Some(Player::One),
        std::cmp::Ordering::Less => Some(Player::Two),
        std::cmp::Ordering::Equal => None,
    };

    Ok(GameRecord {
        game_number,
        winner: if state.is_terminal() { winner } else { None },
        program_as_side1,
        p1_score,
        p2_score,
        plies,
        forfeit: false,
    })
}

/// One-request/one-response exchange with a player program
fn request_move(cmd: &str, state: &GameState) -> Result<String> {
    let parts: Vec<&str> = cmd.split_whitespace().collect();
    let Some((program, prog_args)) = parts.split_first() else {
        bail!("empty player command");
    };

    let mut child = Command::new(program)
        .args(prog_args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to spawn player: {}", cmd))?;

    {
        let mut stdin = child.stdin.take().context("no stdin handle on child")?;
        writeln!(stdin, "{}", format_state_line(state))
            .context("failed to write state line to player")?;
        // Dropping stdin closes the pipe so line-at-a-time players
        // waiting on EOF can proceed
    }

    let stdout = child.stdout.take().context("no stdout handle on child")?;
    let mut reply = String::new();
    BufReader::new(stdout)
        .read_line(&mut reply)
        .context("failed to read move from player")?;
    let _ = child.wait();

    let reply = reply.trim().to_string();
    if reply.is_empty() {
        bail!("player produced no move");
    }
    Ok(reply)
}

/// Score a forfeit: the offending side loses by default
fn forfeit_record(
    game_number: usize,
    program_as_side1: usize,
    offender: Player,
    state: GameState,
    plies: u32,
) -> GameRecord {
    GameRecord {
        game_number,
        winner: Some(offender.opponent()),
        program_as_side1,
        p1_score: state.store(Player::One),
        p2_score: state.store(Player::Two),
        plies,
        forfeit: true,
    }
}

// ============================================================================
// REPORTING
// ============================================================================

/// Which command-line program won a game, if any
fn winning_program(record: &GameRecord) -> Option<usize> {
    record.winner.map(|side| match (side, record.program_as_side1) {
        (Player::One, p) => p,
        (Player::Two, 1) => 2,
        (Player::Two, _) => 1,
    })
}

fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let program1_wins = games
        .iter()
        .filter(|g| winning_program(g) == Some(1))
        .count();
    let program2_wins = games
        .iter()
        .filter(|g| winning_program(g) == Some(2))
        .count();
    let draws = games.iter().filter(|g| g.winner.is_none()).count();

    MatchResults {
        games,
        program1_wins,
        program2_wins,
        draws,
    }
}

fn print_json_results(results: &MatchResults) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        winner: Option<u8>,
        program_as_side1: usize,
        p1_score: u8,
        p2_score: u8,
        plies: u32,
        forfeit: bool,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total_games: usize,
        program1_wins: usize,
        program2_wins: usize,
        draws: usize,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        total_games: results.games.len(),
        program1_wins: results.program1_wins,
        program2_wins: results.program2_wins,
        draws: results.draws,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                winner: g.winner.map(|p| p as u8),
                program_as_side1: g.program_as_side1,
                p1_score: g.p1_score,
                p2_score: g.p2_score,
                plies: g.plies,
                forfeit: g.forfeit,
            })
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_text_results(results: &MatchResults) {
    let total = results.games.len();

    println!("\n=== Match Results ===");
    println!("Total games:   {}", total);
    println!("Player 1 wins: {}", results.program1_wins);
    println!("Player 2 wins: {}", results.program2_wins);
    println!("Draws:         {}", results.draws);

    println!("\nGame details:");
    for game in &results.games {
        let outcome = match game.winner {
            Some(side) => format!("side {} wins", side),
            None => "draw".to_string(),
        };
        println!(
            "  Game {}: {} {}-{} in {} plies{}",
            game.game_number,
            outcome,
            game.p1_score,
            game.p2_score,
            game.plies,
            if game.forfeit { " (forfeit)" } else { "" }
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
