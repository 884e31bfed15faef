//! Text wire protocol between controller and agents
//!
//! One line per exchange. The controller sends a state line:
//!
//! `STATE <N> <p1_1..6> <p2_1..6> <p1_store> <p2_store> <ply> <side>`
//!
//! and the agent answers with a single move token (`1`-`6` or `PIE`).
//! The parser also accepts the headerless 16-token form, since the
//! tokens are self-describing once the pit count is fixed at six.

use crate::board::PITS_PER_SIDE;
use crate::game::{GameState, Player};
use thiserror::Error;

/// Wire-format violations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("expected {expected} fields, got {got}")]
    TokenCount { expected: usize, got: usize },

    #[error("unsupported pit count {0} (only 6 is supported)")]
    BadPitCount(usize),

    #[error("not a number: {0:?}")]
    BadToken(String),

    #[error("seed count {0} exceeds what a 48-seed board can hold")]
    ValueOutOfRange(u32),

    #[error("side to move must be 1 or 2, got {0}")]
    BadPlayer(u32),
}

/// Fields after the optional `STATE <N>` header
const FIELD_COUNT: usize = 2 * PITS_PER_SIDE + 4;

/// Parse a state line into a [`GameState`]
pub fn parse_state_line(line: &str) -> Result<GameState, ProtocolError> {
    let mut tokens: Vec<&str> = line.split_whitespace().collect();

    // Optional controller header
    if tokens.first() == Some(&"STATE") {
        let pits = parse_number(tokens.get(1).copied().unwrap_or(""))? as usize;
        if pits != PITS_PER_SIDE {
            return Err(ProtocolError::BadPitCount(pits));
        }
        tokens.drain(..2);
    }

    if tokens.len() != FIELD_COUNT {
        return Err(ProtocolError::TokenCount {
            expected: FIELD_COUNT,
            got: tokens.len(),
        });
    }

    let mut numbers = Vec::with_capacity(FIELD_COUNT);
    for token in &tokens {
        numbers.push(parse_number(token)?);
    }

    let mut p1_pits = [0u8; PITS_PER_SIDE];
    let mut p2_pits = [0u8; PITS_PER_SIDE];
    for i in 0..PITS_PER_SIDE {
        p1_pits[i] = seed_count(numbers[i])?;
        p2_pits[i] = seed_count(numbers[PITS_PER_SIDE + i])?;
    }

    let to_move = match numbers[FIELD_COUNT - 1] {
        1 => Player::One,
        2 => Player::Two,
        other => return Err(ProtocolError::BadPlayer(other)),
    };

    Ok(GameState {
        p1_pits,
        p2_pits,
        p1_store: seed_count(numbers[2 * PITS_PER_SIDE])?,
        p2_store: seed_count(numbers[2 * PITS_PER_SIDE + 1])?,
        ply: numbers[2 * PITS_PER_SIDE + 2],
        to_move,
    })
}

/// Narrow a pit or store field to u8, rejecting rather than truncating
fn seed_count(value: u32) -> Result<u8, ProtocolError> {
    u8::try_from(value).map_err(|_| ProtocolError::ValueOutOfRange(value))
}

/// Format a state line in the controller's `STATE 6 ...` form
pub fn format_state_line(state: &GameState) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(FIELD_COUNT + 2);
    parts.push("STATE".to_string());
    parts.push(PITS_PER_SIDE.to_string());
    parts.extend(state.p1_pits.iter().map(|s| s.to_string()));
    parts.extend(state.p2_pits.iter().map(|s| s.to_string()));
    parts.push(state.p1_store.to_string());
    parts.push(state.p2_store.to_string());
    parts.push(state.ply.to_string());
    parts.push(state.to_move.to_string());
    parts.join(" ")
}

fn parse_number(token: &str) -> Result<u32, ProtocolError> {
    token
        .parse()
        .map_err(|_| ProtocolError::BadToken(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_initial_state() {
        let line = "STATE 6 4 4 4 4 4 4 4 4 4 4 4 4 0 0 1 1";
        let state = parse_state_line(line).unwrap();
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn test_parse_headerless_form() {
        let line = "4 4 4 4 4 4 4 4 4 4 4 4 0 0 1 1";
        assert_eq!(parse_state_line(line).unwrap(), GameState::new());
    }

    #[test]
    fn test_round_trip() {
        let state = GameState::new()
            .apply(crate::game::Move::Pit(3))
            .unwrap()
            .apply(crate::game::Move::Pit(1))
            .unwrap();
        let line = format_state_line(&state);
        assert_eq!(parse_state_line(&line).unwrap(), state);
    }

    #[test]
    fn test_reject_wrong_field_count() {
        assert_eq!(
            parse_state_line("STATE 6 4 4 4"),
            Err(ProtocolError::TokenCount {
                expected: 16,
                got: 3
            })
        );
    }

    #[test]
    fn test_reject_bad_pit_count() {
        let line = "STATE 8 4 4 4 4 4 4 4 4 4 4 4 4 0 0 1 1";
        assert_eq!(parse_state_line(line), Err(ProtocolError::BadPitCount(8)));
    }

    #[test]
    fn test_reject_garbage_tokens() {
        let line = "STATE 6 4 4 x 4 4 4 4 4 4 4 4 4 0 0 1 1";
        assert_eq!(
            parse_state_line(line),
            Err(ProtocolError::BadToken("x".to_string()))
        );
    }

    #[test]
    fn test_reject_oversized_seed_counts() {
        // A truncating parser would fold 300 into 44 and accept the
        // line as a mangled board; it must be rejected instead
        let line = "STATE 6 300 4 4 4 4 4 4 4 4 4 4 4 0 0 1 1";
        assert_eq!(
            parse_state_line(line),
            Err(ProtocolError::ValueOutOfRange(300))
        );

        // Stores are narrowed the same way
        let line = "4 4 4 4 4 4 4 4 4 4 4 4 999 0 1 1";
        assert_eq!(
            parse_state_line(line),
            Err(ProtocolError::ValueOutOfRange(999))
        );
    }

    #[test]
    fn test_reject_bad_player() {
        let line = "4 4 4 4 4 4 4 4 4 4 4 4 0 0 1 3";
        assert_eq!(parse_state_line(line), Err(ProtocolError::BadPlayer(3)));
    }
}
