//! Mancala Core - Game engine and AI
//!
//! This crate provides the core logic for a six-pit Mancala (Kalah) game:
//! - Ring geometry for sowing (13-slot ring, opponent store excluded)
//! - Game state, legal-move generation, and move application
//! - Position evaluation with mobility and capture heuristics
//! - Deadline-bounded iterative-deepening alpha-beta search
//! - Text wire protocol for controller <-> agent exchange

pub mod board;
pub mod game;
pub mod eval;
pub mod search;
pub mod protocol;

// Re-exports for convenient access
pub use board::{PITS_PER_SIDE, SEEDS_PER_PIT, TOTAL_SEEDS};
pub use game::{GameState, Move, Player, RulesError};
pub use eval::{Weights, evaluate};
pub use search::{Searcher, SearchError};
pub use protocol::{parse_state_line, format_state_line, ProtocolError};
