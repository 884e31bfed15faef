//! Game state, move generation, and move application

use crate::board::{
    self, PITS_PER_SIDE, RING_SLOTS, SEEDS_PER_PIT, STORE_SLOT,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Side to move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One = 1,
    Two = 2,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

/// A move token
///
/// `Pit` carries the 1-based pit index (1..=6) relative to the side to
/// move. `Swap` is the one-time pie-rule move, printed as `PIE` on the
/// wire and accepted as either `PIE` or `SWAP` on input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Pit(u8),
    Swap,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Pit(n) => write!(f, "{}", n),
            Move::Swap => write!(f, "PIE"),
        }
    }
}

impl FromStr for Move {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.eq_ignore_ascii_case("PIE") || token.eq_ignore_ascii_case("SWAP") {
            return Ok(Move::Swap);
        }
        let pit: u8 = token
            .parse()
            .map_err(|_| RulesError::BadMoveToken(token.to_string()))?;
        Ok(Move::Pit(pit))
    }
}

/// Rule violations, always surfaced to the caller
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RulesError {
    #[error("pit {pit} is out of range 1..={max}", max = PITS_PER_SIDE)]
    PitOutOfRange { pit: u8 },

    #[error("pit {pit} is empty")]
    EmptyPit { pit: u8 },

    #[error("swap is only legal for player 2 on ply 2")]
    SwapUnavailable,

    #[error("unrecognized move token: {0:?}")]
    BadMoveToken(String),
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Immutable game snapshot
///
/// Every transition returns a fresh value; nothing mutates in place.
/// The search tree is therefore a tree of snapshots with no undo logic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub p1_pits: [u8; PITS_PER_SIDE],
    pub p2_pits: [u8; PITS_PER_SIDE],
    pub p1_store: u8,
    pub p2_store: u8,
    /// Ply counter, increments once per move including the swap
    pub ply: u32,
    pub to_move: Player,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Standard opening position: 4 seeds in each of 12 pits
    pub fn new() -> Self {
        Self {
            p1_pits: [SEEDS_PER_PIT; PITS_PER_SIDE],
            p2_pits: [SEEDS_PER_PIT; PITS_PER_SIDE],
            p1_store: 0,
            p2_store: 0,
            ply: 1,
            to_move: Player::One,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn pits(&self, player: Player) -> &[u8; PITS_PER_SIDE] {
        match player {
            Player::One => &self.p1_pits,
            Player::Two => &self.p2_pits,
        }
    }

    pub fn store(&self, player: Player) -> u8 {
        match player {
            Player::One => self.p1_store,
            Player::Two => self.p2_store,
        }
    }

    /// Total seeds on the board; conserved by every transition
    pub fn seed_total(&self) -> u32 {
        self.p1_pits.iter().map(|&s| s as u32).sum::<u32>()
            + self.p2_pits.iter().map(|&s| s as u32).sum::<u32>()
            + self.p1_store as u32
            + self.p2_store as u32
    }

    /// True iff either side's six pits are all empty
    pub fn is_terminal(&self) -> bool {
        self.p1_pits.iter().all(|&s| s == 0) || self.p2_pits.iter().all(|&s| s == 0)
    }

    /// Whether the one-time swap is currently available
    pub fn swap_available(&self) -> bool {
        self.to_move == Player::Two && self.ply == 2
    }

    // ========================================================================
    // MOVE GENERATION
    // ========================================================================

    /// All legal moves in deterministic order: swap first when available,
    /// then non-empty pits in ascending index order
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(PITS_PER_SIDE + 1);
        if self.swap_available() {
            moves.push(Move::Swap);
        }
        let pits = self.pits(self.to_move);
        for (i, &seeds) in pits.iter().enumerate() {
            if seeds > 0 {
                moves.push(Move::Pit(i as u8 + 1));
            }
        }
        moves
    }

    // ========================================================================
    // APPLY MOVE
    // ========================================================================

    /// Apply a move, returning the successor state
    ///
    /// Illegal moves are rejected with a [`RulesError`], never absorbed
    /// as a no-op.
    pub fn apply(&self, mv: Move) -> Result<GameState, RulesError> {
        match mv {
            Move::Swap => self.apply_swap(),
            Move::Pit(pit) => self.apply_pit(pit),
        }
    }

    fn apply_swap(&self) -> Result<GameState, RulesError> {
        if !self.swap_available() {
            return Err(RulesError::SwapUnavailable);
        }

        let mut next = *self;
        std::mem::swap(&mut next.p1_pits, &mut next.p2_pits);
        std::mem::swap(&mut next.p1_store, &mut next.p2_store);
        next.to_move = Player::One;
        next.ply += 1;
        Ok(next)
    }

    fn apply_pit(&self, pit: u8) -> Result<GameState, RulesError> {
        if pit < 1 || pit as usize > PITS_PER_SIDE {
            return Err(RulesError::PitOutOfRange { pit });
        }
        let pit_index = pit as usize - 1;

        let mover = self.to_move;
        let mut next = *self;

        let seeds = next.pits(mover)[pit_index];
        if seeds == 0 {
            return Err(RulesError::EmptyPit { pit });
        }

        // Sow: one seed per ring slot, wrapping modulo 13. The opponent's
        // store is not a ring slot, so it is skipped by construction.
        next.own_pits_mut(mover)[pit_index] = 0;
        let mut slot = pit_index;
        for _ in 0..seeds {
            slot = (slot + 1) % RING_SLOTS;
            if board::is_own_pit(slot) {
                next.own_pits_mut(mover)[slot] += 1;
            } else if slot == STORE_SLOT {
                next.add_to_store(mover, 1);
            } else {
                debug_assert!(board::is_opponent_pit(slot));
                next.opp_pits_mut(mover)[board::opponent_pit(slot)] += 1;
            }
        }

        debug_assert_eq!(slot, board::landing_slot(pit_index, seeds as u32));

        let extra_turn = slot == STORE_SLOT;

        // Capture: last seed into a previously-empty own pit, opposite
        // opponent pit non-empty, and no extra turn
        if !extra_turn && board::is_own_pit(slot) && next.pits(mover)[slot] == 1 {
            let opposite = board::mirror(slot);
            let captured = next.pits(mover.opponent())[opposite];
            if captured > 0 {
                next.add_to_store(mover, 1 + captured);
                next.own_pits_mut(mover)[slot] = 0;
                next.opp_pits_mut(mover)[opposite] = 0;
            }
        }

        next.ply += 1;
        if !extra_turn {
            next.to_move = mover.opponent();
        }

        if next.is_terminal() {
            next.collect_remaining();
        }

        Ok(next)
    }

    /// Sweep each side's remaining pit seeds into its own store
    fn collect_remaining(&mut self) {
        let p1_rest: u8 = self.p1_pits.iter().sum();
        let p2_rest: u8 = self.p2_pits.iter().sum();
        self.p1_store += p1_rest;
        self.p2_store += p2_rest;
        self.p1_pits = [0; PITS_PER_SIDE];
        self.p2_pits = [0; PITS_PER_SIDE];
    }

    // ========================================================================
    // MUTATION HELPERS (private; only used while building a successor)
    // ========================================================================

    fn own_pits_mut(&mut self, player: Player) -> &mut [u8; PITS_PER_SIDE] {
        match player {
            Player::One => &mut self.p1_pits,
            Player::Two => &mut self.p2_pits,
        }
    }

    fn opp_pits_mut(&mut self, player: Player) -> &mut [u8; PITS_PER_SIDE] {
        self.own_pits_mut(player.opponent())
    }

    fn add_to_store(&mut self, player: Player, seeds: u8) {
        match player {
            Player::One => self.p1_store += seeds,
            Player::Two => self.p2_store += seeds,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
