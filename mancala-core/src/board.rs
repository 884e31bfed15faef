//! Sowing ring geometry
//!
//! The board is modeled per mover as a 13-slot logical ring: the mover's
//! six pits (slots 0-5), the mover's store (slot 6), then the opponent's
//! six pits (slots 7-12). The opponent's store is not part of the ring,
//! so it is never a deposit target. Every code path that walks the ring
//! goes through this module so the convention cannot drift.

/// Pits per side
pub const PITS_PER_SIDE: usize = 6;

/// Seeds in each pit at game start
pub const SEEDS_PER_PIT: u8 = 4;

/// Logical ring slots per mover (own pits + own store + opponent pits)
pub const RING_SLOTS: usize = 13;

/// Ring slot of the mover's store
pub const STORE_SLOT: usize = 6;

/// Total seeds on the board at game start
pub const TOTAL_SEEDS: u32 = (PITS_PER_SIDE as u32) * 2 * (SEEDS_PER_PIT as u32);

/// Directly-opposite opponent pit for an own pit (both 0-based)
pub const fn mirror(pit: usize) -> usize {
    PITS_PER_SIDE - 1 - pit
}

/// Final ring slot when sowing `seeds` seeds from 0-based `pit`
pub const fn landing_slot(pit: usize, seeds: u32) -> usize {
    (pit + seeds as usize) % RING_SLOTS
}

/// Whether a slot is one of the mover's own pits
pub const fn is_own_pit(slot: usize) -> bool {
    slot < PITS_PER_SIDE
}

/// Whether a slot is one of the opponent's pits
pub const fn is_opponent_pit(slot: usize) -> bool {
    slot > STORE_SLOT && slot < RING_SLOTS
}

/// Opponent pit index (0-based) for a ring slot in 7..=12
///
/// Slot 7 is the opponent pit adjacent to the mover's store, which is
/// the opponent's pit 1 in their own numbering.
pub const fn opponent_pit(slot: usize) -> usize {
    slot - STORE_SLOT - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror() {
        assert_eq!(mirror(0), 5);
        assert_eq!(mirror(2), 3);
        assert_eq!(mirror(5), 0);
    }

    #[test]
    fn test_landing_slot_reaches_store() {
        // Pit 3 (0-based) with 3 seeds lands exactly in the store
        assert_eq!(landing_slot(3, 3), STORE_SLOT);
        // Pit 0 with 6 seeds also lands in the store
        assert_eq!(landing_slot(0, 6), STORE_SLOT);
    }

    #[test]
    fn test_landing_slot_wraps() {
        // 13 seeds go all the way around and land back on the start pit
        assert_eq!(landing_slot(2, 13), 2);
        // Enough seeds to pass the opponent's row
        assert_eq!(landing_slot(5, 8), 0);
    }

    #[test]
    fn test_opponent_pit_mapping() {
        assert_eq!(opponent_pit(7), 0);
        assert_eq!(opponent_pit(12), 5);
    }

    #[test]
    fn test_slot_classification() {
        assert!(is_own_pit(0));
        assert!(is_own_pit(5));
        assert!(!is_own_pit(6));
        assert!(!is_opponent_pit(6));
        assert!(is_opponent_pit(7));
        assert!(is_opponent_pit(12));
    }
}
