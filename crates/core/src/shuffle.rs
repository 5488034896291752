//! Shuffle module - redistribute remaining symbols until a move exists
//!
//! Tiles keep their ids and positions; only the symbol values are permuted.
//! The retry loop is bounded so a board that can never become solvable fails
//! loudly instead of spinning.

use tracing::{debug, instrument, warn};

use crate::board::Board;
use crate::error::CoreError;
use crate::rng::SimpleRng;
use crate::solver::find_available_pair;

/// Permute the remaining symbols until the board has a connectable pair.
///
/// Always performs at least one permutation when tiles remain. Returns the
/// number of permutations applied (0 for an empty board).
#[instrument(level = "debug", skip(board, rng))]
pub fn reshuffle(
    board: &mut Board,
    rng: &mut SimpleRng,
    max_turns: u8,
    max_attempts: u32,
) -> Result<u32, CoreError> {
    let mut values = board.values();
    if values.is_empty() {
        return Ok(0);
    }

    let max_attempts = max_attempts.max(1);
    for attempt in 1..=max_attempts {
        rng.shuffle(&mut values);
        board.assign_values(&values);
        if find_available_pair(board, max_turns).is_some() {
            debug!(attempt, tiles = values.len(), "reshuffle produced a solvable board");
            return Ok(attempt);
        }
    }

    warn!(
        attempts = max_attempts,
        tiles = values.len(),
        "reshuffle gave up without finding a move"
    );
    Err(CoreError::ReshuffleExhausted {
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::is_deadlocked;
    use crate::types::{Position, LEVELS, THEMES};

    fn sorted(mut v: Vec<u16>) -> Vec<u16> {
        v.sort_unstable();
        v
    }

    #[test]
    fn test_reshuffle_preserves_multiset_and_positions() {
        let mut rng = SimpleRng::new(42);
        let mut board = Board::initialize(&LEVELS[2], &THEMES[0], &mut rng).unwrap();
        let before_values = sorted(board.values());
        let before_slots: Vec<(u32, Position)> =
            board.remaining_tiles().map(|t| (t.id, t.pos)).collect();

        let attempts = reshuffle(&mut board, &mut rng, 3, 1000).unwrap();
        assert!(attempts >= 1);

        assert_eq!(sorted(board.values()), before_values);
        let after_slots: Vec<(u32, Position)> =
            board.remaining_tiles().map(|t| (t.id, t.pos)).collect();
        assert_eq!(before_slots, after_slots);
        assert!(!is_deadlocked(&board, 3));
    }

    #[test]
    fn test_reshuffle_breaks_deadlock() {
        let mut board = Board::from_ascii(&["AB", "BA"]).unwrap();
        assert!(is_deadlocked(&board, 0));
        let mut rng = SimpleRng::new(5);
        reshuffle(&mut board, &mut rng, 0, 1000).unwrap();
        assert!(!is_deadlocked(&board, 0));
    }

    #[test]
    fn test_reshuffle_empty_board_is_noop() {
        let mut board = Board::from_ascii(&[".."]).unwrap();
        let mut rng = SimpleRng::new(1);
        assert_eq!(reshuffle(&mut board, &mut rng, 3, 10), Ok(0));
    }

    #[test]
    fn test_reshuffle_exhaustion_is_an_error() {
        // Two A's on a diagonal can never meet without turning.
        let mut board = Board::from_ascii(&["A.", ".A"]).unwrap();
        let mut rng = SimpleRng::new(9);
        assert_eq!(
            reshuffle(&mut board, &mut rng, 0, 25),
            Err(CoreError::ReshuffleExhausted { attempts: 25 })
        );
    }
}
