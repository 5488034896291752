//! Solver module - deadlock detection
//!
//! Scans the remaining tiles for one connectable pair. The scan order is fixed
//! (row-major, `i < j`), so the same board always yields the same pair.

use crate::board::Board;
use crate::path::can_connect;
use crate::types::Position;

/// First connectable pair of equal-valued tiles, if any.
pub fn find_available_pair(board: &Board, max_turns: u8) -> Option<(Position, Position)> {
    let tiles: Vec<_> = board.remaining_tiles().copied().collect();
    for (i, a) in tiles.iter().enumerate() {
        for b in &tiles[i + 1..] {
            if a.value == b.value && can_connect(board, a.pos, b.pos, max_turns) {
                return Some((a.pos, b.pos));
            }
        }
    }
    None
}

/// Tiles remain but no pair can be connected.
pub fn is_deadlocked(board: &Board, max_turns: u8) -> bool {
    !board.is_cleared() && find_available_pair(board, max_turns).is_none()
}
