//! Board cursor handling.
//!
//! Terminals have no pointer, so taps go through a cursor that walks the
//! content cells. The cursor never enters the border ring.

use crate::map::InputCommand;
use crate::types::{Direction, GameAction, Position};

/// Tracks the board cursor and turns commands into game actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputHandler {
    cursor: Position,
    /// Content size the cursor is clamped to (border excluded).
    cols: u16,
    rows: u16,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            cursor: Position::new(1, 1),
            cols: 1,
            rows: 1,
        }
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Fit the cursor to a padded board of `width x height` cells.
    ///
    /// Keeps the current position when it is still inside the content area,
    /// otherwise moves back to the top-left content cell.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.cols = width.saturating_sub(2).max(1);
        self.rows = height.saturating_sub(2).max(1);
        if !self.in_content(self.cursor) {
            self.cursor = Position::new(1, 1);
        }
    }

    /// Put the cursor back on the top-left content cell.
    pub fn reset(&mut self) {
        self.cursor = Position::new(1, 1);
    }

    fn in_content(&self, pos: Position) -> bool {
        pos.x >= 1 && pos.y >= 1 && pos.x as u16 <= self.cols && pos.y as u16 <= self.rows
    }

    /// Move one cell; stops at the content edge. Returns whether it moved.
    pub fn move_cursor(&mut self, dir: Direction) -> bool {
        let next = self.cursor.step(dir);
        if self.in_content(next) {
            self.cursor = next;
            true
        } else {
            false
        }
    }

    /// Apply an in-game command. Cursor moves stay local; everything else
    /// becomes a game action.
    pub fn handle(&mut self, command: InputCommand) -> Option<GameAction> {
        match command {
            InputCommand::Move(dir) => {
                self.move_cursor(dir);
                None
            }
            InputCommand::Tap => Some(GameAction::Tap(self.cursor)),
            InputCommand::Action(action) => Some(action),
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
