use serde::Serialize;

use crate::path::ConnectionPath;
use crate::types::{GameStatus, Position, Symbol};

/// Read-only view of a [`crate::GameState`] for renderers and observers.
///
/// `cells` is row-major over the padded board (`width * height`), border
/// included, holding the symbol of each occupied cell.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GameSnapshot {
    pub width: u16,
    pub height: u16,
    pub cells: Vec<Option<Symbol>>,
    pub selected: Option<Position>,
    pub hint: Option<(Position, Position)>,
    pub wrong_pair: Option<(Position, Position)>,
    /// Matched pair waiting for its removal delay.
    pub pending: Option<(Position, Position)>,
    pub connection: Option<ConnectionPath>,
    pub status: GameStatus,
    pub score: u32,
    pub combo: u32,
    pub hints_remaining: u32,
    pub shuffles_remaining: u32,
    pub time_left: u32,
    pub remaining_tiles: usize,
    pub level_id: &'static str,
    pub level_name: &'static str,
    pub level_index: usize,
    pub theme_id: &'static str,
    pub theme_index: usize,
    /// Symbol pool of the active theme.
    #[serde(skip)]
    pub glyphs: &'static [&'static str],
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        let cells = std::mem::take(&mut self.cells);
        *self = Self {
            cells,
            ..Self::default()
        };
        self.cells.clear();
    }

    /// Symbol at `pos`, `None` for empty or out-of-bounds cells.
    pub fn cell(&self, pos: Position) -> Option<Symbol> {
        if pos.x < 0 || pos.y < 0 || pos.x as u16 >= self.width || pos.y as u16 >= self.height {
            return None;
        }
        let idx = pos.y as usize * self.width as usize + pos.x as usize;
        self.cells.get(idx).copied().flatten()
    }

    /// Display string for a symbol in the active theme.
    pub fn glyph(&self, symbol: Symbol) -> &'static str {
        self.glyphs.get(symbol as usize).copied().unwrap_or("?")
    }

    pub fn playable(&self) -> bool {
        self.status == GameStatus::Playing
    }
}
