//! Board module - the padded tile grid
//!
//! A level with `rows x cols` content cells is stored as a
//! `(rows + 2) x (cols + 2)` grid. The outer ring never holds a tile and gives
//! connecting paths room to run around the content.
//! Uses a flat row-major vector (`y * width + x`).

use crate::error::CoreError;
use crate::rng::SimpleRng;
use crate::types::{Level, Position, Symbol, Theme};

/// A tile placed on the board at generation time.
///
/// Tiles never move. Reshuffles only rewrite `value`; a matched tile is
/// removed from its cell and never comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub id: u32,
    pub value: Symbol,
    pub pos: Position,
}

/// The game board, border ring included
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    width: i16,
    height: i16,
    cells: Vec<Option<Tile>>,
}

impl Board {
    /// Build a fresh shuffled board for `level`, drawing symbols from `theme`.
    ///
    /// Pair `i` uses pool entry `i % pool_len`, so small pools repeat symbols.
    pub fn initialize(level: &Level, theme: &Theme, rng: &mut SimpleRng) -> Result<Self, CoreError> {
        if level.rows == 0 || level.cols == 0 {
            return Err(CoreError::EmptyBoard);
        }
        if level.tile_count() % 2 != 0 {
            return Err(CoreError::OddTileCount {
                rows: level.rows,
                cols: level.cols,
            });
        }
        if theme.items.is_empty() {
            return Err(CoreError::EmptySymbolPool {
                theme: theme.id.to_string(),
            });
        }

        let pool_len = theme.items.len();
        let pairs = (level.tile_count() / 2) as usize;
        let mut values: Vec<Symbol> = Vec::with_capacity(pairs * 2);
        for i in 0..pairs {
            let value = (i % pool_len) as Symbol;
            values.push(value);
            values.push(value);
        }
        rng.shuffle(&mut values);

        let mut board = Self::blank(level.cols as i16, level.rows as i16);
        let mut next = values.into_iter();
        let mut id = 0u32;
        for y in 1..=level.rows as i16 {
            for x in 1..=level.cols as i16 {
                if let Some(value) = next.next() {
                    id += 1;
                    board.place(Position::new(x, y), id, value);
                }
            }
        }

        Ok(board)
    }

    /// Build a board from a text layout of the content area.
    ///
    /// `.` is an empty cell; `A-Z`, `a-z` and `0-9` are symbols 0..62 in that
    /// order. The border ring is added around the layout. Pair parity is not
    /// checked, which makes this handy for puzzles and tests.
    pub fn from_ascii(rows: &[&str]) -> Result<Self, CoreError> {
        let cols = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        if rows.is_empty() || cols == 0 {
            return Err(CoreError::MalformedLayout { row: 0 });
        }

        let mut board = Self::blank(cols as i16, rows.len() as i16);
        let mut id = 0u32;
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != cols {
                return Err(CoreError::MalformedLayout { row: y });
            }
            for (x, ch) in row.chars().enumerate() {
                if let Some(value) = symbol_from_char(ch) {
                    id += 1;
                    board.place(Position::new(x as i16 + 1, y as i16 + 1), id, value);
                }
            }
        }
        Ok(board)
    }

    fn blank(content_cols: i16, content_rows: i16) -> Self {
        let width = content_cols + 2;
        let height = content_rows + 2;
        Self {
            width,
            height,
            cells: vec![None; (width as usize) * (height as usize)],
        }
    }

    fn place(&mut self, pos: Position, id: u32, value: Symbol) {
        if let Some(idx) = self.index(pos) {
            self.cells[idx] = Some(Tile { id, value, pos });
        }
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some((pos.y as usize) * (self.width as usize) + (pos.x as usize))
    }

    /// Width including the border ring
    pub fn width(&self) -> u16 {
        self.width as u16
    }

    /// Height including the border ring
    pub fn height(&self) -> u16 {
        self.height as u16
    }

    pub fn content_cols(&self) -> u16 {
        self.width().saturating_sub(2)
    }

    pub fn content_rows(&self) -> u16 {
        self.height().saturating_sub(2)
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    /// In bounds and not on the border ring
    pub fn is_content(&self, pos: Position) -> bool {
        pos.x >= 1 && pos.y >= 1 && pos.x < self.width - 1 && pos.y < self.height - 1
    }

    /// Tile at `pos`, if any
    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        self.index(pos).and_then(|idx| self.cells[idx].as_ref())
    }

    /// True iff `pos` is on the board and holds no tile.
    ///
    /// Out-of-bounds cells are blocked, not empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        matches!(self.index(pos), Some(idx) if self.cells[idx].is_none())
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.tile(pos).is_some()
    }

    /// Remove the tile at `pos`, returning it
    pub fn clear(&mut self, pos: Position) -> Option<Tile> {
        let idx = self.index(pos)?;
        self.cells[idx].take()
    }

    /// Every tile still on the board, in row-major order
    pub fn remaining_tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.cells.iter().filter_map(|c| c.as_ref())
    }

    pub fn remaining_count(&self) -> usize {
        self.remaining_tiles().count()
    }

    pub fn is_cleared(&self) -> bool {
        self.cells.iter().all(|c| c.is_none())
    }

    /// Symbols of the remaining tiles, row-major
    pub fn values(&self) -> Vec<Symbol> {
        self.remaining_tiles().map(|t| t.value).collect()
    }

    /// Overwrite the symbols of the remaining tiles, row-major.
    ///
    /// Positions and ids stay put. Extra values are ignored; missing values
    /// leave the trailing tiles untouched.
    pub(crate) fn assign_values(&mut self, values: &[Symbol]) {
        for (tile, &value) in self.cells.iter_mut().flatten().zip(values) {
            tile.value = value;
        }
    }

    /// Raw cells, row-major, border included
    pub fn cells(&self) -> &[Option<Tile>] {
        &self.cells
    }
}

fn symbol_from_char(ch: char) -> Option<Symbol> {
    match ch {
        'A'..='Z' => Some((ch as u32 - 'A' as u32) as Symbol),
        'a'..='z' => Some((26 + ch as u32 - 'a' as u32) as Symbol),
        '0'..='9' => Some((52 + ch as u32 - '0' as u32) as Symbol),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LEVELS, THEMES};
    use std::collections::HashMap;

    #[test]
    fn test_board_index_calculation() {
        let board = Board::blank(4, 6);
        assert_eq!(board.index(Position::new(0, 0)), Some(0));
        assert_eq!(board.index(Position::new(5, 0)), Some(5));
        assert_eq!(board.index(Position::new(0, 1)), Some(6));
        assert_eq!(board.index(Position::new(5, 7)), Some(47));
        assert_eq!(board.index(Position::new(-1, 0)), None);
        assert_eq!(board.index(Position::new(6, 0)), None);
        assert_eq!(board.index(Position::new(0, 8)), None);
    }

    #[test]
    fn test_initialize_pairs_every_symbol() {
        let mut rng = SimpleRng::new(3);
        let board = Board::initialize(&LEVELS[1], &THEMES[0], &mut rng).unwrap();

        assert_eq!(board.width(), 8);
        assert_eq!(board.height(), 10);
        assert_eq!(board.remaining_count(), 48);

        let mut counts: HashMap<Symbol, usize> = HashMap::new();
        for tile in board.remaining_tiles() {
            *counts.entry(tile.value).or_default() += 1;
        }
        assert!(counts.values().all(|c| c % 2 == 0));
    }

    #[test]
    fn test_initialize_keeps_border_empty() {
        let mut rng = SimpleRng::new(11);
        let board = Board::initialize(&LEVELS[0], &THEMES[1], &mut rng).unwrap();
        for y in 0..board.height() as i16 {
            for x in 0..board.width() as i16 {
                let pos = Position::new(x, y);
                assert_eq!(board.is_occupied(pos), board.is_content(pos), "{pos:?}");
            }
        }
    }

    #[test]
    fn test_initialize_cycles_small_pool() {
        const TINY: Theme = Theme {
            id: "tiny",
            name: "Tiny",
            items: &["x", "y"],
        };
        let mut rng = SimpleRng::new(1);
        let board = Board::initialize(&LEVELS[0], &TINY, &mut rng).unwrap();
        assert!(board.remaining_tiles().all(|t| t.value < 2));
        let zeros = board.remaining_tiles().filter(|t| t.value == 0).count();
        assert_eq!(zeros, 12);
    }

    #[test]
    fn test_tile_ids_are_unique() {
        let mut rng = SimpleRng::new(8);
        let board = Board::initialize(&LEVELS[3], &THEMES[0], &mut rng).unwrap();
        let mut ids: Vec<u32> = board.remaining_tiles().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), board.remaining_count());
    }

    #[test]
    fn test_from_ascii_layout() {
        let board = Board::from_ascii(&["AB", ".a", "90"]).unwrap();
        assert_eq!(board.width(), 4);
        assert_eq!(board.height(), 5);
        assert_eq!(board.tile(Position::new(1, 1)).map(|t| t.value), Some(0));
        assert_eq!(board.tile(Position::new(2, 1)).map(|t| t.value), Some(1));
        assert!(board.is_empty(Position::new(1, 2)));
        assert_eq!(board.tile(Position::new(2, 2)).map(|t| t.value), Some(26));
        assert_eq!(board.tile(Position::new(1, 3)).map(|t| t.value), Some(61));
        assert_eq!(board.tile(Position::new(2, 3)).map(|t| t.value), Some(52));
    }

    #[test]
    fn test_from_ascii_rejects_ragged_rows() {
        assert_eq!(
            Board::from_ascii(&["AB", "A"]),
            Err(CoreError::MalformedLayout { row: 1 })
        );
        assert_eq!(
            Board::from_ascii(&[]),
            Err(CoreError::MalformedLayout { row: 0 })
        );
    }

    #[test]
    fn test_assign_values_keeps_positions() {
        let mut board = Board::from_ascii(&["AB", "BA"]).unwrap();
        let before: Vec<(u32, Position)> = board.remaining_tiles().map(|t| (t.id, t.pos)).collect();
        board.assign_values(&[5, 5, 6, 6]);
        let after: Vec<(u32, Position)> = board.remaining_tiles().map(|t| (t.id, t.pos)).collect();
        assert_eq!(before, after);
        assert_eq!(board.values(), vec![5, 5, 6, 6]);
    }

    #[test]
    fn test_default_board_is_empty() {
        let board = Board::default();
        assert!(board.is_cleared());
        assert!(!board.is_empty(Position::new(0, 0)));
    }
}
