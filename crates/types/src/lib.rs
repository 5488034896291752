//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no game logic, making them usable in any
//! context (core engine, terminal rendering, stats bookkeeping).
//!
//! # Board Coordinates
//!
//! Positions are expressed in *padded* board coordinates: a level with
//! `rows x cols` content cells is stored in a `(rows + 2) x (cols + 2)` grid
//! whose outer ring is permanently empty. `(0, 0)` is the top-left border
//! cell, `(1, 1)` the top-left content cell.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Terminal loop timestep (~60 FPS) |
//! | `CLOCK_STEP_MS` | 1000 | One countdown second |
//! | `COMBO_WINDOW_MS` | 3000 | Max gap between matches that keeps a combo |
//! | `REMOVAL_DELAY_MS` | 300 | Path is shown this long before tiles vanish |
//! | `WRONG_PAIR_DELAY_MS` | 500 | Wrong-pair flash duration |
//! | `HINT_DURATION_MS` | 3000 | Hint highlight duration |
//!
//! # Examples
//!
//! ```
//! use tui_onet_types::{Direction, Position, LEVELS, THEMES};
//!
//! let p = Position::new(2, 3);
//! assert_eq!(p.step(Direction::Right), Position::new(3, 3));
//! assert_eq!(Direction::Up.opposite(), Direction::Down);
//!
//! // Every built-in level has an even number of content cells.
//! assert!(LEVELS.iter().all(|l| (l.rows as u32 * l.cols as u32) % 2 == 0));
//! assert!(!THEMES[0].items.is_empty());
//! ```

use serde::{Deserialize, Serialize};

/// Terminal loop timestep in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Length of one countdown step (one second of play time)
pub const CLOCK_STEP_MS: u32 = 1000;

/// Maximum number of direction changes a connecting path may use.
pub const MAX_TURNS: u8 = 3;

/// Upper bound accepted for a configured turn limit.
///
/// Connection paths are stored inline; a path with `n` turns has `n + 2` points.
pub const MAX_TURNS_LIMIT: u8 = 3;

/// Capacity of a corner-compressed connection path.
pub const MAX_PATH_POINTS: usize = MAX_TURNS_LIMIT as usize + 2;

/// Max elapsed time between two matches for the combo to continue.
pub const COMBO_WINDOW_MS: u32 = 3000;

/// Points for every confirmed match.
pub const BASE_MATCH_POINTS: u32 = 10;

/// Bonus per combo step beyond the first: `COMBO_BONUS_STEP * (combo - 1)`.
pub const COMBO_BONUS_STEP: u32 = 20;

/// Delay between a confirmed match and the tiles leaving the board.
pub const REMOVAL_DELAY_MS: u32 = 300;

/// Duration of the wrong-pair indicator.
pub const WRONG_PAIR_DELAY_MS: u32 = 500;

/// Duration of a hint highlight.
pub const HINT_DURATION_MS: u32 = 3000;

/// Hints available at the start of every run.
pub const INITIAL_HINTS: u32 = 10;

/// Manual shuffles available at the start of every run.
pub const INITIAL_SHUFFLES: u32 = 3;

/// Upper bound on consecutive permutations tried by one reshuffle.
pub const MAX_RESHUFFLE_ATTEMPTS: u32 = 1000;

/// Final score bonus per unused hint or shuffle.
pub const PROPS_BONUS_POINTS: u32 = 50;

/// Final score bonus per remaining second.
pub const TIME_BONUS_POINTS: u32 = 10;

/// Final score bonus per level number (1-based).
pub const LEVEL_BONUS_POINTS: u32 = 100;

/// Index into a theme's symbol pool.
pub type Symbol = u16;

/// A cell coordinate on the padded board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

impl Position {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// The neighbouring position one step in `dir`.
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Axis-aligned movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions in search order.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
    ];

    /// `(dx, dy)` for one step. `y` grows downwards.
    pub fn delta(self) -> (i16, i16) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Dense index, usable for per-direction tables.
    pub fn index(self) -> usize {
        match self {
            Direction::Right => 0,
            Direction::Left => 1,
            Direction::Down => 2,
            Direction::Up => 3,
        }
    }
}

/// Lifecycle of one run.
///
/// `Idle` is the menu state. `Playing` and `Paused` toggle on user request.
/// `Won` and `Lost` are terminal until the next start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Idle,
    Playing,
    Paused,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameStatus::Idle => "idle",
            GameStatus::Playing => "playing",
            GameStatus::Paused => "paused",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        }
    }
}

/// Game actions that can be applied to modify game state
///
/// These are produced by the presentation layer (key mapping) and consumed by
/// the core state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Begin a new run on the given built-in level and theme
    Start { level_index: usize, theme_index: usize },
    /// Tap (select / deselect / match) a board cell
    Tap(Position),
    /// Spend one hint to highlight a connectable pair
    Hint,
    /// Spend one shuffle to redistribute the remaining symbols
    Shuffle,
    /// Toggle between playing and paused
    TogglePause,
    /// Restart the current level with a fresh board
    Restart,
    /// Start the level after the current one
    NextLevel,
    /// Abandon the run and go back to the menu
    Menu,
}

impl GameAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Start { .. } => "start",
            GameAction::Tap(_) => "tap",
            GameAction::Hint => "hint",
            GameAction::Shuffle => "shuffle",
            GameAction::TogglePause => "togglePause",
            GameAction::Restart => "restart",
            GameAction::NextLevel => "nextLevel",
            GameAction::Menu => "menu",
        }
    }
}

/// Level definition supplied to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Level {
    pub id: &'static str,
    pub name: &'static str,
    /// Content rows (border excluded)
    pub rows: u8,
    /// Content columns (border excluded)
    pub cols: u8,
    /// Countdown budget in seconds
    pub time_secs: u32,
    /// Number of distinct symbols the level is designed around
    pub unique_tiles: u8,
}

impl Level {
    pub fn tile_count(&self) -> u32 {
        self.rows as u32 * self.cols as u32
    }
}

/// Ordered symbol pool used to fill tile pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    pub items: &'static [&'static str],
}

impl Theme {
    /// Display string for a symbol, `"?"` when out of range.
    pub fn glyph(&self, symbol: Symbol) -> &'static str {
        self.items.get(symbol as usize).copied().unwrap_or("?")
    }
}

/// Built-in level table.
pub const LEVELS: [Level; 4] = [
    Level {
        id: "l1",
        name: "Beginner",
        rows: 6,
        cols: 4,
        time_secs: 120,
        unique_tiles: 8,
    },
    Level {
        id: "l2",
        name: "Advanced",
        rows: 8,
        cols: 6,
        time_secs: 180,
        unique_tiles: 12,
    },
    Level {
        id: "l3",
        name: "Master",
        rows: 10,
        cols: 6,
        time_secs: 240,
        unique_tiles: 16,
    },
    Level {
        id: "l4",
        name: "Zen",
        rows: 12,
        cols: 8,
        time_secs: 300,
        unique_tiles: 24,
    },
];

/// Built-in themes.
///
/// Glyphs are printable ASCII: one column wide in every terminal and locale,
/// so board cells line up.
pub const THEMES: [Theme; 3] = [
    Theme {
        id: "symbols",
        name: "Symbols",
        items: &[
            "#", "$", "%", "&", "@", "*", "=", "~", "^", "?", "!", "<", ">", "{", "}", "0",
            "1", "2", "3", "4", "5", "6", "7", "8",
        ],
    },
    Theme {
        id: "lower",
        name: "Lowercase",
        items: &[
            "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p",
            "q", "r", "s", "t", "u", "v", "w", "x",
        ],
    },
    Theme {
        id: "letters",
        name: "Letters",
        items: &[
            "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P",
            "Q", "R", "S", "T", "U", "V", "W", "X",
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(COMBO_WINDOW_MS, 3000);
        assert_eq!(REMOVAL_DELAY_MS, 300);
        assert_eq!(WRONG_PAIR_DELAY_MS, 500);
        assert_eq!(HINT_DURATION_MS, 3000);
        assert!(REMOVAL_DELAY_MS != WRONG_PAIR_DELAY_MS);
    }

    #[test]
    fn path_capacity_covers_turn_limit() {
        assert!(MAX_TURNS <= MAX_TURNS_LIMIT);
        assert_eq!(MAX_PATH_POINTS, 5);
    }

    #[test]
    fn direction_opposites_round_trip() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            let (dx, dy) = dir.delta();
            let (ox, oy) = dir.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn direction_indices_are_dense() {
        let mut seen = [false; 4];
        for dir in Direction::ALL {
            seen[dir.index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn level_table_is_well_formed() {
        for level in LEVELS {
            assert_eq!(level.tile_count() % 2, 0, "level {}", level.id);
            assert!(level.time_secs > 0);
        }
    }

    #[test]
    fn theme_glyphs_are_single_column() {
        for theme in THEMES {
            assert_eq!(theme.items.len(), 24, "theme {}", theme.id);
            for glyph in theme.items {
                let mut chars = glyph.chars();
                let ch = chars.next().unwrap();
                assert!(chars.next().is_none(), "{glyph:?} in {}", theme.id);
                assert!(ch.is_ascii_graphic(), "{glyph:?} in {}", theme.id);
            }
        }
    }

    #[test]
    fn theme_glyph_out_of_range() {
        assert_eq!(THEMES[2].glyph(0), "A");
        assert_eq!(THEMES[2].glyph(999), "?");
    }

    #[test]
    fn terminal_statuses() {
        assert!(GameStatus::Won.is_terminal());
        assert!(GameStatus::Lost.is_terminal());
        assert!(!GameStatus::Paused.is_terminal());
        assert_eq!(GameStatus::default(), GameStatus::Idle);
    }
}
