//! Construction-time failures.
//!
//! Illegal moves are not errors: they surface as a wrong-pair signal on the
//! game state. Everything here indicates malformed level/theme input or a
//! misconfigured engine, and is reported before (or instead of) mutating state.

use thiserror::Error;

/// Errors emitted by the board engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// `rows * cols` is odd, so the content cannot be filled with pairs.
    #[error("level has an odd number of content cells ({rows}x{cols})")]
    OddTileCount { rows: u8, cols: u8 },
    /// The level has no content cells at all.
    #[error("level has no content cells")]
    EmptyBoard,
    /// The theme cannot supply any symbol.
    #[error("theme `{theme}` has an empty symbol pool")]
    EmptySymbolPool { theme: String },
    /// A text layout had ragged rows or no rows.
    #[error("malformed board layout at row {row}")]
    MalformedLayout { row: usize },
    /// A built-in level index was out of range.
    #[error("unknown level index {0}")]
    UnknownLevel(usize),
    /// A built-in theme index was out of range.
    #[error("unknown theme index {0}")]
    UnknownTheme(usize),
    /// No permutation of the remaining symbols produced a solvable board.
    #[error("board still deadlocked after {attempts} reshuffles")]
    ReshuffleExhausted { attempts: u32 },
}
