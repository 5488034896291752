//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the board engine and the game rules for a
//! connect-the-pair puzzle. It has **no dependencies** on terminal I/O or
//! persistence, making it:
//!
//! - **Deterministic**: Same seed produces identical boards and reshuffles
//! - **Testable**: Time only moves through [`GameState::tick`]
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`board`]: padded tile grid with a permanently empty border ring
//! - [`path`]: turn-limited, turn-minimal connection search
//! - [`solver`]: available-pair scan and deadlock detection
//! - [`shuffle`]: bounded reshuffle of the remaining symbols
//! - [`scoring`]: match points and time-windowed combos
//! - [`timers`]: named, cancelable delayed effects
//! - [`game_state`]: the selection/match state machine
//! - [`rng`]: seeded generator used for boards and reshuffles
//!
//! # Game Rules
//!
//! - **Pairs**: two tiles match when they carry the same symbol and an
//!   axis-aligned path through empty cells joins them with at most 3 turns
//! - **Border**: the ring around the content is always empty, so paths may
//!   run around the outside of the board
//! - **Always solvable**: after every removal a deadlocked board is reshuffled
//! - **Combo**: matches within 3 seconds of each other add 20 points per step
//! - **Budgets**: 10 hints and 3 manual shuffles per run
//!
//! # Example
//!
//! ```
//! use tui_onet_core::{find_available_pair, GameConfig, GameState};
//! use tui_onet_types::{GameAction, GameStatus};
//!
//! let mut game = GameState::new(GameConfig::default(), 12345);
//! game.start(0, 0).unwrap();
//! assert_eq!(game.status(), GameStatus::Playing);
//!
//! // Every fresh board has at least one legal move.
//! let (a, b) = find_available_pair(game.board(), 3).unwrap();
//! game.apply_action(GameAction::Tap(a));
//! game.apply_action(GameAction::Tap(b));
//! assert_eq!(game.score(), 10);
//!
//! // The pair leaves the board once the removal delay has elapsed.
//! game.tick(300);
//! assert_eq!(game.board().remaining_count(), 22);
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod game_state;
pub mod path;
pub mod rng;
pub mod scoring;
pub mod shuffle;
pub mod snapshot;
pub mod solver;
pub mod timers;

pub use tui_onet_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Tile};
pub use config::GameConfig;
pub use error::CoreError;
pub use game_state::{GameEvent, GameState, RunSummary};
pub use path::{can_connect, find_path, ConnectionPath};
pub use rng::SimpleRng;
pub use scoring::{calculate_match_score, ComboTracker, ScoreResult};
pub use shuffle::reshuffle;
pub use snapshot::GameSnapshot;
pub use solver::{find_available_pair, is_deadlocked};
pub use timers::{Scheduler, TaskKind};
