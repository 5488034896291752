//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It avoids widget
//! toolkits and renders into a plain framebuffer that is diffed and flushed to
//! the terminal.
//!
//! Goals:
//! - Keep `core` deterministic and free of I/O
//! - Keep views pure so they can be unit-tested
//! - Allow precise control over cell aspect ratio (3 columns per board cell)

pub mod fb;
pub mod game_view;
pub mod menu_view;
pub mod renderer;

pub use tui_onet_core as core;
pub use tui_onet_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{format_time, AnchorY, GameView, ResultView, Viewport};
pub use menu_view::{MenuState, MenuView};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
