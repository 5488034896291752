//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into commands and keeps the board cursor that turns a "tap" key
//! into a [`crate::types::GameAction::Tap`] on a concrete cell.

pub mod handler;
pub mod map;

pub use tui_onet_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, handle_menu_key, should_quit, InputCommand, MenuCommand};
