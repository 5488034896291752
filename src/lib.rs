//! TUI Onet (workspace facade crate).
//!
//! Re-exports the workspace crates under one name, `tui_onet::{core, input,
//! stats, term, types}`, and hosts the runner configuration used by the
//! `tui-onet` binary.

pub mod config;

pub use tui_onet_core as core;
pub use tui_onet_input as input;
pub use tui_onet_stats as stats;
pub use tui_onet_term as term;
pub use tui_onet_types as types;

pub use config::AppConfig;
