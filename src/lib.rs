//! TUI Blockfall (workspace facade crate).
//!
//! The game itself lives in the member crates under `crates/`; this package
//! re-exports them as `tui_blockfall::{core, input, term, types}` and adds the
//! runner's configuration and event log.

pub mod config;
pub mod event_log;

pub use tui_blockfall_core as core;
pub use tui_blockfall_input as input;
pub use tui_blockfall_term as term;
pub use tui_blockfall_types as types;

pub use config::{GameConfig, Randomizer};
pub use event_log::EventLog;
