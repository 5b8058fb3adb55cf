//! Terminal input - key mapping and auto-repeat.
//!
//! Nothing here knows about the game rules. [`map`] turns `crossterm` key events
//! into [`GameAction`](crate::types::GameAction)s; [`handler`] adds DAS/ARR
//! auto-repeat for held movement keys, with a release timeout for terminals
//! that never report key releases.

pub mod handler;
pub mod map;

pub use tui_blockfall_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, repeat_key, should_quit, RepeatKey};
