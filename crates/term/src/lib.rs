//! Terminal front end for the game.
//!
//! [`GameView`] draws a game snapshot into a [`FrameBuffer`]; [`TerminalRenderer`]
//! presents it through `crossterm`, rewriting only the cells that changed between
//! frames. Board cells are two columns wide to make them roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_blockfall_core as core;
pub use tui_blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
