//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the falling-block game and nothing else. It has
//! **no dependencies** on terminals, files, or clocks:
//!
//! - **Deterministic**: a seeded [`PieceSource`] fully determines a game
//! - **Testable**: every rule is reachable through plain method calls
//! - **Portable**: the terminal front end is just one consumer
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision checks and line clearing
//! - [`pieces`]: shape matrices, rotation, and the falling piece
//! - [`srs`]: SRS wall-kick tables and three-corner T-spin detection
//! - [`scoring`]: points, combos, back-to-back tetrises, level and fall speed
//! - [`rng`]: pluggable piece sources (uniform, 7-bag, fixed sequence)
//! - [`game_state`]: the loop controller tying it all together
//! - [`events`]: outcomes for sound and animation collaborators
//! - [`snapshot`]: copy-out view for rendering
//!
//! # Example
//!
//! ```
//! use tui_blockfall_core::{GameState, SequenceSource};
//! use tui_blockfall_types::{GameAction, PieceKind};
//!
//! let mut game = GameState::new(SequenceSource::repeat(PieceKind::O));
//!
//! game.apply_action(GameAction::MoveLeft);
//! game.apply_action(GameAction::HardDrop);
//!
//! // Hard drop awards one point per row
//! assert_eq!(game.score(), 18);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::step`](game_state::GameState::step) once per frame with the
//! actions read since the last frame and the wall-clock milliseconds elapsed.
//! Gravity moves the piece down one row every `max(50, 500 - (level - 1) * 50)` ms.

pub mod board;
pub mod events;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod srs;

pub use tui_blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows, Grid};
pub use events::GameEvent;
pub use game_state::GameState;
pub use pieces::{get_shape, ShapeMatrix, Tetromino};
pub use rng::{BagSource, PieceSource, SequenceSource, SimpleRng, UniformSource};
pub use scoring::{fall_interval_ms, ScoreResult, ScoringEngine};
pub use snapshot::GameSnapshot;
pub use srs::{is_t_spin, try_rotate, Rotated};
