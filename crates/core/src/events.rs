//! Game events - what happened during a step, for sound/animation collaborators
//!
//! The core never calls into audio or rendering. It queues these values while
//! applying actions and ticking; the outer loop drains them once per frame with
//! [`GameState::drain_events`](crate::game_state::GameState::drain_events).

use crate::board::ClearedRows;
use crate::types::{PieceKind, Rotation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The active piece moved one cell (player move or soft drop, never gravity)
    Moved { dx: i8, dy: i8 },
    /// A rotation was accepted, possibly after a kick
    RotateSucceeded {
        rotation: Rotation,
        kick: (i8, i8),
        t_spin: bool,
    },
    /// No kick candidate fit; the piece is unchanged
    RotateFailed,
    /// A piece was written into the board
    Locked { kind: PieceKind, cells: [(i8, i8); 4] },
    /// Full rows were removed (pre-clear indices, bottom to top)
    LinesCleared { count: u8, rows: ClearedRows },
    /// Points awarded for the last lock
    Scored { points: u32, total: u32 },
    LevelUp(u32),
    GameOver,
    Paused,
    Resumed,
    Restarted,
}
