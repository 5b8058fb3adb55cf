use crate::board::Grid;
use crate::pieces::Tetromino;
use crate::types::{Phase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Everything the drawing layer needs for one frame, copied out of the game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: Grid,
    /// Falling piece; `None` once the game is over
    pub active: Option<Tetromino>,
    /// Row the active piece's origin would land on
    pub ghost_y: Option<i8>,
    pub next: PieceKind,
    pub phase: Phase,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub combo: u32,
    pub back_to_back: bool,
    pub fall_interval_ms: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.phase == Phase::Active
    }

    /// The active piece moved down to its ghost row
    pub fn ghost(&self) -> Option<Tetromino> {
        let active = self.active?;
        let ghost_y = self.ghost_y?;
        Some(Tetromino { y: ghost_y, ..active })
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            next: PieceKind::I,
            phase: Phase::Active,
            score: 0,
            level: 1,
            lines: 0,
            combo: 0,
            back_to_back: false,
            fall_interval_ms: 0,
        }
    }
}
