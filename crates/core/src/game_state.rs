//! Game state - turn sequencing for one session
//!
//! spawn -> move/rotate/drop -> lock -> clear -> score -> spawn
//!
//! Player actions are applied before the fall timer within a step, and either
//! path can lock the active piece. Nothing here blocks or touches I/O; outcomes
//! are queued as [`GameEvent`]s.

use crate::board::Board;
use crate::events::GameEvent;
use crate::pieces::Tetromino;
use crate::rng::{PieceSource, UniformSource};
use crate::scoring::{fall_interval_ms, ScoringEngine};
use crate::snapshot::GameSnapshot;
use crate::srs;
use crate::types::{GameAction, Phase, PieceKind, RotationDirection};

/// Complete game state
#[derive(Debug)]
pub struct GameState {
    board: Board,
    active: Option<Tetromino>,
    next: PieceKind,
    source: Box<dyn PieceSource>,
    scoring: ScoringEngine,
    phase: Phase,
    fall_timer_ms: u32,
    fall_interval_ms: u32,
    /// Set by a rotation that passed the three-corner check; any later translation clears it
    t_spin_pending: bool,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Start a game on an empty board, drawing pieces from `source`
    pub fn new(source: impl PieceSource + 'static) -> Self {
        Self::from_parts(Board::new(), source)
    }

    /// Start a game with uniform-random pieces from the given seed
    pub fn with_seed(seed: u32) -> Self {
        Self::new(UniformSource::new(seed))
    }

    /// Start a game on a prepared board.
    ///
    /// Draws the active and queued pieces immediately; if the active piece does not
    /// fit at spawn the game begins in [`Phase::GameOver`].
    pub fn from_parts(board: Board, source: impl PieceSource + 'static) -> Self {
        let mut source: Box<dyn PieceSource> = Box::new(source);
        let next = source.next_kind();
        let mut state = Self {
            board,
            active: None,
            next,
            source,
            scoring: ScoringEngine::new(),
            phase: Phase::Active,
            fall_timer_ms: 0,
            fall_interval_ms: fall_interval_ms(1),
            t_spin_pending: false,
            events: Vec::new(),
        };
        state.spawn_next();
        state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn next(&self) -> PieceKind {
        self.next
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn scoring(&self) -> &ScoringEngine {
        &self.scoring
    }

    pub fn score(&self) -> u32 {
        self.scoring.score()
    }

    pub fn level(&self) -> u32 {
        self.scoring.level()
    }

    pub fn lines(&self) -> u32 {
        self.scoring.lines_cleared()
    }

    /// Current fall interval in milliseconds
    pub fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    /// Promote the queued piece to active and queue a fresh one.
    ///
    /// Returns false (and ends the game) if the new piece does not fit at spawn.
    pub fn spawn_next(&mut self) -> bool {
        let piece = Tetromino::new(self.next);
        self.next = self.source.next_kind();
        self.t_spin_pending = false;
        self.fall_timer_ms = 0;

        if !self.board.is_valid_position(&piece, 0, 0) {
            self.active = None;
            self.phase = Phase::GameOver;
            self.events.push(GameEvent::GameOver);
            return false;
        }

        self.active = Some(piece);
        true
    }

    /// Try to move the active piece
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if !self.shift(dx, dy) {
            return false;
        }
        self.events.push(GameEvent::Moved { dx, dy });
        true
    }

    /// Translate the active piece without reporting a player move
    fn shift(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        if !self.board.is_valid_position(&active, dx, dy) {
            return false;
        }

        self.active = Some(active.shifted(dx, dy));
        self.t_spin_pending = false;
        true
    }

    /// Try to rotate the active piece with SRS wall kicks
    ///
    /// On failure the piece keeps its rotation and position.
    pub fn try_rotate(&mut self, direction: RotationDirection) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        match srs::try_rotate(&active, direction, &self.board) {
            Some(rotated) => {
                let t_spin = srs::is_t_spin(&rotated.piece, &self.board);
                self.active = Some(rotated.piece);
                self.t_spin_pending = t_spin;
                self.events.push(GameEvent::RotateSucceeded {
                    rotation: rotated.piece.rotation,
                    kick: rotated.kick,
                    t_spin,
                });
                true
            }
            None => {
                self.events.push(GameEvent::RotateFailed);
                false
            }
        }
    }

    /// Move down one row, locking in place if the piece is resting
    pub fn soft_drop(&mut self) -> bool {
        if self.active.is_none() {
            return false;
        }
        if !self.try_move(0, 1) {
            self.lock_active(0);
        }
        true
    }

    /// Drop the active piece to its landing row and lock it.
    ///
    /// Returns the number of rows travelled, which is also the drop bonus.
    pub fn hard_drop(&mut self) -> u32 {
        let Some(active) = self.active else {
            return 0;
        };

        let mut drop_distance: i8 = 0;
        while self.board.is_valid_position(&active, 0, drop_distance + 1) {
            drop_distance += 1;
        }

        if drop_distance > 0 {
            self.active = Some(active.shifted(0, drop_distance));
            self.t_spin_pending = false;
        }

        self.lock_active(drop_distance as u32);
        drop_distance as u32
    }

    /// Lock the active piece, clear lines, score, and spawn the next piece
    fn lock_active(&mut self, drop_distance: u32) {
        let Some(active) = self.active.take() else {
            return;
        };
        let is_t_spin = std::mem::take(&mut self.t_spin_pending);

        self.board.lock_piece(&active);
        self.events.push(GameEvent::Locked {
            kind: active.kind,
            cells: active.occupied_cells(),
        });

        let rows = self.board.clear_full_rows();
        let lines = rows.len();
        if lines > 0 {
            self.events.push(GameEvent::LinesCleared {
                count: lines as u8,
                rows,
            });
        }

        let result = self.scoring.score_lock(lines, drop_distance, is_t_spin);
        if result.total > 0 {
            self.events.push(GameEvent::Scored {
                points: result.total,
                total: self.scoring.score(),
            });
        }
        if result.level_up {
            self.fall_interval_ms = fall_interval_ms(result.level);
            self.events.push(GameEvent::LevelUp(result.level));
        }

        self.spawn_next();
    }

    /// Row the active piece's origin would land on
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;

        let mut drop_distance: i8 = 0;
        while self.board.is_valid_position(&active, 0, drop_distance + 1) {
            drop_distance += 1;
        }

        Some(active.y + drop_distance)
    }

    /// Advance the fall timer; returns true if the piece fell or locked
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.phase != Phase::Active || self.active.is_none() {
            return false;
        }

        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
        if self.fall_timer_ms < self.fall_interval_ms {
            return false;
        }

        self.fall_timer_ms = 0;
        // Gravity is not a player move: no Moved event.
        if !self.shift(0, 1) {
            self.lock_active(0);
        }
        true
    }

    /// Apply a game action
    ///
    /// Returns false when the action had no effect (illegal move, wrong phase).
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                if self.phase != Phase::GameOver {
                    return false;
                }
                self.restart();
                true
            }
            _ if self.phase != Phase::Active => false,
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => {
                self.hard_drop();
                true
            }
            GameAction::RotateCw => self.try_rotate(RotationDirection::Clockwise),
            GameAction::RotateCcw => self.try_rotate(RotationDirection::CounterClockwise),
        }
    }

    /// One simulation step: every action in order, then the fall timer
    pub fn step(&mut self, actions: &[GameAction], elapsed_ms: u32) -> bool {
        let mut changed = false;
        for &action in actions {
            changed |= self.apply_action(action);
        }
        changed |= self.tick(elapsed_ms);
        changed
    }

    fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Active => {
                self.phase = Phase::Paused;
                self.events.push(GameEvent::Paused);
                true
            }
            Phase::Paused => {
                self.phase = Phase::Active;
                self.events.push(GameEvent::Resumed);
                true
            }
            Phase::GameOver => false,
        }
    }

    /// Fresh board and score, two new pieces from the same source
    pub fn restart(&mut self) {
        self.board.clear();
        self.scoring.reset();
        self.phase = Phase::Active;
        self.fall_interval_ms = fall_interval_ms(1);
        self.fall_timer_ms = 0;
        self.t_spin_pending = false;
        self.next = self.source.next_kind();
        self.events.push(GameEvent::Restarted);
        self.spawn_next();
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Write the current frame state into `out`
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board = self.board.grid_snapshot();
        out.active = self.active;
        out.ghost_y = self.ghost_y();
        out.next = self.next;
        out.phase = self.phase;
        out.score = self.scoring.score();
        out.level = self.scoring.level();
        out.lines = self.scoring.lines_cleared();
        out.combo = self.scoring.combo_count();
        out.back_to_back = self.scoring.back_to_back_tetris();
        out.fall_interval_ms = self.fall_interval_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::with_seed(1)
    }
}
