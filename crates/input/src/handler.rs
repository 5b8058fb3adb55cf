//! DAS/ARR auto-repeat for held movement keys.
//!
//! A press emits its action once. While the key stays held, nothing more happens
//! until the delayed auto shift (DAS) elapses; after that the action repeats every
//! auto repeat rate (ARR) interval. Soft drop uses its own zero-delay timing.
//!
//! Terminals that never report key releases are handled with a timeout: a held
//! key with no press event for `key_release_timeout_ms` is treated as released.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::map::{repeat_key, RepeatKey};
use crate::types::{GameAction, DEFAULT_ARR_MS, DEFAULT_DAS_MS, SOFT_DROP_ARR_MS, SOFT_DROP_DAS_MS};

/// Repeated actions produced by one update
pub type RepeatedActions = ArrayVec<GameAction, 32>;

const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Delay/rate pair for one repeat channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Repeat {
    das_ms: u32,
    arr_ms: u32,
    das_timer: u32,
    arr_accumulator: u32,
}

impl Repeat {
    fn new(das_ms: u32, arr_ms: u32) -> Self {
        Self {
            das_ms,
            arr_ms: arr_ms.max(1),
            das_timer: 0,
            arr_accumulator: 0,
        }
    }

    fn restart(&mut self) {
        self.das_timer = 0;
        self.arr_accumulator = 0;
    }

    /// Advance by `elapsed_ms` and push one `action` per completed ARR interval
    fn advance(&mut self, elapsed_ms: u32, action: GameAction, out: &mut RepeatedActions) {
        let prev = self.das_timer;
        self.das_timer = self.das_timer.saturating_add(elapsed_ms);
        if self.das_timer < self.das_ms {
            return;
        }

        // Only time past the DAS threshold feeds the repeat rate.
        self.arr_accumulator += if prev < self.das_ms {
            self.das_timer - self.das_ms
        } else {
            elapsed_ms
        };

        while self.arr_accumulator >= self.arr_ms {
            let _ = out.try_push(action);
            self.arr_accumulator -= self.arr_ms;
        }
    }
}

/// Tracks held keys and produces auto-repeat actions
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Left or Right, whichever was pressed last
    horizontal: Option<RepeatKey>,
    down_held: bool,
    last_key_time: Instant,
    horizontal_repeat: Repeat,
    down_repeat: Repeat,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    /// Custom horizontal timing; soft drop keeps its own
    pub fn with_config(das_ms: u32, arr_ms: u32) -> Self {
        Self {
            horizontal: None,
            down_held: false,
            last_key_time: Instant::now(),
            horizontal_repeat: Repeat::new(das_ms, arr_ms),
            down_repeat: Repeat::new(SOFT_DROP_DAS_MS, SOFT_DROP_ARR_MS),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn das_ms(&self) -> u32 {
        self.horizontal_repeat.das_ms
    }

    pub fn arr_ms(&self) -> u32 {
        self.horizontal_repeat.arr_ms
    }

    /// Register a key press.
    ///
    /// Returns the action for a fresh press of a movement key; a press of a key
    /// that is already held (terminal auto-repeat) only refreshes the release timer.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        let key = repeat_key(code)?;
        self.last_key_time = Instant::now();

        match key {
            RepeatKey::Left | RepeatKey::Right => {
                if self.horizontal == Some(key) {
                    return None;
                }
                self.horizontal = Some(key);
                self.horizontal_repeat.restart();
            }
            RepeatKey::Down => {
                if self.down_held {
                    return None;
                }
                self.down_held = true;
                self.down_repeat.restart();
            }
        }

        Some(key.action())
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        match repeat_key(code) {
            Some(RepeatKey::Down) => self.release_down(),
            Some(key) if self.horizontal == Some(key) => self.release_horizontal(),
            _ => {}
        }
    }

    fn release_horizontal(&mut self) {
        self.horizontal = None;
        self.horizontal_repeat.restart();
    }

    fn release_down(&mut self) {
        self.down_held = false;
        self.down_repeat.restart();
    }

    /// Advance repeat timers and collect the actions that fired
    pub fn update(&mut self, elapsed_ms: u32) -> RepeatedActions {
        let mut actions = RepeatedActions::new();

        let idle = self.last_key_time.elapsed();
        if idle > Duration::from_millis(self.key_release_timeout_ms as u64) {
            if self.horizontal.is_some() {
                self.release_horizontal();
            }
            if self.down_held {
                self.release_down();
            }
        }

        if let Some(key) = self.horizontal {
            self.horizontal_repeat.advance(elapsed_ms, key.action(), &mut actions);
        }
        if self.down_held {
            self.down_repeat
                .advance(elapsed_ms, GameAction::SoftDrop, &mut actions);
        }

        actions
    }

    pub fn reset(&mut self) {
        self.release_horizontal();
        self.release_down();
        self.last_key_time = Instant::now();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
