//! Terminal runner (default binary).
//!
//! Reads keys with crossterm, steps the game once per frame with the wall-clock
//! time since the previous frame, and redraws through the framebuffer renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use arrayvec::ArrayVec;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use tui_blockfall::core::{GameSnapshot, GameState};
use tui_blockfall::input::{handle_key_event, repeat_key, should_quit, InputHandler};
use tui_blockfall::term::{GameView, TerminalRenderer, Viewport};
use tui_blockfall::types::{GameAction, TICK_MS};
use tui_blockfall::{EventLog, GameConfig};

/// Actions gathered between two steps. When it fills up, the queued actions are
/// applied at once without advancing the fall timer.
type PendingActions = ArrayVec<GameAction, 64>;

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    let event_log = config.event_log.as_ref().map(EventLog::open).transpose()?;

    let mut term = TerminalRenderer::new(GameView::default().with_ghost(config.show_ghost));
    term.enter()?;

    let mut session = Session::new(&config, event_log);
    let result = session.run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();

    if let Some(err) = session.log_error.take() {
        eprintln!("event log disabled: {:#}", err);
    }
    result
}

struct Session {
    game: GameState,
    input: InputHandler,
    event_log: Option<EventLog>,
    log_error: Option<anyhow::Error>,
    pending: PendingActions,
    clock_ms: u64,
}

impl Session {
    fn new(config: &GameConfig, event_log: Option<EventLog>) -> Self {
        Self {
            game: GameState::new(config.piece_source()),
            input: InputHandler::with_config(config.das_ms, config.arr_ms),
            event_log,
            log_error: None,
            pending: PendingActions::new(),
            clock_ms: 0,
        }
    }

    fn run(&mut self, term: &mut TerminalRenderer) -> Result<()> {
        let frame = Duration::from_millis(TICK_MS as u64);
        let mut snap = GameSnapshot::default();
        let mut last_step = Instant::now();

        loop {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            self.game.snapshot_into(&mut snap);
            term.present(&snap, Viewport::new(w, h))?;

            let timeout = frame.saturating_sub(last_step.elapsed());
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                    }
                    Event::Resize(_, _) => term.invalidate(),
                    _ => {}
                }
            }

            let elapsed = last_step.elapsed();
            if elapsed >= frame {
                last_step = Instant::now();
                self.step(elapsed.as_millis().min(u32::MAX as u128) as u32);
            }
        }
    }

    /// Queue the action for a key; returns true when the player quits
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.kind {
            KeyEventKind::Press => {
                if should_quit(key) {
                    return true;
                }
                let action = if repeat_key(key.code).is_some() {
                    self.input.handle_key_press(key.code)
                } else {
                    handle_key_event(key)
                };
                if let Some(action) = action {
                    self.queue(action);
                }
            }
            // DAS/ARR produces repeats itself
            KeyEventKind::Repeat => {}
            KeyEventKind::Release => self.input.handle_key_release(key.code),
        }
        false
    }

    fn queue(&mut self, action: GameAction) {
        if self.pending.is_full() {
            self.game.step(&self.pending, 0);
            self.pending.clear();
        }
        self.pending.push(action);
    }

    fn step(&mut self, elapsed_ms: u32) {
        for action in self.input.update(elapsed_ms) {
            self.queue(action);
        }

        self.game.step(&self.pending, elapsed_ms);
        self.pending.clear();
        self.clock_ms += elapsed_ms as u64;

        if self.game.game_over() {
            self.input.reset();
        }

        let events = self.game.drain_events();
        match self.event_log.as_mut() {
            Some(log) => {
                let events: Vec<_> = events.collect();
                if let Err(err) = log.record_all(self.clock_ms, &events) {
                    self.log_error = Some(err);
                    self.event_log = None;
                }
            }
            None => drop(events),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        let config = GameConfig::from_lookup(|name| match name {
            "BLOCKFALL_PIECES" => Some("O".to_string()),
            _ => None,
        });
        Session::new(&config, None)
    }

    #[test]
    fn overflowing_pending_actions_are_applied_not_dropped() {
        let mut session = session();
        // An odd number of toggles past the buffer size must end paused.
        for _ in 0..=session.pending.capacity() {
            session.queue(GameAction::Pause);
        }
        assert_eq!(session.pending.len(), 1);

        session.step(0);
        assert!(session.game.paused());
        assert!(session.pending.is_empty());
    }
}
