//! Soft-drop latch for terminal environments.
//!
//! The engine wants soft drop as a start/stop edge pair. Terminals that report
//! key releases give us the stop edge directly; the rest only send repeats while
//! a key is held, so the latch also ends after a quiet period without repeats.

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::{handle_key_event, is_soft_drop_key};
use crate::types::{GameAction, SOFT_DROP_RELEASE_TIMEOUT_MS};

/// Turns raw key events into engine actions.
#[derive(Debug, Clone)]
pub struct InputHandler {
    soft_drop_held: bool,
    since_soft_drop_key_ms: u32,
    key_release_timeout_ms: u32,
    /// Set once the terminal sends a release; the timeout is not needed after that.
    release_events_seen: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            soft_drop_held: false,
            since_soft_drop_key_ms: 0,
            key_release_timeout_ms: SOFT_DROP_RELEASE_TIMEOUT_MS,
            release_events_seen: false,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn soft_drop_held(&self) -> bool {
        self.soft_drop_held
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<GameAction> {
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.handle_key_press(key),
            KeyEventKind::Release => self.handle_key_release(key),
        }
    }

    fn handle_key_press(&mut self, key: KeyEvent) -> Option<GameAction> {
        if is_soft_drop_key(key.code) {
            self.since_soft_drop_key_ms = 0;
            if self.soft_drop_held {
                return None;
            }
            self.soft_drop_held = true;
            return Some(GameAction::SoftDropStart);
        }
        handle_key_event(key)
    }

    fn handle_key_release(&mut self, key: KeyEvent) -> Option<GameAction> {
        self.release_events_seen = true;
        if is_soft_drop_key(key.code) && self.soft_drop_held {
            self.soft_drop_held = false;
            return Some(GameAction::SoftDropEnd);
        }
        None
    }

    /// Advance the latch clock. Returns `SoftDropEnd` when the latch times out.
    pub fn update(&mut self, elapsed_ms: u32) -> Option<GameAction> {
        if !self.soft_drop_held || self.release_events_seen {
            return None;
        }
        self.since_soft_drop_key_ms = self.since_soft_drop_key_ms.saturating_add(elapsed_ms);
        if self.since_soft_drop_key_ms > self.key_release_timeout_ms {
            self.soft_drop_held = false;
            self.since_soft_drop_key_ms = 0;
            return Some(GameAction::SoftDropEnd);
        }
        None
    }

    pub fn reset(&mut self) {
        self.soft_drop_held = false;
        self.since_soft_drop_key_ms = 0;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
