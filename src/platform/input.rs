//! Input capture
//!
//! DOM event handlers write into `InputState`; once per frame the game loop
//! takes a `TickInput` snapshot. Held keys persist across snapshots, discrete
//! events are drained.

use std::collections::HashMap;

use glam::Vec2;

use crate::settings::KeyBindings;
use crate::sim::{InputEvent, KeyPress, TickInput};

#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// DOM key identifier -> currently held
    keys: HashMap<String, bool>,
    /// Discrete events since the last snapshot
    pending: Vec<InputEvent>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A `keydown` event. Auto-repeats queue another press but the held
    /// state is unchanged.
    pub fn key_down(&mut self, key: &str, repeat: bool) {
        if !repeat {
            self.keys.insert(key.to_string(), true);
        }
        self.pending.push(InputEvent::Key(KeyPress::from_dom_key(key)));
    }

    /// Queue a pause that only takes effect while playing
    pub fn request_pause(&mut self) {
        self.pending.push(InputEvent::Pause);
    }

    pub fn key_up(&mut self, key: &str) {
        self.keys.insert(key.to_string(), false);
    }

    /// A click, already in logical canvas coordinates
    pub fn click(&mut self, point: Vec2) {
        self.pending.push(InputEvent::Click(point));
    }

    /// Focus lost: key-up events will never arrive, so release everything
    pub fn blur(&mut self) {
        for held in self.keys.values_mut() {
            *held = false;
        }
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }

    /// Resolve held keys and drain queued events for one tick
    pub fn snapshot(&mut self, bindings: &KeyBindings) -> TickInput {
        TickInput {
            controls: bindings.resolve(&self.keys),
            events: std::mem::take(&mut self.pending),
        }
    }
}
