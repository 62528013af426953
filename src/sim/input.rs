//! Per-tick input consumed by the simulation
//!
//! Held controls are level-triggered; everything else arrives as an ordered
//! list of discrete events captured since the previous tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Held-state of the gameplay controls, resolved from key bindings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl Controls {
    /// Horizontal axis: -1, 0 or +1
    pub fn axis(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// A discrete key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    /// A printable character (already the produced glyph, not the key code)
    Char(char),
    Enter,
    Backspace,
    Escape,
    Other,
}

impl KeyPress {
    /// Translate a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Enter" => KeyPress::Enter,
            "Backspace" => KeyPress::Backspace,
            "Escape" | "Esc" => KeyPress::Escape,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyPress::Char(c),
                    _ => KeyPress::Other,
                }
            }
        }
    }
}

/// Discrete input, in arrival order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key(KeyPress),
    /// Click in logical canvas coordinates
    Click(Vec2),
    /// Pause request with no key behind it (focus lost, tab hidden).
    /// Unlike Escape it never resumes.
    Pause,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub controls: Controls,
    pub events: Vec<InputEvent>,
}

impl TickInput {
    pub fn with_controls(controls: Controls) -> Self {
        Self {
            controls,
            events: Vec::new(),
        }
    }

    pub fn key(key: KeyPress) -> Self {
        Self {
            controls: Controls::default(),
            events: vec![InputEvent::Key(key)],
        }
    }

    pub fn click(x: f32, y: f32) -> Self {
        Self {
            controls: Controls::default(),
            events: vec![InputEvent::Click(Vec2::new(x, y))],
        }
    }
}

/// Rising-edge detector for a held control
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EdgeTrigger {
    was_held: bool,
}

impl EdgeTrigger {
    /// Feed this tick's held state; true only on the released -> held edge
    pub fn rising(&mut self, held: bool) -> bool {
        let fired = held && !self.was_held;
        self.was_held = held;
        fired
    }
}
