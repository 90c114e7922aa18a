//! Player input
//!
//! Hosts feed discrete key and touch events; the simulation only ever sees
//! the resulting left/right "pressed" flags.

use serde::{Deserialize, Serialize};

/// Steering keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
}

impl Key {
    /// Map a DOM-style key name (`KeyboardEvent.key`) to a steering key
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" | "Left" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "Right" | "d" | "D" => Some(Key::Right),
            _ => None,
        }
    }
}

/// A raw input event from the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Touch began at screen x; left half steers left, right half steers right
    TouchStart { x: f32 },
    TouchEnd,
}

/// Held-direction flags consumed once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
}

impl InputState {
    /// Fold an event into the flags
    pub fn apply(&mut self, event: InputEvent, viewport_width: f32) {
        match event {
            InputEvent::KeyDown(Key::Left) => self.left = true,
            InputEvent::KeyDown(Key::Right) => self.right = true,
            InputEvent::KeyUp(Key::Left) => self.left = false,
            InputEvent::KeyUp(Key::Right) => self.right = false,
            InputEvent::TouchStart { x } => {
                let left_half = x < viewport_width / 2.0;
                self.left = left_half;
                self.right = !left_half;
            }
            InputEvent::TouchEnd => self.release(),
        }
    }

    /// Release both directions
    pub fn release(&mut self) {
        self.left = false;
        self.right = false;
    }
}
