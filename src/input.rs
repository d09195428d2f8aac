//! Keyboard state
//!
//! Key events arrive whenever the platform delivers them and only flip flags.
//! The simulation reads the flags once per tick through [`InputState::sample`].

use crate::sim::TickInput;

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    W,
    S,
}

impl Key {
    /// Map a platform key name ("ArrowUp", "w", ...) to a game key
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowDown" => Some(Key::ArrowDown),
            "w" | "W" => Some(Key::W),
            "s" | "S" => Some(Key::S),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            Key::ArrowUp => 0,
            Key::ArrowDown => 1,
            Key::W => 2,
            Key::S => 3,
        }
    }
}

/// Pressed-state map for the game keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pressed: [bool; 4],
}

impl InputState {
    pub fn key_down(&mut self, key: Key) {
        self.pressed[key.index()] = true;
    }

    pub fn key_up(&mut self, key: Key) {
        self.pressed[key.index()] = false;
    }

    /// Handle a named key event. Unknown keys are ignored.
    pub fn handle_named(&mut self, name: &str, pressed: bool) {
        if let Some(key) = Key::from_name(name) {
            if pressed {
                self.key_down(key);
            } else {
                self.key_up(key);
            }
        }
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed[key.index()]
    }

    /// Release everything (focus loss, run reset)
    pub fn clear(&mut self) {
        self.pressed = [false; 4];
    }

    /// Snapshot the current key state as tick input
    pub fn sample(&self) -> TickInput {
        TickInput {
            up: self.is_pressed(Key::ArrowUp) || self.is_pressed(Key::W),
            down: self.is_pressed(Key::ArrowDown) || self.is_pressed(Key::S),
        }
    }
}
