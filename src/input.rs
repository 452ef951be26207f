//! Keyboard state to per-tick intents.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One thing the player can ask an entity to do during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    MoveForward,
    MoveBackward,
    RotateLeft,
    RotateRight,
}

/// The intents active for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intents {
    pub move_forward: bool,
    pub move_backward: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
}

impl Intents {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with(mut self, intent: Intent) -> Self {
        self.set(intent, true);
        self
    }

    pub fn set(&mut self, intent: Intent, active: bool) {
        match intent {
            Intent::MoveForward => self.move_forward = active,
            Intent::MoveBackward => self.move_backward = active,
            Intent::RotateLeft => self.rotate_left = active,
            Intent::RotateRight => self.rotate_right = active,
        }
    }

    pub fn contains(&self, intent: Intent) -> bool {
        match intent {
            Intent::MoveForward => self.move_forward,
            Intent::MoveBackward => self.move_backward,
            Intent::RotateLeft => self.rotate_left,
            Intent::RotateRight => self.rotate_right,
        }
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::none()
    }

    /// True if the entity changes position this tick.
    pub fn moves(&self) -> bool {
        self.move_forward || self.move_backward
    }
}

/// Which key triggers which intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub move_forward: char,
    pub move_backward: char,
    pub rotate_left: char,
    pub rotate_right: char,
}

impl Default for KeyBindings {
    /// The `esdf` cluster.
    fn default() -> Self {
        Self {
            move_forward: 'e',
            move_backward: 'd',
            rotate_left: 'f',
            rotate_right: 's',
        }
    }
}

impl KeyBindings {
    pub fn intent_for(&self, key: char) -> Option<Intent> {
        match key {
            k if k == self.move_forward => Some(Intent::MoveForward),
            k if k == self.move_backward => Some(Intent::MoveBackward),
            k if k == self.rotate_left => Some(Intent::RotateLeft),
            k if k == self.rotate_right => Some(Intent::RotateRight),
            _ => None,
        }
    }
}

/// Keys currently held down, fed by press/release events.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: HashSet<char>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: char) {
        self.pressed.insert(key);
    }

    pub fn release(&mut self, key: char) {
        self.pressed.remove(&key);
    }

    pub fn is_pressed(&self, key: char) -> bool {
        self.pressed.contains(&key)
    }

    /// Intents for the held keys under `bindings`.
    pub fn intents(&self, bindings: &KeyBindings) -> Intents {
        self.pressed
            .iter()
            .filter_map(|&key| bindings.intent_for(key))
            .fold(Intents::none(), Intents::with)
    }
}
