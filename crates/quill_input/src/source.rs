use std::collections::HashSet;

use quill_render::Vec2;
use winit::{event::MouseButton, keyboard::KeyCode};

/// Snapshot of which keys are held
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardState {
    held: HashSet<KeyCode>,
}

impl KeyboardState {
    pub fn is_down(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    pub fn held_keys(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.held.iter().copied()
    }
}

impl FromIterator<KeyCode> for KeyboardState {
    fn from_iter<I: IntoIterator<Item = KeyCode>>(keys: I) -> Self {
        Self {
            held: keys.into_iter().collect(),
        }
    }
}

/// Snapshot of the cursor, held buttons & the accumulated wheel value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MouseState {
    /// Cursor in window pixels, origin top-left
    pub position: Vec2,
    pub buttons: HashSet<MouseButton>,
    /// Total wheel movement in lines, positive away from the user
    pub scroll: f32,
}

impl MouseState {
    pub fn is_down(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button)
    }
}

/// Anything that can report the live state of the keyboard & mouse
pub trait InputSource {
    fn keyboard_state(&self) -> KeyboardState;
    fn mouse_state(&self) -> MouseState;
}
