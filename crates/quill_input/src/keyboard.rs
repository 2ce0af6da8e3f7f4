use winit::keyboard::KeyCode;

use crate::source::{InputSource, KeyboardState};

/// Keyboard poller comparing this frame's snapshot with the last one
#[derive(Debug, Clone)]
pub struct Keyboard {
    previous: KeyboardState,
    current: KeyboardState,
}

impl Keyboard {
    /// Starts with both snapshots equal, so nothing reads as just pressed
    pub fn new(source: &impl InputSource) -> Self {
        let current = source.keyboard_state();
        Self {
            previous: current.clone(),
            current,
        }
    }

    /// Call once per frame before any queries
    pub fn update(&mut self, source: &impl InputSource) {
        self.previous = std::mem::replace(&mut self.current, source.keyboard_state());
    }

    /// True if key is held down this frame
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.current.is_down(key)
    }

    pub fn is_key_up(&self, key: KeyCode) -> bool {
        !self.current.is_down(key)
    }

    /// True if the key went from up last frame to down this frame
    pub fn is_key_clicked(&self, key: KeyCode) -> bool {
        self.current.is_down(key) && !self.previous.is_down(key)
    }

    /// True if the key went from down last frame to up this frame
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        !self.current.is_down(key) && self.previous.is_down(key)
    }

    /// True if any key in slice is held
    pub fn any_key_down(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|&key| self.is_key_down(key))
    }

    /// True if all keys in slice are held
    pub fn all_keys_down(&self, keys: &[KeyCode]) -> bool {
        keys.iter().all(|&key| self.is_key_down(key))
    }

    /// True if any key in slice was just pressed
    pub fn any_key_clicked(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|&key| self.is_key_clicked(key))
    }

    /// True if any key in slice was just released
    pub fn any_key_released(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|&key| self.is_key_released(key))
    }
}
