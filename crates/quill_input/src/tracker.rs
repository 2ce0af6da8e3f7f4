use std::collections::HashSet;

use quill_render::{Vec2, vec2};
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::source::{InputSource, KeyboardState, MouseState};

/// Pixel deltas (touchpads) are converted to wheel lines at this rate
pub const PIXELS_PER_LINE: f32 = 20.0;

/// Live keyboard & mouse state folded from `winit` window events
///
/// Feed every [`WindowEvent`] to [`InputTracker::handle_event`]; the pollers read
/// snapshots of it once per frame through [`InputSource`]
#[derive(Debug, Default)]
pub struct InputTracker {
    keys: HashSet<KeyCode>,
    buttons: HashSet<MouseButton>,
    cursor: Vec2,
    scroll: f32,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the live state, returns true if the event was an input event
    pub fn handle_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.key(code, event.state);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => self.button(*button, *state),
            WindowEvent::CursorMoved { position, .. } => self.cursor(*position),
            WindowEvent::MouseWheel { delta, .. } => self.wheel(*delta),
            WindowEvent::Focused(false) => self.release_all(),
            _ => return false,
        }
        true
    }

    pub(crate) fn key(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => self.keys.insert(key),
            ElementState::Released => self.keys.remove(&key),
        };
    }

    pub(crate) fn button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => self.buttons.insert(button),
            ElementState::Released => self.buttons.remove(&button),
        };
    }

    pub(crate) fn cursor(&mut self, position: PhysicalPosition<f64>) {
        self.cursor = vec2(position.x as f32, position.y as f32);
    }

    pub(crate) fn wheel(&mut self, delta: MouseScrollDelta) {
        self.scroll += match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_LINE,
        };
    }

    // Key-up events are lost while unfocused, so nothing may stay held
    fn release_all(&mut self) {
        if !self.keys.is_empty() || !self.buttons.is_empty() {
            log::debug!(
                "focus lost, releasing {} keys & {} buttons",
                self.keys.len(),
                self.buttons.len()
            );
        }
        self.keys.clear();
        self.buttons.clear();
    }
}

impl InputSource for InputTracker {
    fn keyboard_state(&self) -> KeyboardState {
        self.keys.iter().copied().collect()
    }

    fn mouse_state(&self) -> MouseState {
        MouseState {
            position: self.cursor,
            buttons: self.buttons.clone(),
            scroll: self.scroll,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::ElementState::{Pressed, Released};

    #[test]
    fn keys_are_held_until_released() {
        let mut tracker = InputTracker::new();
        tracker.key(KeyCode::Space, Pressed);
        tracker.key(KeyCode::KeyA, Pressed);
        assert!(tracker.keyboard_state().is_down(KeyCode::Space));

        tracker.key(KeyCode::Space, Released);
        let state = tracker.keyboard_state();
        assert!(!state.is_down(KeyCode::Space));
        assert_eq!(state.held_keys().collect::<Vec<_>>(), vec![KeyCode::KeyA]);
    }

    #[test]
    fn wheel_accumulates_lines_and_pixels() {
        let mut tracker = InputTracker::new();
        tracker.wheel(MouseScrollDelta::LineDelta(0.0, 1.0));
        tracker.wheel(MouseScrollDelta::LineDelta(0.0, 2.0));
        tracker.wheel(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -40.0)));
        assert_eq!(tracker.mouse_state().scroll, 1.0);
    }

    #[test]
    fn cursor_and_buttons_are_snapshotted() {
        let mut tracker = InputTracker::new();
        tracker.cursor(PhysicalPosition::new(120.5, 64.0));
        tracker.button(MouseButton::Middle, Pressed);

        let state = tracker.mouse_state();
        assert_eq!(state.position, vec2(120.5, 64.0));
        assert!(state.is_down(MouseButton::Middle));

        // later events don't reach an earlier snapshot
        tracker.button(MouseButton::Middle, Released);
        assert!(state.is_down(MouseButton::Middle));
        assert!(!tracker.mouse_state().is_down(MouseButton::Middle));
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut tracker = InputTracker::new();
        tracker.key(KeyCode::ArrowLeft, Pressed);
        tracker.button(MouseButton::Left, Pressed);

        assert!(tracker.handle_event(&WindowEvent::Focused(false)));
        assert_eq!(tracker.keyboard_state(), KeyboardState::default());
        assert!(tracker.mouse_state().buttons.is_empty());

        assert!(!tracker.handle_event(&WindowEvent::Focused(true)));
        assert!(!tracker.handle_event(&WindowEvent::CloseRequested));
    }
}
