use quill_render::{PixelRect, Screen, Vec2, vec2};
use winit::event::MouseButton;

use crate::source::{InputSource, MouseState};

/// Mouse poller comparing this frame's snapshot with the last one
#[derive(Debug, Clone)]
pub struct Mouse {
    previous: MouseState,
    current: MouseState,
}

impl Mouse {
    pub fn new(source: &impl InputSource) -> Self {
        let current = source.mouse_state();
        Self {
            previous: current.clone(),
            current,
        }
    }

    /// Call once per frame before any queries
    pub fn update(&mut self, source: &impl InputSource) {
        self.previous = std::mem::replace(&mut self.current, source.mouse_state());
    }

    /// Cursor in window pixels, origin top-left
    pub fn window_position(&self) -> Vec2 {
        self.current.position
    }

    /// Cursor movement since the previous update, in window pixels
    pub fn delta(&self) -> Vec2 {
        self.current.position - self.previous.position
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.current.is_down(button)
    }

    /// True if the button went from up last frame to down this frame
    pub fn is_button_clicked(&self, button: MouseButton) -> bool {
        self.current.is_down(button) && !self.previous.is_down(button)
    }

    /// True if the button went from down last frame to up this frame
    pub fn is_button_released(&self, button: MouseButton) -> bool {
        !self.current.is_down(button) && self.previous.is_down(button)
    }

    /// Wheel lines moved since the previous update, positive away from the user
    pub fn scroll_delta(&self) -> f32 {
        self.current.scroll - self.previous.scroll
    }

    /// True if the wheel turned away from the user since the previous update
    ///
    /// This follows winit's sign, so wheel values that grow toward the user read
    /// as [`Mouse::is_scrolling_down`]
    pub fn is_scrolling_up(&self) -> bool {
        self.scroll_delta() > 0.0
    }

    pub fn is_scrolling_down(&self) -> bool {
        self.scroll_delta() < 0.0
    }

    /// Cursor in the screen's own pixels, origin bottom-left
    ///
    /// Accounts for the letterbox bars [`Screen::present`] adds to a
    /// `backbuffer_size` window. Positions over the bars fall outside
    /// `0..width` / `0..height`
    pub fn screen_position(&self, screen: &Screen, backbuffer_size: (u32, u32)) -> Vec2 {
        let presentation = screen.presentation_rect(backbuffer_size.0, backbuffer_size.1);
        window_to_screen(self.window_position(), screen.size(), presentation)
    }
}

/// Maps a top-left based window position into a `screen_size` bottom-left based
/// space presented at `presentation`
pub fn window_to_screen(window: Vec2, screen_size: (u32, u32), presentation: PixelRect) -> Vec2 {
    let offset = vec2(presentation.x as f32, presentation.y as f32);
    let presented = vec2(
        presentation.width.max(1) as f32,
        presentation.height.max(1) as f32,
    );
    let screen = vec2(screen_size.0 as f32, screen_size.1 as f32);

    let relative = (window - offset) / presented * screen;
    vec2(relative.x, screen.y - relative.y)
}
