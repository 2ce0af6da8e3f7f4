pub mod keyboard;
pub mod mouse;
pub mod source;
pub mod tracker;

pub use winit::{event::MouseButton, event::WindowEvent, keyboard::KeyCode};

pub use keyboard::Keyboard;
pub use mouse::Mouse;
pub use source::{InputSource, KeyboardState, MouseState};
pub use tracker::InputTracker;
