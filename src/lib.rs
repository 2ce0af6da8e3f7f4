#[cfg(feature = "render")]
pub mod render {
    pub use quill_render::{
        Camera, Color, DeviceHandle, Error, ErrorKind, Filter, FillMode, GraphicsDevice, Result,
        Screen, Shapes, Sprites, TextureId, WgpuDevice, share,
    };
}

#[cfg(feature = "render")]
pub mod math {
    pub use quill_render::{PixelRect, Rect, Vec2, Vec3, vec2, vec3};
}

#[cfg(feature = "input")]
pub mod input {
    pub use quill_input::{InputSource, InputTracker, KeyCode, Keyboard, Mouse, MouseButton};
}

/// Installs `env_logger`, defaulting to errors only unless `RUST_LOG` says otherwise
#[cfg(all(feature = "log", not(target_arch = "wasm32")))]
pub fn init_logging() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("error"));
}
