pub mod camera;
pub mod color;
pub mod device;
pub mod error;
pub mod geometry_batch;
pub mod gpu;
pub mod math;
pub mod screen;
pub mod shapes;
pub mod sprites;
pub mod vertex;

pub use wgpu::{Device, Queue, TextureFormat, TextureView};

pub use camera::Camera;
pub use self::color::Color;
pub use device::{
    DeviceHandle, Filter, GraphicsDevice, IndexedDraw, Shading, TextureId, Transform, share,
};
pub use error::{Error, ErrorKind, Result};
pub use gpu::WgpuDevice;
pub use math::{PixelRect, Rect, Vec2, Vec3, vec2, vec3};
pub use screen::Screen;
pub use shapes::{DEFAULT_THICKNESS, FillMode, Shapes};
pub use sprites::Sprites;
