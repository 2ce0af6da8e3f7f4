use std::{cell::RefCell, rc::Rc};

use glam::Mat4;

use crate::{Color, Result, vertex::Vertex};

/// Handle to a texture or render target owned by a [`GraphicsDevice`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

/// Texture sampling filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    /// Point sampling, keeps pixel art crisp
    Nearest,
    #[default]
    Linear,
}

/// How the fragments of an indexed draw are shaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    /// Vertex colors only, texture coordinates are ignored
    VertexColor,
    /// Vertex colors modulate the sampled texture
    Textured { texture: TextureId, filter: Filter },
}

/// View & projection matrices applied to a draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub view: Mat4,
    pub projection: Mat4,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        view: Mat4::IDENTITY,
        projection: Mat4::IDENTITY,
    };

    /// Y-up pixel space over a `width` × `height` viewport, origin bottom-left
    pub fn pixel_space(width: u32, height: u32) -> Self {
        Self {
            view: Mat4::IDENTITY,
            projection: Mat4::orthographic_rh(0.0, width as f32, 0.0, height as f32, 0.0, 1.0),
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

/// One indexed triangle-list draw call
#[derive(Debug, Clone, Copy)]
pub struct IndexedDraw<'a> {
    pub vertices: &'a [Vertex],
    pub indices: &'a [u16],
    pub transform: Transform,
    pub shading: Shading,
}

impl IndexedDraw<'_> {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// The graphics capabilities the screen, shapes & sprites are built on
///
/// Implemented by [`WgpuDevice`](crate::gpu::WgpuDevice); anything that can clear a
/// target & draw indexed triangles can stand in for it
pub trait GraphicsDevice {
    /// Size of the real display surface in pixels
    fn backbuffer_size(&self) -> (u32, u32);

    /// Size of the current render destination (bound target or backbuffer)
    fn viewport_size(&self) -> (u32, u32);

    /// Allocates an off-screen color target that can later be sampled as a texture
    fn create_render_target(&mut self, width: u32, height: u32) -> TextureId;

    /// Uploads tightly packed 8-bit RGBA pixels as a new texture
    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> TextureId;

    /// Pixel size of a live texture, `None` once released or if never created
    fn texture_size(&self, texture: TextureId) -> Option<(u32, u32)>;

    /// Frees a texture; releasing an unknown or already released id does nothing
    fn release_texture(&mut self, texture: TextureId);

    /// Redirects drawing to `target`, or back to the backbuffer with `None`
    fn set_render_target(&mut self, target: Option<TextureId>) -> Result<()>;

    /// Clears the current render destination
    fn clear(&mut self, color: Color);

    /// Submits one indexed triangle list to the current render destination
    fn draw_indexed(&mut self, draw: IndexedDraw<'_>);
}

/// Shared, single-threaded handle to the device every component is constructed with
pub type DeviceHandle = Rc<RefCell<dyn GraphicsDevice>>;

/// Wraps a device into a [`DeviceHandle`]
pub fn share(device: impl GraphicsDevice + 'static) -> DeviceHandle {
    Rc::new(RefCell::new(device))
}
