use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec2, Vec3, vec2, vec3};

use crate::{device::Transform, math::Rect, screen::Screen};

/// A perspective camera looking straight down at the z = 0 plane
///
/// `z` is the height above the plane; zooming moves the camera up & down. At the
/// base height one world unit covers one pixel of the screen it was created for.
///
/// Matrices & the zoom factor are cached: mutators only change position/height and
/// [`Camera::update_matrices`] must run before the derived values are read
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec2,
    z: f32,
    z_base: f32,
    zoom_factor: f32,
    aspect_ratio: f32,
    field_of_view: f32,
    view: Mat4,
    projection: Mat4,
}

impl Camera {
    pub const MIN_Z: f32 = 1.0;
    pub const MAX_Z: f32 = 2048.0;

    /// Creates a camera matching the screen's aspect ratio & pixel height
    pub fn new(screen: &Screen) -> Self {
        let (width, height) = screen.size();
        Self::from_size(width, height)
    }

    /// Creates a camera for a `width` × `height` pixel viewport
    pub fn from_size(width: u32, height: u32) -> Self {
        let (width, height) = (width.max(1) as f32, height.max(1) as f32);

        let mut camera = Self {
            position: Vec2::ZERO,
            z: 0.0,
            z_base: 0.0,
            zoom_factor: 1.0,
            aspect_ratio: width / height,
            field_of_view: FRAC_PI_2,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        };
        camera.z_base = camera.z_from_height(height);
        camera.z = camera.z_base;
        camera.update_matrices();
        camera
    }

    /// Recomputes the zoom factor, view & projection from the current position & height
    pub fn update_matrices(&mut self) {
        self.zoom_factor = self.z / self.z_base;

        self.view = Mat4::look_at_rh(
            vec3(self.position.x, self.position.y, self.z),
            vec3(self.position.x, self.position.y, 0.0),
            Vec3::Y,
        );
        self.projection = Mat4::perspective_rh(
            self.field_of_view,
            self.aspect_ratio,
            Self::MIN_Z,
            Self::MAX_Z,
        );
    }

    /// Height at which the vertical field of view spans exactly `height` world units
    pub fn z_from_height(&self, height: f32) -> f32 {
        (0.5 * height) / (0.5 * self.field_of_view).tan()
    }

    /// Width & height of the plane area visible at the current height
    pub fn visible_size(&self) -> Vec2 {
        let height = 2.0 * (0.5 * self.field_of_view).tan() * self.z;
        vec2(self.aspect_ratio * height, height)
    }

    /// World-space rectangle visible at the current height, centered on the camera
    pub fn visible_bounds(&self) -> Rect {
        Rect::from_center(self.position, self.visible_size())
    }

    /// Converts a point on the z = 0 plane to pixels of a `screen_size` viewport
    /// (origin bottom-left)
    pub fn world_to_screen(&self, world: Vec2, screen_size: Vec2) -> Vec2 {
        let bounds = self.visible_bounds();
        (world - bounds.min()) / bounds.size * screen_size
    }

    /// Converts viewport pixels (origin bottom-left) back to the z = 0 plane
    pub fn screen_to_world(&self, screen: Vec2, screen_size: Vec2) -> Vec2 {
        let bounds = self.visible_bounds();
        screen / screen_size * bounds.size + bounds.min()
    }

    /// Moves the camera by `amount` world units
    pub fn pan(&mut self, amount: Vec2) {
        self.position += amount;
    }

    pub fn move_to(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Raises (positive) or lowers (negative) the camera, clamped to [`Self::MIN_Z`, `Self::MAX_Z`]
    pub fn zoom(&mut self, amount: f32) {
        self.z = (self.z + amount).clamp(Self::MIN_Z, Self::MAX_Z);
    }

    /// Returns to the 1:1 base height
    pub fn reset_zoom(&mut self) {
        self.z = self.z_base;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn z(&self) -> f32 {
        self.z
    }

    pub fn z_base(&self) -> f32 {
        self.z_base
    }

    /// `z / z_base` as of the last [`Camera::update_matrices`]; above 1 is zoomed out
    pub fn zoom_factor(&self) -> f32 {
        self.zoom_factor
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn field_of_view(&self) -> f32 {
        self.field_of_view
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Cached view & projection as a draw transform
    pub fn transform(&self) -> Transform {
        Transform {
            view: self.view,
            projection: self.projection,
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}
