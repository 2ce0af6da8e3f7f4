pub use glam::{Mat4, Vec2, Vec3, vec2, vec3};

/// Rotates `point` around `pivot` in the XY plane by `radians`
///
/// Positive angles turn counter-clockwise in a y-up space; Z of `point` is kept as is
pub fn rotate(point: Vec3, pivot: Vec3, radians: f32) -> Vec3 {
    let (sin, cos) = radians.sin_cos();
    let translated = point - pivot;

    vec3(
        translated.x * cos - translated.y * sin + pivot.x,
        translated.x * sin + translated.y * cos + pivot.y,
        point.z,
    )
}

/// Axis-aligned rectangle in a y-up space, defined by its minimum (bottom-left) corner & size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub position: Vec2,
    pub size: Vec2,
}

impl Rect {
    /// Create a new rectangle from its bottom-left corner & size
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    /// Create a rectangle of `size` centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(center - size * 0.5, size)
    }

    /// Returns the bottom-left corner (min coords)
    pub fn min(&self) -> Vec2 {
        self.position
    }

    /// Returns the top-right corner (max coords)
    pub fn max(&self) -> Vec2 {
        self.position + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    // Move the rectangle by the given delta vector
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Returns true if the point is inside of the rectangle, edges included
    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min()).all() && point.cmple(self.max()).all()
    }

    /// Returns the four corners in this order: top-left, top-right, bottom-right, bottom-left
    pub fn corners(&self) -> [Vec2; 4] {
        let min = self.min();
        let max = self.max();
        [
            vec2(min.x, max.y),
            vec2(max.x, max.y),
            vec2(max.x, min.y),
            vec2(min.x, min.y),
        ]
    }
}

/// Integer rectangle in backbuffer or texture pixels
///
/// `x`/`y` is the corner nearest the origin of whatever pixel space it lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns true if the (possibly fractional) pixel position falls inside
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x as f32
            && y >= self.y as f32
            && x < (self.x + self.width) as f32
            && y < (self.y + self.height) as f32
    }

    pub fn to_rect(self) -> Rect {
        Rect::new(
            vec2(self.x as f32, self.y as f32),
            vec2(self.width as f32, self.height as f32),
        )
    }
}
