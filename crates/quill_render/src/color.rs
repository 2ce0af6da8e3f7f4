use color::{AlphaColor, LinearSrgb};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    inner: AlphaColor<LinearSrgb>,
}

impl Color {
    /// Create a new Color from RGBA components in [0..1]
    pub const fn new(components: [f32; 4]) -> Self {
        Self {
            inner: AlphaColor::new(components),
        }
    }

    /// Create an opaque color from 8-bit RGB components
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            inner: AlphaColor::new([r, g, b, 255].map(|c| c as f32 / 255.0)),
        }
    }

    /// Get raw RGBA components
    pub fn components(&self) -> [f32; 4] {
        self.inner.components
    }
}

impl Color {
    pub const BLACK: Color = Self {
        inner: AlphaColor::BLACK,
    };
    pub const WHITE: Color = Self {
        inner: AlphaColor::WHITE,
    };
    pub const RED: Color = Self {
        inner: AlphaColor::new([1., 0., 0., 1.]),
    };
    pub const GREEN: Color = Self {
        inner: AlphaColor::new([0., 1., 0., 1.]),
    };
    pub const BLUE: Color = Self {
        inner: AlphaColor::new([0., 0., 1., 1.]),
    };
}

// Convert Color to wgpu::Color (f64 RGBA)
impl From<Color> for wgpu::Color {
    fn from(value: Color) -> Self {
        let [r, g, b, a] = value.components();
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        }
    }
}
