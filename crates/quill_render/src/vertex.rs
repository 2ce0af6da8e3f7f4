use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use wgpu::{VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};

use crate::Color;

/// A single vertex shared by shapes & sprites
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Creates a new vertex with position, color, & texture coordinates
    ///
    /// - `position`: `[x, y, z]` in world space
    /// - `color`: RGBA color
    /// - `tex_coords`: `[u, v]` in normalized (0–1) texture space
    pub fn new(position: Vec3, color: Color, tex_coords: [f32; 2]) -> Self {
        Self {
            position: position.into(),
            color: color.components(),
            tex_coords,
        }
    }

    /// Untextured vertex, only its color contributes
    pub fn colored(position: Vec3, color: Color) -> Self {
        Self::new(position, color, [0.0, 0.0])
    }

    pub fn position(&self) -> Vec3 {
        self.position.into()
    }

    /// Returns the vertex buffer layout
    ///
    /// This must match the vertex shader input layout:
    /// - location 0: `vec3<f32>` (position)
    /// - location 1: `vec4<f32>` (color)
    /// - location 2: `vec2<f32>` (texture coordinates)
    pub fn desc() -> VertexBufferLayout<'static> {
        VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: VertexStepMode::Vertex,
            attributes: &[
                VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: VertexFormat::Float32x3,
                },
                VertexAttribute {
                    offset: 12,
                    shader_location: 1,
                    format: VertexFormat::Float32x4,
                },
                VertexAttribute {
                    offset: 28,
                    shader_location: 2,
                    format: VertexFormat::Float32x2,
                },
            ],
        }
    }
}
