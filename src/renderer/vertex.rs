//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const SKY_TOP: [f32; 4] = [0.53, 0.81, 0.92, 1.0]; // #87CEEB
    pub const SKY_BOTTOM: [f32; 4] = [0.60, 0.98, 0.60, 1.0]; // #98FB98
    pub const PITCH_TOP: [f32; 4] = [0.20, 0.80, 0.20, 1.0]; // #32CD32
    pub const PITCH_BOTTOM: [f32; 4] = [0.13, 0.55, 0.13, 1.0]; // #228B22
    pub const LINE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const NET: [f32; 4] = [0.73, 0.73, 0.73, 1.0];
    pub const POST: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BALL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BALL_PANEL: [f32; 4] = [0.13, 0.13, 0.13, 1.0];
    pub const BALL_OUTLINE: [f32; 4] = [0.13, 0.13, 0.13, 1.0];
    pub const SHADOW: [f32; 4] = [0.0, 0.0, 0.0, 0.25];
    pub const TRAIL: [f32; 4] = [0.74, 0.74, 0.74, 1.0];
    pub const AIM_GUIDE: [f32; 4] = [1.0, 0.9, 0.2, 0.8];
}
