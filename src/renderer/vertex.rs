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

/// Colors for game elements (sRGB)
pub mod colors {
    /// `0xRRGGBB` → RGBA
    pub const fn hex(rgb: u32, alpha: f32) -> [f32; 4] {
        [
            ((rgb >> 16) & 0xff) as f32 / 255.0,
            ((rgb >> 8) & 0xff) as f32 / 255.0,
            (rgb & 0xff) as f32 / 255.0,
            alpha,
        ]
    }

    pub const BACKGROUND: [f32; 4] = hex(0x1a202c, 1.0);
    pub const LANE_LINE: [f32; 4] = [1.0, 1.0, 1.0, 0.3];
    pub const PLAYER: [f32; 4] = hex(0x00f6ff, 1.0);
    pub const CAR: [f32; 4] = hex(0xff4757, 1.0);
    pub const CONSTRUCTION: [f32; 4] = hex(0xffa726, 1.0);
    pub const BIRD: [f32; 4] = hex(0x795548, 1.0);
    pub const CURRENCY: [f32; 4] = hex(0x00f6ff, 1.0);
    pub const HEALTH: [f32; 4] = hex(0x66bb6a, 1.0);
    pub const BOOST: [f32; 4] = hex(0xa855f7, 1.0);
    pub const ENEMY: [f32; 4] = hex(0xff6b6b, 1.0);
}
