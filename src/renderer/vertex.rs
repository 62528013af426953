//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
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
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const PLAYER: [f32; 4] = [0.2, 0.9, 0.3, 1.0];
    pub const BULLET: [f32; 4] = [1.0, 1.0, 0.4, 1.0];
    pub const ALIEN_NORMAL: [f32; 4] = [0.9, 0.2, 0.2, 1.0];
    pub const ALIEN_HEAVY: [f32; 4] = [0.6, 0.3, 0.9, 1.0];
    pub const HP_BAR_BACK: [f32; 4] = [0.3, 0.0, 0.0, 1.0];
    pub const HP_BAR: [f32; 4] = [0.2, 1.0, 0.2, 1.0];
    pub const BUTTON: [f32; 4] = [0.25, 0.25, 0.35, 1.0];
    pub const BUTTON_BORDER: [f32; 4] = [0.8, 0.8, 0.9, 1.0];
    pub const PAUSE_ICON: [f32; 4] = [0.9, 0.9, 0.9, 1.0];
    pub const PROGRESS_BACK: [f32; 4] = [0.2, 0.2, 0.2, 1.0];
    pub const PROGRESS: [f32; 4] = [0.3, 0.7, 1.0, 1.0];
    /// Dims the playfield behind the pause menu
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.6];
}
