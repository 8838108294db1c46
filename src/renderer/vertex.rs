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

/// Fixed colors; per-level colors come from `sim::Theme`
pub mod colors {
    pub const X_BLOCK: [f32; 4] = [0.00, 0.07, 0.48, 1.0];
    pub const O_BLOCK: [f32; 4] = [0.59, 0.02, 0.03, 1.0];
    pub const X_MARK: [f32; 4] = [0.00, 0.04, 0.29, 1.0];
    pub const O_MARK: [f32; 4] = [0.37, 0.01, 0.02, 1.0];
    pub const HOLE_BOTTOM: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const DIVIDER: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    /// Bars around the letterboxed board
    pub const LETTERBOX: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_matches_struct() {
        let desc = Vertex::desc();
        assert_eq!(desc.array_stride as usize, std::mem::size_of::<Vertex>());
        assert_eq!(desc.attributes[1].offset, 8);
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
    }
}
