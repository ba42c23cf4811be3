//! Vertex layout used for runtime-built meshes

use bytemuck::{Pod, Zeroable};

/// Position / texture coordinate / normal vertex
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Object-space position
    pub position: [f32; 3],
    /// Texture coordinate
    pub uv: [f32; 2],
    /// Object-space normal
    pub normal: [f32; 3],
}

impl Vertex {
    /// Create a vertex
    pub fn new(position: [f32; 3], uv: [f32; 2], normal: [f32; 3]) -> Self {
        Self { position, uv, normal }
    }
}
