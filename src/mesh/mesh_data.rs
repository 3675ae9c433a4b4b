//! Mesh data structures - Pure DOP
//!
//! NO METHODS. Just data.
//! Generation happens in mesh_operations.rs

/// Most segments allowed along one axis of a generated mesh.
/// Keeps vertex and index counts well inside `u32`.
pub const MAX_SEGMENTS: u32 = 4096;

/// Mesh vertex uploaded to the GPU
/// Must match the vertex inputs of morph.wgsl and marker.wgsl
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Object-space position
    pub position: [f32; 3],

    /// Object-space unit normal
    pub normal: [f32; 3],
}

/// Colored line vertex for the gizmo axes
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Indexed triangle mesh (counter-clockwise front faces)
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

/// Memory statistics for a mesh
#[derive(Debug, Clone)]
pub struct MeshStats {
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub vertex_bytes: usize,
    pub index_bytes: usize,
}

impl std::fmt::Display for MeshStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Mesh: {} vertices, {} triangles, {} bytes (vertices: {}, indices: {})",
            self.vertex_count,
            self.triangle_count,
            self.vertex_bytes + self.index_bytes,
            self.vertex_bytes,
            self.index_bytes
        )
    }
}
