//! Mesh Module - CPU-side geometry for the torus, marker and gizmo

pub mod mesh_data;
pub mod mesh_operations;

pub use mesh_data::{LineVertex, MeshData, MeshStats, Vertex, MAX_SEGMENTS};
pub use mesh_operations::{
    axis_lines, generate_sphere, generate_torus, line_vertex_buffer_layout, mesh_stats,
    vertex_buffer_layout,
};
