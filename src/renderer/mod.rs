//! Renderer Module - wgpu pipelines for the torus, marker and gizmo
//!
//! - renderer_data.rs: GPU resources, NO methods
//! - renderer_operations.rs: setup, per-frame upload, drawing
//! - uniforms.rs: uniform layouts shared with shaders/

pub mod renderer_data;
pub mod renderer_operations;
pub mod uniforms;

pub use renderer_data::{GpuMesh, RendererData, CLEAR_COLOR, DEPTH_FORMAT};
pub use renderer_operations::{
    create_depth_view, handle_surface_error, init_renderer, render_frame, resize, upload_mesh,
    write_frame_uniforms,
};
pub use uniforms::{build_marker_uniform, build_morph_uniform, MarkerUniform, MorphUniform};
