//! Renderer Data - GPU resources owned by the demo window
//!
//! NO METHODS. Setup, upload and drawing live in renderer_operations.rs

use std::sync::Arc;
use winit::window::Window;

/// Depth buffer format shared by all pipelines
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Background color
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.02,
    g: 0.02,
    b: 0.03,
    a: 1.0,
};

/// Indexed mesh uploaded to the GPU
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

/// Everything needed to draw one frame
pub struct RendererData {
    pub window: Arc<Window>,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub depth_view: wgpu::TextureView,

    // Pipelines
    pub morph_pipeline: wgpu::RenderPipeline,
    pub marker_pipeline: wgpu::RenderPipeline,
    pub gizmo_pipeline: wgpu::RenderPipeline,

    // Uniforms (one bind group shared by all pipelines)
    pub camera_buffer: wgpu::Buffer,
    pub morph_buffer: wgpu::Buffer,
    pub marker_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,

    // Geometry
    pub torus: GpuMesh,
    pub marker: GpuMesh,
    pub gizmo_lines: wgpu::Buffer,
    pub gizmo_line_count: u32,
}
