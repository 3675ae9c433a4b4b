//! Renderer Operations - wgpu setup, per-frame upload and drawing

use super::renderer_data::{GpuMesh, RendererData, CLEAR_COLOR, DEPTH_FORMAT};
use super::uniforms::{MarkerUniform, MorphUniform};
use crate::camera::CameraUniform;
use crate::config::DemoConfig;
use crate::error::{DemoError, DemoResult, OptionExt};
use crate::mesh::{
    generate_sphere, generate_torus, line_vertex_buffer_layout, mesh_stats, vertex_buffer_layout,
    LineVertex, MeshData,
};
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::window::Window;

/// Gizmo line buffer capacity (three axes, two vertices each)
const GIZMO_LINE_CAPACITY: usize = 6;

/// Fixed-function state for one render pipeline
struct PipelineDesc<'a> {
    label: &'a str,
    module: &'a wgpu::ShaderModule,
    vs_entry: &'a str,
    fs_entry: &'a str,
    buffers: &'a [wgpu::VertexBufferLayout<'a>],
    topology: wgpu::PrimitiveTopology,
    cull_mode: Option<wgpu::Face>,
    depth_write: bool,
    depth_compare: wgpu::CompareFunction,
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Create the surface, device, pipelines and static geometry for a window
pub async fn init_renderer(window: Arc<Window>, config: &DemoConfig) -> DemoResult<RendererData> {
    log::debug!("[init_renderer] Starting GPU initialization");
    let size = window.inner_size();

    let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });
    let surface = instance.create_surface(window.clone())?;

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
        .ok_or_demo(|| DemoError::AdapterNotFound)?;
    let info = adapter.get_info();
    log::info!(
        "[init_renderer] Using adapter {} ({:?})",
        info.name,
        info.backend
    );

    let (device, queue) = adapter
        .request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Morph Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
            },
            None,
        )
        .await?;

    let capabilities = surface.get_capabilities(&adapter);
    // The shader writes display values directly, so prefer a linear target
    let format = capabilities
        .formats
        .iter()
        .copied()
        .find(|f| !f.is_srgb())
        .or_else(|| capabilities.formats.first().copied())
        .ok_or_demo(|| DemoError::SurfaceCreation("surface reports no formats".to_string()))?;
    let alpha_mode = capabilities
        .alpha_modes
        .first()
        .copied()
        .unwrap_or(wgpu::CompositeAlphaMode::Auto);

    let surface_config = wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: size.width.max(1),
        height: size.height.max(1),
        present_mode: wgpu::PresentMode::Fifo,
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    };
    surface.configure(&device, &surface_config);
    let depth_view = create_depth_view(&device, &surface_config);
    log::info!(
        "[init_renderer] Surface {}x{} {:?}",
        surface_config.width,
        surface_config.height,
        format
    );

    // Uniforms
    let camera_buffer = create_uniform_buffer(
        &device,
        "Camera Uniform",
        bytemuck::bytes_of(&CameraUniform::default()),
    );
    let morph_buffer = create_uniform_buffer(
        &device,
        "Morph Uniform",
        bytemuck::bytes_of(&<MorphUniform as bytemuck::Zeroable>::zeroed()),
    );
    let marker_buffer = create_uniform_buffer(
        &device,
        "Marker Uniform",
        bytemuck::bytes_of(&<MarkerUniform as bytemuck::Zeroable>::zeroed()),
    );

    let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Uniform Bind Group Layout"),
        entries: &[uniform_entry(0), uniform_entry(1), uniform_entry(2)],
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Uniform Bind Group"),
        layout: &bind_group_layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: morph_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: marker_buffer.as_entire_binding(),
            },
        ],
    });
    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Demo Pipeline Layout"),
        bind_group_layouts: &[&bind_group_layout],
        push_constant_ranges: &[],
    });

    // Pipelines
    let morph_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Morph Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shaders/morph.wgsl").into()),
    });
    let marker_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Marker Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shaders/marker.wgsl").into()),
    });

    let mesh_layouts = [vertex_buffer_layout()];
    let line_layouts = [line_vertex_buffer_layout()];

    let morph_pipeline = create_pipeline(
        &device,
        &pipeline_layout,
        format,
        &PipelineDesc {
            label: "Morph Pipeline",
            module: &morph_module,
            vs_entry: "vs_main",
            fs_entry: "fs_main",
            buffers: &mesh_layouts,
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: Some(wgpu::Face::Back),
            depth_write: true,
            depth_compare: wgpu::CompareFunction::Less,
        },
    );
    let marker_pipeline = create_pipeline(
        &device,
        &pipeline_layout,
        format,
        &PipelineDesc {
            label: "Marker Pipeline",
            module: &marker_module,
            vs_entry: "vs_marker",
            fs_entry: "fs_marker",
            buffers: &mesh_layouts,
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: Some(wgpu::Face::Back),
            depth_write: true,
            depth_compare: wgpu::CompareFunction::Less,
        },
    );
    // Gizmo axes draw on top of the scene
    let gizmo_pipeline = create_pipeline(
        &device,
        &pipeline_layout,
        format,
        &PipelineDesc {
            label: "Gizmo Pipeline",
            module: &marker_module,
            vs_entry: "vs_line",
            fs_entry: "fs_line",
            buffers: &line_layouts,
            topology: wgpu::PrimitiveTopology::LineList,
            cull_mode: None,
            depth_write: false,
            depth_compare: wgpu::CompareFunction::Always,
        },
    );

    // Geometry
    let torus_mesh = generate_torus(
        config.torus.radius,
        config.torus.tube,
        config.torus.radial_segments,
        config.torus.tubular_segments,
    )?;
    let marker_mesh = generate_sphere(
        config.marker.radius,
        config.marker.segments,
        config.marker.rings,
    )?;
    log::info!("[init_renderer] Torus {}", mesh_stats(&torus_mesh));
    log::info!("[init_renderer] Marker {}", mesh_stats(&marker_mesh));

    let torus = upload_mesh(&device, &torus_mesh, "Torus");
    let marker = upload_mesh(&device, &marker_mesh, "Marker");
    let gizmo_lines = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Gizmo Lines"),
        size: (GIZMO_LINE_CAPACITY * std::mem::size_of::<LineVertex>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    log::info!("[init_renderer] GPU initialization complete");

    Ok(RendererData {
        window,
        surface,
        device,
        queue,
        surface_config,
        depth_view,
        morph_pipeline,
        marker_pipeline,
        gizmo_pipeline,
        camera_buffer,
        morph_buffer,
        marker_buffer,
        bind_group,
        torus,
        marker,
        gizmo_lines,
        gizmo_line_count: 0,
    })
}

fn uniform_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn create_uniform_buffer(device: &wgpu::Device, label: &str, contents: &[u8]) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
    desc: &PipelineDesc,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: desc.module,
            entry_point: desc.vs_entry,
            buffers: desc.buffers,
        },
        fragment: Some(wgpu::FragmentState {
            module: desc.module,
            entry_point: desc.fs_entry,
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: desc.topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: desc.cull_mode,
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: desc.depth_write,
            depth_compare: desc.depth_compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
    })
}

/// Upload an indexed mesh
pub fn upload_mesh(device: &wgpu::Device, mesh: &MeshData, label: &str) -> GpuMesh {
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{} Vertices", label)),
        contents: bytemuck::cast_slice(&mesh.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{} Indices", label)),
        contents: bytemuck::cast_slice(&mesh.indices),
        usage: wgpu::BufferUsages::INDEX,
    });

    GpuMesh {
        vertex_buffer,
        index_buffer,
        index_count: mesh.indices.len() as u32,
    }
}

/// Depth attachment matching the surface size
pub fn create_depth_view(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

// ============================================================================
// UPDATES
// ============================================================================

/// Reconfigure the surface after a resize; zero sizes are ignored
pub fn resize(renderer: &mut RendererData, width: u32, height: u32) {
    if width == 0 || height == 0 {
        return;
    }
    renderer.surface_config.width = width;
    renderer.surface_config.height = height;
    renderer
        .surface
        .configure(&renderer.device, &renderer.surface_config);
    renderer.depth_view = create_depth_view(&renderer.device, &renderer.surface_config);
    log::debug!("[resize] Surface now {}x{}", width, height);
}

/// Upload this frame's uniforms and gizmo lines
pub fn write_frame_uniforms(
    renderer: &mut RendererData,
    camera: &CameraUniform,
    morph: &MorphUniform,
    marker: &MarkerUniform,
    gizmo_lines: &[LineVertex],
) {
    renderer
        .queue
        .write_buffer(&renderer.camera_buffer, 0, bytemuck::bytes_of(camera));
    renderer
        .queue
        .write_buffer(&renderer.morph_buffer, 0, bytemuck::bytes_of(morph));
    renderer
        .queue
        .write_buffer(&renderer.marker_buffer, 0, bytemuck::bytes_of(marker));

    let lines = &gizmo_lines[..gizmo_lines.len().min(GIZMO_LINE_CAPACITY)];
    renderer
        .queue
        .write_buffer(&renderer.gizmo_lines, 0, bytemuck::cast_slice(lines));
    renderer.gizmo_line_count = lines.len() as u32;
}

// ============================================================================
// DRAWING
// ============================================================================

fn draw_mesh<'a>(pass: &mut wgpu::RenderPass<'a>, mesh: &'a GpuMesh) {
    pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
    pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
    pass.draw_indexed(0..mesh.index_count, 0, 0..1);
}

/// Draw torus, marker and gizmo, then present
pub fn render_frame(renderer: &RendererData) -> Result<(), wgpu::SurfaceError> {
    let output = renderer.surface.get_current_texture()?;
    let view = output
        .texture
        .create_view(&wgpu::TextureViewDescriptor::default());

    let mut encoder = renderer
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Frame Encoder"),
        });

    {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Main Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &renderer.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        pass.set_bind_group(0, &renderer.bind_group, &[]);

        pass.set_pipeline(&renderer.morph_pipeline);
        draw_mesh(&mut pass, &renderer.torus);

        pass.set_pipeline(&renderer.marker_pipeline);
        draw_mesh(&mut pass, &renderer.marker);

        if renderer.gizmo_line_count > 0 {
            pass.set_pipeline(&renderer.gizmo_pipeline);
            pass.set_vertex_buffer(0, renderer.gizmo_lines.slice(..));
            pass.draw(0..renderer.gizmo_line_count, 0..1);
        }
    }

    renderer.queue.submit(std::iter::once(encoder.finish()));
    output.present();
    Ok(())
}

/// Recover from a failed frame where possible
pub fn handle_surface_error(renderer: &mut RendererData, error: wgpu::SurfaceError) -> DemoResult<()> {
    match error {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            log::warn!("[handle_surface_error] Surface {:?}, reconfiguring", error);
            let (width, height) = (renderer.surface_config.width, renderer.surface_config.height);
            resize(renderer, width, height);
            Ok(())
        }
        wgpu::SurfaceError::Timeout => {
            log::warn!("[handle_surface_error] Surface timeout, skipping frame");
            Ok(())
        }
        wgpu::SurfaceError::OutOfMemory => {
            log::error!("[handle_surface_error] Out of GPU memory");
            Err(error.into())
        }
    }
}
