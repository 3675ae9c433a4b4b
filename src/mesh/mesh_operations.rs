//! Mesh generation - pure functions that build CPU-side mesh data
//!
//! Vertex order and triangle winding follow the three.js parametric
//! geometries so the displaced surface keeps its orientation.

use super::mesh_data::{LineVertex, MeshData, MeshStats, Vertex, MAX_SEGMENTS};
use crate::error::{DemoError, DemoResult};
use cgmath::{InnerSpace, Vector3};
use std::f32::consts::{PI, TAU};

// ============================================================================
// GENERATION
// ============================================================================

/// Generate a torus in the XY plane around the Z axis.
///
/// `(radial_segments + 1) * (tubular_segments + 1)` vertices with the seam
/// duplicated, `6 * radial_segments * tubular_segments` indices.
pub fn generate_torus(
    radius: f32,
    tube: f32,
    radial_segments: u32,
    tubular_segments: u32,
) -> DemoResult<MeshData> {
    if radius <= 0.0 {
        return Err(DemoError::invalid_config("torus.radius", radius, "must be positive"));
    }
    if tube <= 0.0 {
        return Err(DemoError::invalid_config("torus.tube", tube, "must be positive"));
    }
    if radial_segments == 0 || tubular_segments == 0 {
        return Err(DemoError::invalid_config(
            "torus.segments",
            format!("{}x{}", radial_segments, tubular_segments),
            "segment counts must be non-zero",
        ));
    }
    if radial_segments > MAX_SEGMENTS || tubular_segments > MAX_SEGMENTS {
        return Err(DemoError::invalid_config(
            "torus.segments",
            format!("{}x{}", radial_segments, tubular_segments),
            format!("segment counts must not exceed {}", MAX_SEGMENTS),
        ));
    }

    let row = tubular_segments + 1;
    let mut vertices = Vec::with_capacity(((radial_segments + 1) * row) as usize);
    let mut indices = Vec::with_capacity((6 * radial_segments * tubular_segments) as usize);

    for j in 0..=radial_segments {
        let v = j as f32 / radial_segments as f32 * TAU;
        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * TAU;

            let position = Vector3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let center = Vector3::new(radius * u.cos(), radius * u.sin(), 0.0);
            let normal = (position - center).normalize();

            vertices.push(Vertex {
                position: position.into(),
                normal: normal.into(),
            });
        }
    }

    for j in 1..=radial_segments {
        for i in 1..=tubular_segments {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;

            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    Ok(MeshData { vertices, indices })
}

/// Generate a UV sphere centred on the origin.
///
/// Degenerate triangles at the poles are skipped, giving
/// `6 * width_segments * (height_segments - 1)` indices.
pub fn generate_sphere(
    radius: f32,
    width_segments: u32,
    height_segments: u32,
) -> DemoResult<MeshData> {
    if radius <= 0.0 {
        return Err(DemoError::invalid_config("sphere.radius", radius, "must be positive"));
    }
    if width_segments < 3 || height_segments < 2 {
        return Err(DemoError::invalid_config(
            "sphere.segments",
            format!("{}x{}", width_segments, height_segments),
            "need at least 3 width and 2 height segments",
        ));
    }
    if width_segments > MAX_SEGMENTS || height_segments > MAX_SEGMENTS {
        return Err(DemoError::invalid_config(
            "sphere.segments",
            format!("{}x{}", width_segments, height_segments),
            format!("segment counts must not exceed {}", MAX_SEGMENTS),
        ));
    }

    let row = width_segments + 1;
    let mut vertices = Vec::with_capacity(((height_segments + 1) * row) as usize);
    let mut indices = Vec::new();

    for iy in 0..=height_segments {
        let theta = iy as f32 / height_segments as f32 * PI;
        for ix in 0..=width_segments {
            let phi = ix as f32 / width_segments as f32 * TAU;

            let position = Vector3::new(
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            );
            vertices.push(Vertex {
                position: position.into(),
                normal: position.normalize().into(),
            });
        }
    }

    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;

            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    Ok(MeshData { vertices, indices })
}

/// Three axis segments of length `size` starting at `origin`
pub fn axis_lines(origin: [f32; 3], size: f32, highlight: Option<usize>) -> Vec<LineVertex> {
    const AXIS_COLORS: [[f32; 3]; 3] = [[1.0, 0.2, 0.2], [0.2, 1.0, 0.2], [0.2, 0.4, 1.0]];
    const HIGHLIGHT: [f32; 3] = [1.0, 1.0, 0.3];

    let mut lines = Vec::with_capacity(6);
    for (axis, color) in AXIS_COLORS.iter().enumerate() {
        let color = if highlight == Some(axis) { HIGHLIGHT } else { *color };
        let mut end = origin;
        end[axis] += size;

        lines.push(LineVertex { position: origin, color });
        lines.push(LineVertex { position: end, color });
    }
    lines
}

// ============================================================================
// GPU LAYOUTS
// ============================================================================

/// Vertex buffer layout for `Vertex`
pub fn vertex_buffer_layout<'a>() -> wgpu::VertexBufferLayout<'a> {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRIBUTES,
    }
}

/// Vertex buffer layout for `LineVertex`
pub fn line_vertex_buffer_layout<'a>() -> wgpu::VertexBufferLayout<'a> {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRIBUTES,
    }
}

// ============================================================================
// DIAGNOSTICS
// ============================================================================

/// Get memory statistics
pub fn mesh_stats(mesh: &MeshData) -> MeshStats {
    MeshStats {
        vertex_count: mesh.vertices.len(),
        triangle_count: mesh.indices.len() / 3,
        vertex_bytes: mesh.vertices.len() * std::mem::size_of::<Vertex>(),
        index_bytes: mesh.indices.len() * std::mem::size_of::<u32>(),
    }
}
