//! Gizmo operations - Pure DOP functions
//!
//! Screen-space picking plus ray geometry for free and axis drags.

use super::gizmo_data::{DragState, GizmoAxis, GizmoData, GizmoHandle};
use crate::camera::{build_view_projection, screen_ray, CameraData};
use crate::config::MarkerSettings;
use crate::mesh::{axis_lines, LineVertex};
use cgmath::{EuclideanSpace, InnerSpace, Matrix4, Point2, Point3, Vector2, Vector3, Vector4};

const PARALLEL_EPSILON: f32 = 1e-6;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Create the gizmo at the configured morph point
pub fn init_gizmo(settings: &MarkerSettings) -> GizmoData {
    GizmoData {
        position: Point3::from(settings.position),
        size: settings.gizmo_size,
        pick_radius_px: settings.pick_radius_px,
        drag: None,
        hovered: None,
    }
}

/// Morph point as a vector, ready for the shader uniforms
pub fn morph_point(gizmo: &GizmoData) -> Vector3<f32> {
    gizmo.position.to_vec()
}

// ============================================================================
// GEOMETRY
// ============================================================================

/// Project a world point to pixel coordinates (origin top-left).
/// `None` for points behind the camera.
pub fn project_to_screen(
    point: Point3<f32>,
    view_projection: &Matrix4<f32>,
    viewport: Vector2<f32>,
) -> Option<Point2<f32>> {
    let clip = view_projection * Vector4::new(point.x, point.y, point.z, 1.0);
    if clip.w <= PARALLEL_EPSILON {
        return None;
    }
    let ndc_x = clip.x / clip.w;
    let ndc_y = clip.y / clip.w;

    Some(Point2::new(
        (ndc_x + 1.0) * 0.5 * viewport.x,
        (1.0 - ndc_y) * 0.5 * viewport.y,
    ))
}

/// Distance from `p` to the segment `a`-`b` in pixels
pub fn distance_to_segment(p: Point2<f32>, a: Point2<f32>, b: Point2<f32>) -> f32 {
    let ab = b - a;
    let len2 = ab.magnitude2();
    if len2 < PARALLEL_EPSILON {
        return (p - a).magnitude();
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    (p - (a + ab * t)).magnitude()
}

/// Intersection of a ray with a plane, if it hits in front of the origin
pub fn ray_plane_intersection(
    origin: Point3<f32>,
    direction: Vector3<f32>,
    plane_point: Point3<f32>,
    plane_normal: Vector3<f32>,
) -> Option<Point3<f32>> {
    let denom = direction.dot(plane_normal);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }
    let t = (plane_point - origin).dot(plane_normal) / denom;
    if t < 0.0 {
        return None;
    }
    Some(origin + direction * t)
}

/// Point on the line `line_point + s * line_dir` closest to a ray.
/// `None` when the two are parallel.
pub fn closest_point_on_line(
    line_point: Point3<f32>,
    line_dir: Vector3<f32>,
    ray_origin: Point3<f32>,
    ray_dir: Vector3<f32>,
) -> Option<Point3<f32>> {
    let w0 = line_point - ray_origin;
    let a = line_dir.dot(line_dir);
    let b = line_dir.dot(ray_dir);
    let c = ray_dir.dot(ray_dir);
    let d = line_dir.dot(w0);
    let e = ray_dir.dot(w0);

    let denom = a * c - b * b;
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }
    let s = (b * e - c * d) / denom;
    Some(line_point + line_dir * s)
}

// Point under the cursor for a handle, before the grab offset
fn handle_hit(
    gizmo: &GizmoData,
    handle: GizmoHandle,
    plane_normal: Vector3<f32>,
    camera: &CameraData,
    cursor: Point2<f32>,
    viewport: Vector2<f32>,
) -> Option<Point3<f32>> {
    let (origin, direction) = screen_ray(camera, cursor, viewport);
    match handle {
        GizmoHandle::Center => {
            ray_plane_intersection(origin, direction, gizmo.position, plane_normal)
        }
        GizmoHandle::Axis(axis) => {
            closest_point_on_line(gizmo.position, axis.direction(), origin, direction)
        }
    }
}

// ============================================================================
// PICKING
// ============================================================================

/// Handle under the cursor. The centre wins over the axes.
pub fn pick_handle(
    gizmo: &GizmoData,
    camera: &CameraData,
    cursor: Point2<f32>,
    viewport: Vector2<f32>,
) -> Option<GizmoHandle> {
    let view_projection = build_view_projection(camera);
    let center = project_to_screen(gizmo.position, &view_projection, viewport)?;

    if (cursor - center).magnitude() <= gizmo.pick_radius_px {
        return Some(GizmoHandle::Center);
    }

    GizmoAxis::ALL
        .iter()
        .filter_map(|&axis| {
            let end = gizmo.position + axis.direction() * gizmo.size;
            let end = project_to_screen(end, &view_projection, viewport)?;
            let distance = distance_to_segment(cursor, center, end);
            (distance <= gizmo.pick_radius_px).then_some((axis, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(axis, _)| GizmoHandle::Axis(axis))
}

/// Update the hover highlight
pub fn hover(gizmo: &GizmoData, handle: Option<GizmoHandle>) -> GizmoData {
    GizmoData {
        hovered: handle,
        ..*gizmo
    }
}

// ============================================================================
// DRAGGING
// ============================================================================

/// Start dragging `handle` from the cursor position
pub fn begin_drag(
    gizmo: &GizmoData,
    handle: GizmoHandle,
    camera: &CameraData,
    cursor: Point2<f32>,
    viewport: Vector2<f32>,
) -> GizmoData {
    let plane_normal = (camera.position - camera.target).normalize();
    let grab_offset = handle_hit(gizmo, handle, plane_normal, camera, cursor, viewport)
        .map(|hit| gizmo.position - hit)
        .unwrap_or_else(|| Vector3::new(0.0, 0.0, 0.0));

    log::debug!("[Gizmo] Begin drag {:?} at {:?}", handle, gizmo.position);

    GizmoData {
        drag: Some(DragState {
            handle,
            grab_offset,
            plane_normal,
        }),
        hovered: Some(handle),
        ..*gizmo
    }
}

/// Move the gizmo to follow the cursor. Keeps the position when the
/// cursor ray misses the drag plane or runs parallel to the axis.
pub fn update_drag(
    gizmo: &GizmoData,
    camera: &CameraData,
    cursor: Point2<f32>,
    viewport: Vector2<f32>,
) -> GizmoData {
    let Some(drag) = gizmo.drag else {
        return *gizmo;
    };

    match handle_hit(gizmo, drag.handle, drag.plane_normal, camera, cursor, viewport) {
        Some(hit) => GizmoData {
            position: hit + drag.grab_offset,
            ..*gizmo
        },
        None => *gizmo,
    }
}

/// Finish the current drag
pub fn end_drag(gizmo: &GizmoData) -> GizmoData {
    if gizmo.drag.is_some() {
        log::debug!(
            "[Gizmo] Morph point now ({:.3}, {:.3}, {:.3})",
            gizmo.position.x,
            gizmo.position.y,
            gizmo.position.z
        );
    }
    GizmoData {
        drag: None,
        ..*gizmo
    }
}

// ============================================================================
// RENDERING
// ============================================================================

/// Axis line vertices, highlighting the dragged or hovered axis
pub fn gizmo_line_vertices(gizmo: &GizmoData) -> Vec<LineVertex> {
    let active = gizmo.drag.map(|d| d.handle).or(gizmo.hovered);
    let highlight = match active {
        Some(GizmoHandle::Axis(axis)) => Some(axis.index()),
        _ => None,
    };
    axis_lines(gizmo.position.into(), gizmo.size, highlight)
}
