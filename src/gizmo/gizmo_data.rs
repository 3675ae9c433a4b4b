//! Gizmo data structures - Pure DOP
//!
//! NO METHODS beyond trivial accessors. Picking and dragging happen in
//! gizmo_operations.rs

use cgmath::{Point3, Vector3};

/// World axis a handle is constrained to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GizmoAxis {
    X,
    Y,
    Z,
}

impl GizmoAxis {
    pub const ALL: [GizmoAxis; 3] = [GizmoAxis::X, GizmoAxis::Y, GizmoAxis::Z];

    pub fn index(self) -> usize {
        match self {
            GizmoAxis::X => 0,
            GizmoAxis::Y => 1,
            GizmoAxis::Z => 2,
        }
    }

    pub fn direction(self) -> Vector3<f32> {
        match self {
            GizmoAxis::X => Vector3::unit_x(),
            GizmoAxis::Y => Vector3::unit_y(),
            GizmoAxis::Z => Vector3::unit_z(),
        }
    }
}

/// Part of the gizmo under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GizmoHandle {
    /// Free move in the plane facing the camera
    Center,

    /// Move along one world axis
    Axis(GizmoAxis),
}

/// Active drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub handle: GizmoHandle,

    /// Position minus the grabbed point, so the gizmo does not jump
    pub grab_offset: Vector3<f32>,

    /// Drag plane normal for centre drags, fixed when the drag starts
    pub plane_normal: Vector3<f32>,
}

/// Translate gizmo controlling the morph point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoData {
    /// Current morph point (world space)
    pub position: Point3<f32>,

    /// Axis handle length (world units)
    pub size: f32,

    /// Grab tolerance (pixels)
    pub pick_radius_px: f32,

    pub drag: Option<DragState>,
    pub hovered: Option<GizmoHandle>,
}
