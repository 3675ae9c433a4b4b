//! Gizmo Module - translate handle for the morph point
//!
//! - gizmo_data.rs: handle and drag state
//! - gizmo_operations.rs: picking, drag geometry, line vertices

pub mod gizmo_data;
pub mod gizmo_operations;

pub use gizmo_data::{DragState, GizmoAxis, GizmoData, GizmoHandle};

pub use gizmo_operations::{
    // Initialization
    init_gizmo,
    morph_point,

    // Geometry
    closest_point_on_line,
    distance_to_segment,
    project_to_screen,
    ray_plane_intersection,

    // Interaction
    begin_drag,
    end_drag,
    hover,
    pick_handle,
    update_drag,

    // Rendering
    gizmo_line_vertices,
};
