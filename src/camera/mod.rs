/// Camera Module - Data-Oriented Programming (DOP) style
///
/// This module follows pure DOP principles:
/// - camera_data.rs: Pure data structures with NO methods
/// - camera_operations.rs: Pure functions that operate on data
///
/// Arcball orbit camera: rotate by dragging (when enabled), zoom with the
/// wheel, spin on after release. No panning.

pub mod camera_data;
pub mod camera_operations;

// Re-export data structures
pub use camera_data::{CameraData, CameraUniform};

// Re-export all operations
pub use camera_operations::{
    // Initialization
    init_camera_from_settings,

    // View/projection
    build_camera_uniform,
    build_normal_matrix,
    build_projection_matrix,
    build_view_matrix,
    build_view_projection,
    OPENGL_TO_WGPU_MATRIX,

    // Updates
    camera_distance,
    set_rotate_enabled,
    update_aspect_ratio,

    // Arcball
    apply_inertia,
    arcball_vector,
    orbit,
    release_arcball,
    rotate_arcball,
    stop_spin,
    MAX_ANGULAR_SPEED,

    // Zoom
    zoom,

    // Picking
    screen_ray,

    // Diagnostics
    log_camera_context,
};
