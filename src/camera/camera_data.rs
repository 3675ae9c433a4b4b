//! Camera data structures - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in camera_operations.rs

use cgmath::{Matrix4, Point3, Vector3};

/// Arcball orbit camera - pure data, no methods
#[derive(Debug, Clone, Copy)]
pub struct CameraData {
    /// Camera position in world space
    pub position: Point3<f32>,

    /// Orbit centre
    pub target: Point3<f32>,

    /// Camera up vector, rotated together with the position
    pub up: Vector3<f32>,

    /// Field of view (vertical, radians)
    pub fov_radians: f32,

    /// Aspect ratio (width / height)
    pub aspect_ratio: f32,

    /// Near clipping plane distance
    pub near_plane: f32,

    /// Far clipping plane distance
    pub far_plane: f32,

    /// Whether pointer drags rotate the camera
    pub rotate_enabled: bool,

    /// Multiplier on the arcball rotation angle
    pub rotate_speed: f32,

    /// Fraction of the distance removed per wheel line
    pub zoom_speed: f32,

    pub min_distance: f32,
    pub max_distance: f32,

    /// Spin deceleration after release (radians per second squared)
    pub damping_factor: f32,

    /// World-space axis of the current spin
    pub spin_axis: Vector3<f32>,

    /// Current spin speed (radians per second), 0 when at rest
    pub angular_velocity: f32,
}

/// Camera uniform buffer data for GPU
/// Must match shader layout exactly
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// View-projection matrix (4x4, column-major)
    pub view_projection_matrix: [[f32; 4]; 4],

    /// View matrix (4x4, column-major)
    pub view_matrix: [[f32; 4]; 4],

    /// Normal matrix (3x3 stored as 4x4 columns for alignment)
    pub normal_matrix: [[f32; 4]; 4],

    /// Camera position (vec3 + padding)
    pub camera_position: [f32; 4],
}

static_assertions::const_assert_eq!(std::mem::size_of::<CameraUniform>(), 208);

impl Default for CameraData {
    fn default() -> Self {
        Self {
            position: Point3::new(0.0, -4.0, 5.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov_radians: 75.0_f32.to_radians(),
            aspect_ratio: 16.0 / 9.0,
            near_plane: 0.1,
            far_plane: 1000.0,
            rotate_enabled: true,
            rotate_speed: 1.0,
            zoom_speed: 0.1,
            min_distance: 0.5,
            max_distance: 50.0,
            damping_factor: 0.01,
            spin_axis: Vector3::new(0.0, 1.0, 0.0),
            angular_velocity: 0.0,
        }
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        let identity: [[f32; 4]; 4] = Matrix4::from_scale(1.0).into();
        Self {
            view_projection_matrix: identity,
            view_matrix: identity,
            normal_matrix: identity,
            camera_position: [0.0, 0.0, 0.0, 1.0],
        }
    }
}
