//! Camera operations - Pure DOP functions
//!
//! All functions are pure: they take data, return new data, no side effects.
//! No methods, no self, just transformations.

use super::camera_data::{CameraData, CameraUniform};
use crate::config::CameraSettings;
use cgmath::{
    EuclideanSpace, InnerSpace, Matrix, Matrix3, Matrix4, Point2, Point3, Quaternion, Rad,
    Rotation, Rotation3, SquareMatrix, Vector2, Vector3, Vector4,
};

/// Maps OpenGL clip space (z in [-1, 1]) to wgpu clip space (z in [0, 1])
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Drags shorter than this produce no rotation
const MIN_ARC_ANGLE: f32 = 1e-6;

/// Releasing after holding still this long leaves no spin (seconds)
const SPIN_RELEASE_WINDOW: f32 = 0.05;

/// Upper bound on the drag and release spin speed (rad/s)
pub const MAX_ANGULAR_SPEED: f32 = 20.0;

/// Shortest time step used when measuring drag speed (seconds).
/// Batched cursor events can arrive microseconds apart.
const MIN_SAMPLE_DT: f32 = 1.0 / 120.0;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize camera from config
pub fn init_camera_from_settings(settings: &CameraSettings, aspect_ratio: f32) -> CameraData {
    let position = Point3::from(settings.position);
    let target = Point3::from(settings.target);

    CameraData {
        position,
        target,
        up: initial_up(position - target),
        fov_radians: settings.fov_degrees.to_radians(),
        aspect_ratio,
        near_plane: settings.near,
        far_plane: settings.far,
        rotate_speed: settings.rotate_speed,
        zoom_speed: settings.zoom_speed,
        min_distance: settings.min_distance,
        max_distance: settings.max_distance,
        damping_factor: settings.damping_factor,
        ..Default::default()
    }
}

// World Y up, unless the camera looks straight along Y
fn initial_up(offset: Vector3<f32>) -> Vector3<f32> {
    let y = Vector3::unit_y();
    if offset.normalize().dot(y).abs() > 0.999 {
        Vector3::unit_z()
    } else {
        y
    }
}

// ============================================================================
// VIEW/PROJECTION MATRICES
// ============================================================================

/// Build view matrix from camera data
pub fn build_view_matrix(camera: &CameraData) -> Matrix4<f32> {
    Matrix4::look_at_rh(camera.position, camera.target, camera.up)
}

/// Build projection matrix from camera data (wgpu clip space)
pub fn build_projection_matrix(camera: &CameraData) -> Matrix4<f32> {
    OPENGL_TO_WGPU_MATRIX
        * cgmath::perspective(
            Rad(camera.fov_radians),
            camera.aspect_ratio,
            camera.near_plane,
            camera.far_plane,
        )
}

/// Build the combined view-projection matrix
pub fn build_view_projection(camera: &CameraData) -> Matrix4<f32> {
    build_projection_matrix(camera) * build_view_matrix(camera)
}

/// Inverse transpose of the upper 3x3 of a model-view matrix
pub fn build_normal_matrix(model_view: &Matrix4<f32>) -> Matrix3<f32> {
    let linear = Matrix3::from_cols(
        model_view.x.truncate(),
        model_view.y.truncate(),
        model_view.z.truncate(),
    );
    linear
        .invert()
        .map(|inverse| inverse.transpose())
        .unwrap_or_else(Matrix3::identity)
}

/// Build camera uniform for GPU
pub fn build_camera_uniform(camera: &CameraData) -> CameraUniform {
    let view_matrix = build_view_matrix(camera);
    let view_projection = build_projection_matrix(camera) * view_matrix;
    let normal_matrix = Matrix4::from(build_normal_matrix(&view_matrix));

    CameraUniform {
        view_projection_matrix: view_projection.into(),
        view_matrix: view_matrix.into(),
        normal_matrix: normal_matrix.into(),
        camera_position: [camera.position.x, camera.position.y, camera.position.z, 1.0],
    }
}

// ============================================================================
// UPDATES
// ============================================================================

/// Update aspect ratio (e.g., on window resize)
pub fn update_aspect_ratio(camera: &CameraData, width: u32, height: u32) -> CameraData {
    let mut new_camera = *camera;
    if width > 0 && height > 0 {
        new_camera.aspect_ratio = width as f32 / height as f32;
    }
    new_camera
}

/// Enable or disable pointer rotation
pub fn set_rotate_enabled(camera: &CameraData, enabled: bool) -> CameraData {
    CameraData {
        rotate_enabled: enabled,
        ..*camera
    }
}

/// Distance between camera and orbit centre
pub fn camera_distance(camera: &CameraData) -> f32 {
    (camera.position - camera.target).magnitude()
}

// ============================================================================
// ARCBALL
// ============================================================================

/// Map a cursor position to the virtual unit sphere (view space:
/// x right, y up, z towards the viewer). Points outside the ball land
/// on its rim.
pub fn arcball_vector(cursor: Point2<f32>, viewport: Vector2<f32>) -> Vector3<f32> {
    let scale = viewport.x.min(viewport.y).max(1.0);
    let x = (2.0 * cursor.x - viewport.x) / scale;
    let y = (viewport.y - 2.0 * cursor.y) / scale;

    let d2 = x * x + y * y;
    if d2 <= 1.0 {
        Vector3::new(x, y, (1.0 - d2).sqrt())
    } else {
        Vector3::new(x, y, 0.0).normalize()
    }
}

/// Orbit the camera (position and up) about a world axis through the target
pub fn orbit(camera: &CameraData, axis: Vector3<f32>, angle: f32) -> CameraData {
    let rotation = Quaternion::from_axis_angle(axis.normalize(), Rad(angle));
    let offset = rotation.rotate_vector(camera.position - camera.target);

    CameraData {
        position: camera.target + offset,
        up: rotation.rotate_vector(camera.up).normalize(),
        ..*camera
    }
}

/// Rotate the camera for a drag from `from` to `to` on the arcball.
/// `dt` is the time since the previous drag sample, used for inertia.
pub fn rotate_arcball(
    camera: &CameraData,
    from: Vector3<f32>,
    to: Vector3<f32>,
    dt: f32,
) -> CameraData {
    if !camera.rotate_enabled {
        return *camera;
    }

    let angle = from.dot(to).clamp(-1.0, 1.0).acos() * camera.rotate_speed;
    let view_axis = from.cross(to);
    if angle < MIN_ARC_ANGLE || view_axis.magnitude2() < f32::EPSILON {
        return *camera;
    }

    // View space to world space
    let back = (camera.position - camera.target).normalize();
    let right = camera.up.cross(back).normalize();
    let up = back.cross(right);
    let axis = (right * view_axis.x + up * view_axis.y + back * view_axis.z).normalize();

    // The scene follows the cursor, so the camera turns the other way
    let mut rotated = orbit(camera, axis, -angle);
    rotated.spin_axis = axis;
    rotated.angular_velocity = if dt > 0.0 {
        let sample = angle / dt.max(MIN_SAMPLE_DT);
        // Average with the previous sample
        let speed = if camera.angular_velocity > 0.0 {
            0.5 * (sample + camera.angular_velocity)
        } else {
            sample
        };
        speed.min(MAX_ANGULAR_SPEED)
    } else {
        0.0
    };
    rotated
}

/// Stop any spin (pointer pressed)
pub fn stop_spin(camera: &CameraData) -> CameraData {
    CameraData {
        angular_velocity: 0.0,
        ..*camera
    }
}

/// Pointer released: keep spinning only if the pointer was still moving
pub fn release_arcball(camera: &CameraData, idle_seconds: f32) -> CameraData {
    if idle_seconds > SPIN_RELEASE_WINDOW {
        stop_spin(camera)
    } else {
        *camera
    }
}

/// Advance the post-release spin by `dt` seconds
pub fn apply_inertia(camera: &CameraData, dt: f32) -> CameraData {
    if camera.angular_velocity <= 0.0 || dt <= 0.0 {
        return *camera;
    }

    let mut result = orbit(camera, camera.spin_axis, -camera.angular_velocity * dt);
    result.angular_velocity = (camera.angular_velocity - camera.damping_factor * dt).max(0.0);
    result
}

// ============================================================================
// ZOOM
// ============================================================================

/// Dolly towards (positive `lines`) or away from the target
pub fn zoom(camera: &CameraData, lines: f32) -> CameraData {
    let offset = camera.position - camera.target;
    let distance = offset.magnitude();
    let factor = (1.0 - camera.zoom_speed).max(0.01).powf(lines);
    let new_distance = (distance * factor).clamp(camera.min_distance, camera.max_distance);

    CameraData {
        position: camera.target + offset.normalize() * new_distance,
        ..*camera
    }
}

// ============================================================================
// PICKING
// ============================================================================

/// World-space ray through a cursor position
pub fn screen_ray(
    camera: &CameraData,
    cursor: Point2<f32>,
    viewport: Vector2<f32>,
) -> (Point3<f32>, Vector3<f32>) {
    let ndc_x = 2.0 * cursor.x / viewport.x.max(1.0) - 1.0;
    let ndc_y = 1.0 - 2.0 * cursor.y / viewport.y.max(1.0);

    let inverse = match build_view_projection(camera).invert() {
        Some(inverse) => inverse,
        None => {
            let forward = (camera.target - camera.position).normalize();
            return (camera.position, forward);
        }
    };

    let unproject = |z: f32| {
        let p = inverse * Vector4::new(ndc_x, ndc_y, z, 1.0);
        Point3::from_vec(p.truncate() / p.w)
    };
    let near = unproject(0.0);
    let far = unproject(1.0);

    (near, (far - near).normalize())
}

/// Log camera context for debugging
pub fn log_camera_context(camera: &CameraData) {
    log::debug!(
        "[Camera] Position: ({:.2}, {:.2}, {:.2}) | Distance: {:.2} | Rotate: {} | Spin: {:.3}rad/s",
        camera.position.x,
        camera.position.y,
        camera.position.z,
        camera_distance(camera),
        camera.rotate_enabled,
        camera.angular_velocity
    );
}
