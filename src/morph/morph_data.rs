//! Morph data structures - Pure DOP
//!
//! NO METHODS. Just data.
//! All evaluation happens in morph_operations.rs

use cgmath::Vector3;

/// Distance along the tangent plane used to sample neighbouring points
/// when rebuilding the displaced normal
pub const NORMAL_SAMPLE_OFFSET: f32 = 0.1;

/// Index of refraction ratio used for the refraction varying
pub const DEFAULT_REFRACTION_RATIO: f32 = 1.02;

/// Color the surface blends towards near the morph point
pub const GLOW_COLOR: [f32; 3] = [1.0, 1.0, 0.0];

/// Displacement parameters shared by every vertex of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphParams {
    /// Attractor position (object space)
    pub morph: Vector3<f32>,

    /// Falloff radius around the morph point
    pub radius: f32,

    /// Lower edge of the smoothstep transition
    pub threshold_min: f32,

    /// Upper edge of the smoothstep transition
    pub threshold_max: f32,
}

/// Lighting and color inputs for the fragment stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadingParams {
    pub base_color: Vector3<f32>,

    /// Directional light vector, used as given (not normalized)
    pub light_direction: Vector3<f32>,

    pub light_color: Vector3<f32>,

    pub ambient_color: Vector3<f32>,
}

/// Output of the vertex stage for one vertex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplacedVertex {
    pub position: Vector3<f32>,
    pub normal: Vector3<f32>,

    /// Proximity factor in [0, 1] that drives the color blend
    pub distance_factor: f32,
}

impl Default for MorphParams {
    fn default() -> Self {
        Self {
            morph: Vector3::new(0.0, 0.0, 0.0),
            radius: 1.0,
            threshold_min: -0.2,
            threshold_max: 2.0,
        }
    }
}

impl Default for ShadingParams {
    fn default() -> Self {
        Self {
            base_color: Vector3::new(1.0, 0.0, 0.0),
            light_direction: Vector3::new(2.0, 3.0, 3.0),
            light_color: Vector3::new(0.93, 0.93, 0.93),
            ambient_color: Vector3::new(0.2, 0.2, 0.2),
        }
    }
}
