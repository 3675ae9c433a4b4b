//! Configuration data structures - Pure DOP
//!
//! NO METHODS besides defaults. Loading, validation and the live
//! threshold setters live in config_operations.rs

use serde::{Deserialize, Serialize};

/// Allowed range for the lower displacement threshold
pub const THRESHOLD_MIN_RANGE: (f32, f32) = (-1.0, 1.0);

/// Allowed range for the upper displacement threshold
pub const THRESHOLD_MAX_RANGE: (f32, f32) = (-1.0, 4.0);

/// Complete demo configuration, loaded from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub window: WindowSettings,
    pub camera: CameraSettings,
    pub torus: TorusSettings,
    pub marker: MarkerSettings,
    pub shading: ShadingSettings,
    pub input: InputSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

/// Arcball camera setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,

    /// Deceleration of the post-release spin (radians per second squared)
    pub damping_factor: f32,

    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

/// Torus geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorusSettings {
    pub radius: f32,
    pub tube: f32,
    pub radial_segments: u32,
    pub tubular_segments: u32,
}

/// Morph point marker and its gizmo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerSettings {
    /// Initial morph point
    pub position: [f32; 3],
    pub radius: f32,
    pub segments: u32,
    pub rings: u32,

    /// Length of the gizmo axis handles (world units)
    pub gizmo_size: f32,

    /// Screen distance within which a handle is grabbed (pixels)
    pub pick_radius_px: f32,
}

/// Displacement and lighting inputs of the morph shader.
/// Thresholds are the only values changed while running.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadingSettings {
    pub threshold_min: f32,
    pub threshold_max: f32,
    pub radius: f32,
    pub base_color: [f32; 3],
    pub dir_light_direction: [f32; 3],
    pub dir_light_color: [f32; 3],
    pub ambient_color: [f32; 3],
    pub refraction_ratio: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Orbit stays enabled this long after startup (milliseconds)
    pub startup_orbit_ms: u64,

    /// Threshold change per key press
    pub threshold_step: f32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Morph Torus - press R to rotate".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: [0.0, -4.0, 5.0],
            target: [0.0, 0.0, 0.0],
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            damping_factor: 0.01,
            rotate_speed: 1.0,
            zoom_speed: 0.1,
            min_distance: 0.5,
            max_distance: 50.0,
        }
    }
}

impl Default for TorusSettings {
    fn default() -> Self {
        Self {
            radius: 1.0,
            tube: 0.25,
            radial_segments: 120,
            tubular_segments: 120,
        }
    }
}

impl Default for MarkerSettings {
    fn default() -> Self {
        Self {
            position: [-1.0, 0.4, 0.4],
            radius: 0.01,
            segments: 32,
            rings: 32,
            gizmo_size: 0.3,
            pick_radius_px: 12.0,
        }
    }
}

impl Default for ShadingSettings {
    fn default() -> Self {
        Self {
            threshold_min: -0.2,
            threshold_max: 2.0,
            radius: 1.0,
            base_color: [1.0, 0.0, 0.0],
            dir_light_direction: [2.0, 3.0, 3.0],
            dir_light_color: [0.93, 0.93, 0.93],
            ambient_color: [0.2, 0.2, 0.2],
            refraction_ratio: crate::morph::DEFAULT_REFRACTION_RATIO,
        }
    }
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            startup_orbit_ms: 200,
            threshold_step: 0.05,
        }
    }
}
