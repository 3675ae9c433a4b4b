//! App data - everything the event loop mutates between frames
//!
//! NO METHODS. Event routing and frame assembly live in app_operations.rs

use crate::camera::{CameraData, CameraUniform};
use crate::config::{DemoConfig, ShadingSettings};
use crate::gizmo::GizmoData;
use crate::input::InputState;
use crate::mesh::LineVertex;
use crate::renderer::{MarkerUniform, MorphUniform};
use cgmath::Vector2;
use std::time::Instant;

/// CPU-side demo state
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: DemoConfig,

    /// Committed shading values; thresholds change only through the setters
    pub shading: ShadingSettings,

    pub camera: CameraData,
    pub gizmo: GizmoData,
    pub input: InputState,

    /// Window size in physical pixels
    pub viewport: Vector2<f32>,

    pub last_frame: Instant,
    pub exit_requested: bool,
}

/// Values uploaded to the GPU for one frame
#[derive(Debug, Clone)]
pub struct FrameUniforms {
    pub camera: CameraUniform,
    pub morph: MorphUniform,
    pub marker: MarkerUniform,
    pub gizmo_lines: Vec<LineVertex>,
}
