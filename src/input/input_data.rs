//! Input data structures - Pure DOP
//!
//! NO METHODS. Just data.
//! Event handling happens in input_operations.rs

use cgmath::Point2;
use std::time::Instant;
pub use winit::keyboard::KeyCode;

/// What a held left button is currently driving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragMode {
    #[default]
    None,
    Orbit,
    Gizmo,
}

/// Window events the demo reacts to, stripped of winit details
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    CursorMoved(Point2<f32>),
    LeftButtonDown,
    LeftButtonUp,

    /// Wheel lines, positive away from the user
    Wheel(f32),
}

/// State changes requested by input, applied by the app between frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    OrbitChanged(bool),
    RotateCamera {
        from: Point2<f32>,
        to: Point2<f32>,
        dt: f32,
    },
    StopSpin,
    ReleaseCamera {
        idle_seconds: f32,
    },
    Zoom(f32),
    HoverGizmo(Point2<f32>),
    BeginGizmoDrag(Point2<f32>),
    DragGizmo(Point2<f32>),
    EndGizmoDrag,
    AdjustThresholdMin(f32),
    AdjustThresholdMax(f32),
    ResetThresholds,
    Exit,
}

/// Keyboard and pointer state
#[derive(Debug, Clone)]
pub struct InputState {
    pub cursor: Point2<f32>,

    /// What the held left button drives; `None` while it is up
    pub drag_mode: DragMode,

    /// Whether pointer drags orbit the camera instead of moving the gizmo
    pub orbit_enabled: bool,

    /// Orbit switches off at this time after startup
    pub startup_deadline: Option<Instant>,

    /// Time of the last orbit drag sample
    pub last_motion: Option<Instant>,
}
