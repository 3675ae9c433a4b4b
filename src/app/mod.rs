//! App Module - ties input, camera, gizmo and renderer into the winit loop
//!
//! - app_data.rs: per-window demo state
//! - app_operations.rs: event routing, frame updates, `run`

pub mod app_data;
pub mod app_operations;

pub use app_data::{AppState, FrameUniforms};
pub use app_operations::{
    advance_frame, apply_action, frame_uniforms, init_app_state, process_input, resize_viewport,
    run, window_title,
};
