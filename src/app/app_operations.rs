//! App operations - event routing, frame updates and the winit loop
//!
//! Input events become `InputAction`s, which are applied to the camera,
//! the gizmo and the committed shading values between frames. Each redraw
//! packs the latest values into uniforms.

use super::app_data::{AppState, FrameUniforms};
use crate::camera::{
    apply_inertia, arcball_vector, build_camera_uniform, init_camera_from_settings,
    log_camera_context, release_arcball, rotate_arcball, set_rotate_enabled, stop_spin,
    update_aspect_ratio, zoom,
};
use crate::config::{adjust_threshold_max, adjust_threshold_min, reset_thresholds, DemoConfig};
use crate::error::{DemoError, DemoResult};
use crate::gizmo::{
    begin_drag, end_drag, gizmo_line_vertices, hover, init_gizmo, morph_point, pick_handle,
    update_drag,
};
use crate::input::{
    handle_input_event, init_input_state, translate_window_event, update_orbit_timer, InputAction,
    InputEvent,
};
use crate::renderer::{
    build_marker_uniform, build_morph_uniform, handle_surface_error, init_renderer, render_frame,
    resize, write_frame_uniforms,
};
use cgmath::Vector2;
use std::sync::Arc;
use std::time::Instant;
use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

/// Longest frame step fed to the camera inertia (seconds)
const MAX_FRAME_DT: f32 = 0.1;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Build the demo state for a window of the given size
pub fn init_app_state(config: DemoConfig, width: u32, height: u32, now: Instant) -> AppState {
    let width = width.max(1);
    let height = height.max(1);

    let input = init_input_state(&config.input, now);
    let camera = init_camera_from_settings(&config.camera, width as f32 / height as f32);
    let camera = set_rotate_enabled(&camera, input.orbit_enabled);
    let gizmo = init_gizmo(&config.marker);

    AppState {
        shading: config.shading,
        camera,
        gizmo,
        input,
        viewport: Vector2::new(width as f32, height as f32),
        last_frame: now,
        exit_requested: false,
        config,
    }
}

// ============================================================================
// EVENT ROUTING
// ============================================================================

/// Apply one input action. Returns true when the thresholds changed.
pub fn apply_action(state: &mut AppState, action: InputAction) -> bool {
    let before = state.shading;

    match action {
        InputAction::OrbitChanged(enabled) => {
            state.camera = set_rotate_enabled(&state.camera, enabled);
        }
        InputAction::RotateCamera { from, to, dt } => {
            let from = arcball_vector(from, state.viewport);
            let to = arcball_vector(to, state.viewport);
            state.camera = rotate_arcball(&state.camera, from, to, dt);
        }
        InputAction::StopSpin => state.camera = stop_spin(&state.camera),
        InputAction::ReleaseCamera { idle_seconds } => {
            state.camera = release_arcball(&state.camera, idle_seconds);
            log_camera_context(&state.camera);
        }
        InputAction::Zoom(lines) => state.camera = zoom(&state.camera, lines),
        InputAction::HoverGizmo(cursor) => {
            let handle = pick_handle(&state.gizmo, &state.camera, cursor, state.viewport);
            state.gizmo = hover(&state.gizmo, handle);
        }
        InputAction::BeginGizmoDrag(cursor) => {
            if let Some(handle) = pick_handle(&state.gizmo, &state.camera, cursor, state.viewport)
            {
                state.gizmo = begin_drag(&state.gizmo, handle, &state.camera, cursor, state.viewport);
            }
        }
        InputAction::DragGizmo(cursor) => {
            state.gizmo = update_drag(&state.gizmo, &state.camera, cursor, state.viewport);
        }
        InputAction::EndGizmoDrag => state.gizmo = end_drag(&state.gizmo),
        InputAction::AdjustThresholdMin(delta) => {
            state.shading = adjust_threshold_min(&state.shading, delta);
        }
        InputAction::AdjustThresholdMax(delta) => {
            state.shading = adjust_threshold_max(&state.shading, delta);
        }
        InputAction::ResetThresholds => state.shading = reset_thresholds(&state.shading),
        InputAction::Exit => state.exit_requested = true,
    }

    let changed = before.threshold_min != state.shading.threshold_min
        || before.threshold_max != state.shading.threshold_max;
    if changed {
        log::info!(
            "[App] Thresholds now min={:.3} max={:.3}",
            state.shading.threshold_min,
            state.shading.threshold_max
        );
    }
    changed
}

/// Route one input event. Returns true when the thresholds changed.
pub fn process_input(state: &mut AppState, event: InputEvent, now: Instant) -> bool {
    let actions = handle_input_event(&mut state.input, event, &state.config.input, now);
    let mut changed = false;
    for action in actions {
        changed |= apply_action(state, action);
    }
    changed
}

// ============================================================================
// FRAME UPDATES
// ============================================================================

/// Track a new window size
pub fn resize_viewport(state: &mut AppState, width: u32, height: u32) {
    if width == 0 || height == 0 {
        return;
    }
    state.viewport = Vector2::new(width as f32, height as f32);
    state.camera = update_aspect_ratio(&state.camera, width, height);
}

/// Advance timers and camera inertia to `now`
pub fn advance_frame(state: &mut AppState, now: Instant) {
    let dt = now
        .saturating_duration_since(state.last_frame)
        .as_secs_f32()
        .min(MAX_FRAME_DT);
    state.last_frame = now;

    if let Some(action) = update_orbit_timer(&mut state.input, now) {
        apply_action(state, action);
    }
    state.camera = apply_inertia(&state.camera, dt);
}

/// Uniform values for the current state; the morph point is the gizmo position
pub fn frame_uniforms(state: &AppState) -> FrameUniforms {
    let morph = morph_point(&state.gizmo);
    FrameUniforms {
        camera: build_camera_uniform(&state.camera),
        morph: build_morph_uniform(&state.shading, morph),
        marker: build_marker_uniform(morph),
        gizmo_lines: gizmo_line_vertices(&state.gizmo),
    }
}

/// Window title with the live thresholds
pub fn window_title(state: &AppState) -> String {
    format!(
        "{} | min {:.2}  max {:.2}",
        state.config.window.title, state.shading.threshold_min, state.shading.threshold_max
    )
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Open the window and run until it is closed
pub fn run(config: DemoConfig) -> DemoResult<()> {
    log::info!("[App::run] Creating event loop");
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window.title.as_str())
            .with_inner_size(PhysicalSize::new(config.window.width, config.window.height))
            .build(&event_loop)?,
    );

    let mut renderer = pollster::block_on(init_renderer(window.clone(), &config))?;
    let size = window.inner_size();
    let mut state = init_app_state(config, size.width, size.height, Instant::now());
    window.set_title(&window_title(&state));
    log::info!("[App::run] Entering event loop");

    let mut fatal: Option<DemoError> = None;
    let fatal_slot = &mut fatal;

    event_loop.run(move |event, elwt| match event {
        Event::AboutToWait => window.request_redraw(),
        Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
            WindowEvent::CloseRequested => {
                log::info!("[App::run] Close requested");
                elwt.exit();
            }
            WindowEvent::Resized(size) => {
                resize(&mut renderer, size.width, size.height);
                resize_viewport(&mut state, size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                advance_frame(&mut state, Instant::now());
                let frame = frame_uniforms(&state);
                write_frame_uniforms(
                    &mut renderer,
                    &frame.camera,
                    &frame.morph,
                    &frame.marker,
                    &frame.gizmo_lines,
                );

                if let Err(error) = render_frame(&renderer) {
                    if let Err(error) = handle_surface_error(&mut renderer, error) {
                        *fatal_slot = Some(error);
                        elwt.exit();
                    }
                }
            }
            other => {
                let Some(input) = translate_window_event(&other) else {
                    return;
                };
                if process_input(&mut state, input, Instant::now()) {
                    window.set_title(&window_title(&state));
                }
                if state.exit_requested {
                    log::info!("[App::run] Exit requested");
                    elwt.exit();
                }
            }
        },
        _ => {}
    })?;

    match fatal {
        Some(error) => Err(error),
        None => {
            log::info!("[App::run] Event loop finished");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;
    use cgmath::{InnerSpace, Point2, Point3};
    use std::time::Duration;

    fn setup() -> (AppState, Instant) {
        let now = Instant::now();
        (init_app_state(DemoConfig::default(), 800, 800, now), now)
    }

    #[test]
    fn test_init_uses_config() {
        let (state, _) = setup();
        assert!(state.camera.rotate_enabled);
        assert_eq!(state.viewport, Vector2::new(800.0, 800.0));
        assert_eq!(state.gizmo.position, Point3::new(-1.0, 0.4, 0.4));
        assert!((state.camera.aspect_ratio - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_startup_window_disables_camera_rotation() {
        let (mut state, now) = setup();
        advance_frame(&mut state, now + Duration::from_millis(50));
        assert!(state.camera.rotate_enabled);

        advance_frame(&mut state, now + Duration::from_millis(250));
        assert!(!state.camera.rotate_enabled);
        assert!(!state.input.orbit_enabled);
    }

    #[test]
    fn test_threshold_keys_commit_through_setters() {
        let (mut state, now) = setup();

        assert!(process_input(&mut state, InputEvent::KeyDown(KeyCode::BracketRight), now));
        assert!((state.shading.threshold_min - -0.15).abs() < 1e-6);

        assert!(process_input(&mut state, InputEvent::KeyDown(KeyCode::Minus), now));
        assert!((state.shading.threshold_max - 1.95).abs() < 1e-6);

        assert!(process_input(&mut state, InputEvent::KeyDown(KeyCode::Digit0), now));
        assert_eq!(state.shading.threshold_min, -0.2);
        assert_eq!(state.shading.threshold_max, 2.0);

        // Already at the default, nothing to report
        assert!(!process_input(&mut state, InputEvent::KeyDown(KeyCode::Digit0), now));
    }

    #[test]
    fn test_title_shows_thresholds() {
        let (state, _) = setup();
        assert_eq!(
            window_title(&state),
            "Morph Torus - press R to rotate | min -0.20  max 2.00"
        );
    }

    #[test]
    fn test_escape_requests_exit() {
        let (mut state, now) = setup();
        process_input(&mut state, InputEvent::KeyDown(KeyCode::Escape), now);
        assert!(state.exit_requested);
    }

    #[test]
    fn test_gizmo_drag_moves_morph_point() {
        let mut config = DemoConfig::default();
        config.marker.position = [0.0, 0.0, 0.0];
        let now = Instant::now();
        let mut state = init_app_state(config, 800, 800, now);
        advance_frame(&mut state, now + Duration::from_secs(1));
        assert!(!state.camera.rotate_enabled);

        // Target sits at the viewport centre
        process_input(&mut state, InputEvent::CursorMoved(Point2::new(402.0, 401.0)), now);
        process_input(&mut state, InputEvent::LeftButtonDown, now);
        assert!(state.gizmo.drag.is_some());

        process_input(&mut state, InputEvent::CursorMoved(Point2::new(460.0, 401.0)), now);
        process_input(&mut state, InputEvent::LeftButtonUp, now);
        assert!(state.gizmo.drag.is_none());

        let moved = morph_point(&state.gizmo);
        assert!(moved.magnitude() > 0.1);
        assert_eq!(frame_uniforms(&state).marker.offset[..3], [moved.x, moved.y, moved.z]);
    }

    #[test]
    fn test_orbit_drag_rotates_camera_and_keeps_distance() {
        let (mut state, now) = setup();
        let before = state.camera.position;
        let distance = (before - state.camera.target).magnitude();

        process_input(&mut state, InputEvent::CursorMoved(Point2::new(400.0, 400.0)), now);
        process_input(&mut state, InputEvent::LeftButtonDown, now);
        process_input(
            &mut state,
            InputEvent::CursorMoved(Point2::new(480.0, 400.0)),
            now + Duration::from_millis(16),
        );

        assert!((state.camera.position - before).magnitude() > 1e-3);
        let after = (state.camera.position - state.camera.target).magnitude();
        assert!((after - distance).abs() < 1e-4);
    }

    #[test]
    fn test_frame_uniforms_follow_state() {
        let (state, _) = setup();
        let frame = frame_uniforms(&state);
        assert_eq!(frame.morph.morph, [-1.0, 0.4, 0.4, 1.0]);
        assert_eq!(frame.gizmo_lines.len(), 6);
        assert_eq!(frame.camera.camera_position, [0.0, -4.0, 5.0, 1.0]);
    }
}
