//! Input operations - event translation and routing
//!
//! Orbit is on for a short window after startup, on while `R` is held,
//! and off after any key is released. While it is off, left drags move
//! the gizmo instead of the camera.

use super::input_data::{DragMode, InputAction, InputEvent, InputState, KeyCode};
use crate::config::InputSettings;
use cgmath::Point2;
use std::time::{Duration, Instant};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::PhysicalKey;

/// Pixels of trackpad scroll that count as one wheel line
const PIXELS_PER_LINE: f32 = 50.0;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Fresh input state with orbit enabled until the startup window closes
pub fn init_input_state(settings: &InputSettings, now: Instant) -> InputState {
    InputState {
        cursor: Point2::new(0.0, 0.0),
        drag_mode: DragMode::None,
        orbit_enabled: true,
        startup_deadline: Some(now + Duration::from_millis(settings.startup_orbit_ms)),
        last_motion: None,
    }
}

// ============================================================================
// TRANSLATION
// ============================================================================

/// Convert a winit window event into an input event
pub fn translate_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::KeyboardInput { event, .. } => {
            let PhysicalKey::Code(code) = event.physical_key else {
                return None;
            };
            match event.state {
                ElementState::Pressed => Some(InputEvent::KeyDown(code)),
                ElementState::Released => Some(InputEvent::KeyUp(code)),
            }
        }
        WindowEvent::CursorMoved { position, .. } => Some(InputEvent::CursorMoved(Point2::new(
            position.x as f32,
            position.y as f32,
        ))),
        WindowEvent::MouseInput {
            state,
            button: MouseButton::Left,
            ..
        } => match state {
            ElementState::Pressed => Some(InputEvent::LeftButtonDown),
            ElementState::Released => Some(InputEvent::LeftButtonUp),
        },
        WindowEvent::MouseWheel { delta, .. } => {
            let lines = match delta {
                MouseScrollDelta::LineDelta(_, y) => *y,
                MouseScrollDelta::PixelDelta(position) => position.y as f32 / PIXELS_PER_LINE,
            };
            Some(InputEvent::Wheel(lines))
        }
        _ => None,
    }
}

// ============================================================================
// ROUTING
// ============================================================================

/// Close the startup orbit window once its deadline has passed
pub fn update_orbit_timer(state: &mut InputState, now: Instant) -> Option<InputAction> {
    let deadline = state.startup_deadline?;
    if now < deadline {
        return None;
    }

    state.startup_deadline = None;
    set_orbit(state, false)
}

fn set_orbit(state: &mut InputState, enabled: bool) -> Option<InputAction> {
    if state.orbit_enabled == enabled {
        return None;
    }
    state.orbit_enabled = enabled;
    log::debug!("[Input] Orbit {}", if enabled { "enabled" } else { "disabled" });
    Some(InputAction::OrbitChanged(enabled))
}

fn key_action(code: KeyCode, settings: &InputSettings) -> Option<InputAction> {
    let step = settings.threshold_step;
    match code {
        KeyCode::BracketLeft => Some(InputAction::AdjustThresholdMin(-step)),
        KeyCode::BracketRight => Some(InputAction::AdjustThresholdMin(step)),
        KeyCode::Minus => Some(InputAction::AdjustThresholdMax(-step)),
        KeyCode::Equal => Some(InputAction::AdjustThresholdMax(step)),
        KeyCode::Digit0 => Some(InputAction::ResetThresholds),
        KeyCode::Escape => Some(InputAction::Exit),
        _ => None,
    }
}

/// Update input state for one event and return the resulting actions
pub fn handle_input_event(
    state: &mut InputState,
    event: InputEvent,
    settings: &InputSettings,
    now: Instant,
) -> Vec<InputAction> {
    let mut actions = Vec::new();

    match event {
        InputEvent::KeyDown(code) => {
            if code == KeyCode::KeyR {
                actions.extend(set_orbit(state, true));
            }
            actions.extend(key_action(code, settings));
        }
        InputEvent::KeyUp(_) => actions.extend(set_orbit(state, false)),
        InputEvent::CursorMoved(position) => {
            let previous = state.cursor;
            state.cursor = position;

            match state.drag_mode {
                DragMode::Orbit => {
                    let dt = state
                        .last_motion
                        .map(|t| now.saturating_duration_since(t).as_secs_f32())
                        .unwrap_or(0.0);
                    state.last_motion = Some(now);
                    actions.push(InputAction::RotateCamera {
                        from: previous,
                        to: position,
                        dt,
                    });
                }
                DragMode::Gizmo => actions.push(InputAction::DragGizmo(position)),
                DragMode::None => actions.push(InputAction::HoverGizmo(position)),
            }
        }
        InputEvent::LeftButtonDown => {
            if state.orbit_enabled {
                state.drag_mode = DragMode::Orbit;
                state.last_motion = Some(now);
                actions.push(InputAction::StopSpin);
            } else {
                state.drag_mode = DragMode::Gizmo;
                actions.push(InputAction::BeginGizmoDrag(state.cursor));
            }
        }
        InputEvent::LeftButtonUp => {
            match state.drag_mode {
                DragMode::Orbit => {
                    let idle_seconds = state
                        .last_motion
                        .map(|t| now.saturating_duration_since(t).as_secs_f32())
                        .unwrap_or(f32::MAX);
                    actions.push(InputAction::ReleaseCamera { idle_seconds });
                }
                DragMode::Gizmo => actions.push(InputAction::EndGizmoDrag),
                DragMode::None => {}
            }
            state.drag_mode = DragMode::None;
            state.last_motion = None;
        }
        InputEvent::Wheel(lines) => actions.push(InputAction::Zoom(lines)),
    }

    actions
}
