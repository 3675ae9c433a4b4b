//! Input Module - keyboard/pointer state and the orbit toggle

pub mod input_data;
pub mod input_operations;

pub use input_data::{DragMode, InputAction, InputEvent, InputState, KeyCode};
pub use input_operations::{
    handle_input_event, init_input_state, translate_window_event, update_orbit_timer,
};
