//! Config Module - TOML-backed demo settings
//!
//! - config_data.rs: settings structs and their defaults
//! - config_operations.rs: loading, validation and live threshold setters

pub mod config_data;
pub mod config_operations;

pub use config_data::{
    CameraSettings, DemoConfig, InputSettings, MarkerSettings, ShadingSettings, TorusSettings,
    WindowSettings, THRESHOLD_MAX_RANGE, THRESHOLD_MIN_RANGE,
};

pub use config_operations::{
    // Loading
    load_config,
    load_config_or_default,
    parse_config,
    save_config,

    // Validation
    validate_config,
    validate_shading,

    // Live thresholds
    adjust_threshold_max,
    adjust_threshold_min,
    reset_thresholds,
    set_threshold_max,
    set_threshold_min,

    // Conversion
    morph_params,
    shading_params,
};
