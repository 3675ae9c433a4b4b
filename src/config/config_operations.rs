//! Configuration operations - loading, validation and live threshold setters
//!
//! Setters take settings and return new settings; the app commits the
//! result between frames so the next frame sees it.

use super::config_data::{DemoConfig, ShadingSettings, THRESHOLD_MAX_RANGE, THRESHOLD_MIN_RANGE};
use crate::error::{DemoError, DemoResult, ErrorContext};
use crate::mesh::MAX_SEGMENTS;
use crate::morph::{MorphParams, ShadingParams};
use cgmath::Vector3;
use std::path::Path;

// ============================================================================
// LOADING
// ============================================================================

/// Parse and validate a config from TOML text
pub fn parse_config(source: &str, origin: &str) -> DemoResult<DemoConfig> {
    let config: DemoConfig = toml::from_str(source).map_err(|e| DemoError::ConfigParse {
        path: origin.to_string(),
        error: e.to_string(),
    })?;
    validate_config(&config)?;
    Ok(config)
}

/// Load and validate a config file
pub fn load_config(path: &Path) -> DemoResult<DemoConfig> {
    log::info!("[load_config] Reading {}", path.display());
    let source = std::fs::read_to_string(path).map_err(|e| DemoError::config_io(path, e))?;
    parse_config(&source, &path.display().to_string())
}

/// Load a config file when a path is given, otherwise use defaults
pub fn load_config_or_default(path: Option<&Path>) -> DemoResult<DemoConfig> {
    match path {
        Some(path) => load_config(path),
        None => {
            log::info!("[load_config_or_default] No config file given, using defaults");
            let config = DemoConfig::default();
            validate_config(&config)?;
            Ok(config)
        }
    }
}

/// Write a config as TOML
pub fn save_config(config: &DemoConfig, path: &Path) -> DemoResult<()> {
    let text = toml::to_string_pretty(config).context("Failed to serialize config")?;
    std::fs::write(path, text).map_err(|e| DemoError::config_io(path, e))
}

// ============================================================================
// VALIDATION
// ============================================================================

fn require_positive(field: &str, value: f32) -> DemoResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(DemoError::invalid_config(field, value, "must be positive"))
    }
}

fn require_in_range(field: &str, value: f32, range: (f32, f32)) -> DemoResult<()> {
    if value >= range.0 && value <= range.1 {
        Ok(())
    } else {
        Err(DemoError::invalid_config(
            field,
            value,
            format!("must be within [{}, {}]", range.0, range.1),
        ))
    }
}

fn require_segments(field: &str, a: u32, b: u32, min: (u32, u32)) -> DemoResult<()> {
    if a < min.0 || b < min.1 || a > MAX_SEGMENTS || b > MAX_SEGMENTS {
        Err(DemoError::invalid_config(
            field,
            format!("{}x{}", a, b),
            format!(
                "must be between {}x{} and {}x{}",
                min.0, min.1, MAX_SEGMENTS, MAX_SEGMENTS
            ),
        ))
    } else {
        Ok(())
    }
}

/// Validate shading settings.
/// Equal thresholds are rejected; reversed ones are allowed with a warning.
pub fn validate_shading(shading: &ShadingSettings) -> DemoResult<()> {
    require_in_range("shading.threshold_min", shading.threshold_min, THRESHOLD_MIN_RANGE)?;
    require_in_range("shading.threshold_max", shading.threshold_max, THRESHOLD_MAX_RANGE)?;

    if shading.threshold_min == shading.threshold_max {
        return Err(DemoError::invalid_config(
            "shading.threshold_max",
            shading.threshold_max,
            "must differ from threshold_min",
        ));
    }

    if shading.threshold_min > shading.threshold_max {
        log::warn!(
            "[validate_shading] threshold_min {} > threshold_max {}: displacement transition is reversed",
            shading.threshold_min,
            shading.threshold_max
        );
    }

    require_positive("shading.radius", shading.radius)?;
    require_positive("shading.refraction_ratio", shading.refraction_ratio)?;
    Ok(())
}

/// Validate every section of the config
pub fn validate_config(config: &DemoConfig) -> DemoResult<()> {
    let window = &config.window;
    if window.width < 320 || window.height < 240 {
        return Err(DemoError::invalid_config(
            "window",
            format!("{}x{}", window.width, window.height),
            "window dimensions too small (min 320x240)",
        ));
    }
    if window.width > 16384 || window.height > 16384 {
        return Err(DemoError::invalid_config(
            "window",
            format!("{}x{}", window.width, window.height),
            "window dimensions too large (max 16384x16384)",
        ));
    }

    let camera = &config.camera;
    require_positive("camera.fov_degrees", camera.fov_degrees)?;
    if camera.fov_degrees >= 180.0 {
        return Err(DemoError::invalid_config(
            "camera.fov_degrees",
            camera.fov_degrees,
            "must be below 180",
        ));
    }
    require_positive("camera.near", camera.near)?;
    if camera.near >= camera.far {
        return Err(DemoError::invalid_config(
            "camera.far",
            camera.far,
            "must be greater than camera.near",
        ));
    }
    if camera.damping_factor < 0.0 {
        return Err(DemoError::invalid_config(
            "camera.damping_factor",
            camera.damping_factor,
            "must not be negative",
        ));
    }
    require_positive("camera.min_distance", camera.min_distance)?;
    if camera.min_distance > camera.max_distance {
        return Err(DemoError::invalid_config(
            "camera.max_distance",
            camera.max_distance,
            "must not be below camera.min_distance",
        ));
    }
    if camera.position == camera.target {
        return Err(DemoError::invalid_config(
            "camera.position",
            format!("{:?}", camera.position),
            "must differ from camera.target",
        ));
    }

    require_positive("torus.radius", config.torus.radius)?;
    require_positive("torus.tube", config.torus.tube)?;
    require_segments(
        "torus.segments",
        config.torus.radial_segments,
        config.torus.tubular_segments,
        (1, 1),
    )?;

    require_positive("marker.radius", config.marker.radius)?;
    require_segments(
        "marker.segments",
        config.marker.segments,
        config.marker.rings,
        (3, 2),
    )?;
    require_positive("marker.gizmo_size", config.marker.gizmo_size)?;
    require_positive("marker.pick_radius_px", config.marker.pick_radius_px)?;

    validate_shading(&config.shading)?;
    require_positive("input.threshold_step", config.input.threshold_step)?;

    log::info!("[validate_config] Configuration validated successfully");
    Ok(())
}

// ============================================================================
// LIVE THRESHOLD SETTERS
// ============================================================================

/// Set the lower threshold, clamped to its range.
/// A value equal to the upper threshold is not committed.
pub fn set_threshold_min(shading: &ShadingSettings, value: f32) -> ShadingSettings {
    let clamped = value.clamp(THRESHOLD_MIN_RANGE.0, THRESHOLD_MIN_RANGE.1);
    if clamped != value {
        log::warn!("[set_threshold_min] {} clamped to {}", value, clamped);
    }
    if clamped == shading.threshold_max {
        log::warn!(
            "[set_threshold_min] {} equals threshold_max, keeping {}",
            clamped,
            shading.threshold_min
        );
        return *shading;
    }

    ShadingSettings {
        threshold_min: clamped,
        ..*shading
    }
}

/// Set the upper threshold, clamped to its range.
/// A value equal to the lower threshold is not committed.
pub fn set_threshold_max(shading: &ShadingSettings, value: f32) -> ShadingSettings {
    let clamped = value.clamp(THRESHOLD_MAX_RANGE.0, THRESHOLD_MAX_RANGE.1);
    if clamped != value {
        log::warn!("[set_threshold_max] {} clamped to {}", value, clamped);
    }
    if clamped == shading.threshold_min {
        log::warn!(
            "[set_threshold_max] {} equals threshold_min, keeping {}",
            clamped,
            shading.threshold_max
        );
        return *shading;
    }

    ShadingSettings {
        threshold_max: clamped,
        ..*shading
    }
}

/// Nudge the lower threshold by `delta`, stepping over the upper threshold
pub fn adjust_threshold_min(shading: &ShadingSettings, delta: f32) -> ShadingSettings {
    let value = step_past(shading.threshold_min, delta, shading.threshold_max);
    set_threshold_min(shading, value)
}

/// Nudge the upper threshold by `delta`, stepping over the lower threshold
pub fn adjust_threshold_max(shading: &ShadingSettings, delta: f32) -> ShadingSettings {
    let value = step_past(shading.threshold_max, delta, shading.threshold_min);
    set_threshold_max(shading, value)
}

/// Restore default thresholds, keeping everything else
pub fn reset_thresholds(shading: &ShadingSettings) -> ShadingSettings {
    let defaults = ShadingSettings::default();
    ShadingSettings {
        threshold_min: defaults.threshold_min,
        threshold_max: defaults.threshold_max,
        ..*shading
    }
}

// Keeps repeated key steps from accumulating float drift
fn round_step(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}

// Landing on the other threshold would collapse the transition
fn step_past(current: f32, delta: f32, other: f32) -> f32 {
    let next = round_step(current + delta);
    if next == other {
        round_step(next + delta)
    } else {
        next
    }
}

// ============================================================================
// CONVERSION
// ============================================================================

/// Displacement parameters for a frame, with the current morph point
pub fn morph_params(shading: &ShadingSettings, morph: Vector3<f32>) -> MorphParams {
    MorphParams {
        morph,
        radius: shading.radius,
        threshold_min: shading.threshold_min,
        threshold_max: shading.threshold_max,
    }
}

/// Lighting inputs for the fragment stage
pub fn shading_params(shading: &ShadingSettings) -> ShadingParams {
    ShadingParams {
        base_color: shading.base_color.into(),
        light_direction: shading.dir_light_direction.into(),
        light_color: shading.dir_light_color.into(),
        ambient_color: shading.ambient_color.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config_data::WindowSettings;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = DemoConfig::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.shading.threshold_min, -0.2);
        assert_eq!(config.shading.threshold_max, 2.0);
        assert_eq!(config.camera.position, [0.0, -4.0, 5.0]);
        assert_eq!(config.marker.position, [-1.0, 0.4, 0.4]);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = parse_config(
            "[shading]\nthreshold_min = 0.1\n\n[torus]\nradial_segments = 60\n",
            "inline",
        )
        .expect("valid config");

        assert_eq!(config.shading.threshold_min, 0.1);
        assert_eq!(config.shading.threshold_max, 2.0);
        assert_eq!(config.torus.radial_segments, 60);
        assert_eq!(config.torus.tubular_segments, 120);
        assert_eq!(config.window, WindowSettings::default());
    }

    #[test]
    fn test_parse_error_reports_origin() {
        let err = parse_config("[shading\nthreshold_min = ", "broken.toml").unwrap_err();
        assert!(matches!(err, DemoError::ConfigParse { ref path, .. } if path == "broken.toml"));
    }

    #[test]
    fn test_equal_thresholds_rejected() {
        let mut config = DemoConfig::default();
        config.shading.threshold_min = 0.5;
        config.shading.threshold_max = 0.5;
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, DemoError::InvalidConfig { ref field, .. } if field == "shading.threshold_max"));
    }

    #[test]
    fn test_reversed_thresholds_allowed() {
        let mut config = DemoConfig::default();
        config.shading.threshold_min = 0.8;
        config.shading.threshold_max = -0.5;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_out_of_range_thresholds_rejected() {
        let mut config = DemoConfig::default();
        config.shading.threshold_max = 4.5;
        assert!(validate_config(&config).is_err());

        let mut config = DemoConfig::default();
        config.shading.threshold_min = -1.5;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_invalid_camera_rejected() {
        let mut config = DemoConfig::default();
        config.camera.near = 10.0;
        config.camera.far = 5.0;
        assert!(validate_config(&config).is_err());

        let mut config = DemoConfig::default();
        config.camera.target = config.camera.position;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_segment_counts_bounded() {
        let mut config = DemoConfig::default();
        config.torus.tubular_segments = MAX_SEGMENTS;
        assert!(validate_config(&config).is_ok());

        config.torus.radial_segments = MAX_SEGMENTS + 1;
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, DemoError::InvalidConfig { ref field, .. } if field == "torus.segments"));

        let mut config = DemoConfig::default();
        config.marker.rings = 1;
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, DemoError::InvalidConfig { ref field, .. } if field == "marker.segments"));

        let mut config = DemoConfig::default();
        config.marker.segments = 100_000;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[window]\nwidth = 800\nheight = 600\n").expect("write");

        let config = load_config(file.path()).expect("valid config");
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("demo.toml");

        let mut config = DemoConfig::default();
        config.shading.base_color = [0.0, 0.5, 1.0];
        save_config(&config, &path).expect("save");

        assert_eq!(load_config(&path).expect("load"), config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = load_config(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, DemoError::ConfigIo { .. }));
    }

    #[test]
    fn test_threshold_setters_clamp() {
        let shading = ShadingSettings::default();
        assert_eq!(set_threshold_min(&shading, 3.0).threshold_min, 1.0);
        assert_eq!(set_threshold_min(&shading, -7.0).threshold_min, -1.0);
        assert_eq!(set_threshold_max(&shading, 9.0).threshold_max, 4.0);
        assert_eq!(set_threshold_max(&shading, -2.0).threshold_max, -1.0);
    }

    #[test]
    fn test_threshold_setters_refuse_equal_values() {
        let shading = ShadingSettings {
            threshold_min: 0.5,
            threshold_max: 1.0,
            ..Default::default()
        };
        assert_eq!(set_threshold_min(&shading, 1.0), shading);
        assert_eq!(set_threshold_max(&shading, 0.5), shading);
    }

    #[test]
    fn test_adjust_and_reset_thresholds() {
        let mut shading = ShadingSettings::default();
        for _ in 0..4 {
            shading = adjust_threshold_min(&shading, 0.05);
        }
        assert_eq!(shading.threshold_min, 0.0);

        shading = adjust_threshold_max(&shading, -0.5);
        assert_eq!(shading.threshold_max, 1.5);

        let reset = reset_thresholds(&shading);
        assert_eq!(reset, ShadingSettings::default());
    }

    #[test]
    fn test_stepping_crosses_the_other_threshold() {
        let mut shading = ShadingSettings {
            threshold_min: 0.4,
            threshold_max: 0.5,
            ..Default::default()
        };
        shading = adjust_threshold_min(&shading, 0.05);
        assert_eq!(shading.threshold_min, 0.45);

        // 0.5 is taken by threshold_max, so the step lands beyond it
        shading = adjust_threshold_min(&shading, 0.05);
        assert_eq!(shading.threshold_min, 0.55);
        assert!(shading.threshold_min > shading.threshold_max);
        assert!(validate_shading(&shading).is_ok());

        shading = adjust_threshold_max(&shading, 0.05);
        assert_eq!(shading.threshold_max, 0.6);
        assert!(shading.threshold_max > shading.threshold_min);
    }

    #[test]
    fn test_stepping_into_range_edge_keeps_value() {
        let shading = ShadingSettings {
            threshold_min: 0.95,
            threshold_max: 1.0,
            ..Default::default()
        };
        // The only value past threshold_max clamps back onto it
        assert_eq!(adjust_threshold_min(&shading, 0.05), shading);
    }

    #[test]
    fn test_params_conversion() {
        let shading = ShadingSettings::default();
        let morph = Vector3::new(-1.0, 0.4, 0.4);
        let params = morph_params(&shading, morph);
        assert_eq!(params.morph, morph);
        assert_eq!(params.radius, 1.0);

        let lighting = shading_params(&shading);
        assert_eq!(lighting, ShadingParams::default());
    }
}
