//! Error handling for the morph demo
//!
//! One error type for every fallible path (config, window, GPU setup).
//! The displacement-shading model itself never fails.

use std::path::Path;

/// Main error type for the demo
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    // Configuration Errors
    #[error("Invalid config value for {field} = {value}: {reason}")]
    InvalidConfig {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to read config {path}: {error}")]
    ConfigIo { path: String, error: String },

    #[error("Failed to parse config {path}: {error}")]
    ConfigParse { path: String, error: String },

    // Window Errors
    #[error("Event loop error: {0}")]
    EventLoop(String),

    #[error("Window creation failed: {0}")]
    WindowCreation(String),

    // GPU Errors
    #[error("Surface creation failed: {0}")]
    SurfaceCreation(String),

    #[error("No suitable GPU adapter found")]
    AdapterNotFound,

    #[error("Device request failed: {0}")]
    DeviceRequest(String),

    #[error("Surface error: {0}")]
    Surface(String),

    // Generic fallback for unexpected errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Result type alias for demo operations
pub type DemoResult<T> = Result<T, DemoError>;

impl DemoError {
    /// Build an `InvalidConfig` error from displayable parts
    pub fn invalid_config(
        field: &str,
        value: impl std::fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        DemoError::InvalidConfig {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn config_io(path: &Path, error: std::io::Error) -> Self {
        DemoError::ConfigIo {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }
}

impl From<winit::error::EventLoopError> for DemoError {
    fn from(err: winit::error::EventLoopError) -> Self {
        DemoError::EventLoop(err.to_string())
    }
}

impl From<winit::error::OsError> for DemoError {
    fn from(err: winit::error::OsError) -> Self {
        DemoError::WindowCreation(err.to_string())
    }
}

impl From<wgpu::CreateSurfaceError> for DemoError {
    fn from(err: wgpu::CreateSurfaceError) -> Self {
        DemoError::SurfaceCreation(err.to_string())
    }
}

impl From<wgpu::RequestDeviceError> for DemoError {
    fn from(err: wgpu::RequestDeviceError) -> Self {
        DemoError::DeviceRequest(err.to_string())
    }
}

impl From<wgpu::SurfaceError> for DemoError {
    fn from(err: wgpu::SurfaceError) -> Self {
        DemoError::Surface(err.to_string())
    }
}

// Helper functions for common error patterns

/// Convert Option to Result with context
pub trait OptionExt<T> {
    fn ok_or_demo<F>(self, f: F) -> DemoResult<T>
    where
        F: FnOnce() -> DemoError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_demo<F>(self, f: F) -> DemoResult<T>
    where
        F: FnOnce() -> DemoError,
    {
        self.ok_or_else(f)
    }
}

/// Extension trait for adding context to errors
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> DemoResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> DemoResult<T> {
        self.map_err(|e| DemoError::Internal {
            message: format!("{}: {}", msg, e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DemoError::invalid_config("shading.threshold_min", 2.0, "must be <= 1");
        assert_eq!(
            err.to_string(),
            "Invalid config value for shading.threshold_min = 2: must be <= 1"
        );
    }

    #[test]
    fn test_option_ext() {
        let opt: Option<i32> = None;
        let result = opt.ok_or_demo(|| DemoError::AdapterNotFound);
        assert!(matches!(result, Err(DemoError::AdapterNotFound)));
    }

    #[test]
    fn test_error_context() {
        let result: Result<i32, std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));
        let err = result.context("loading config").unwrap_err();
        assert_eq!(err.to_string(), "Internal error: loading config: file not found");
    }
}
