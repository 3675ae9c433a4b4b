// Morph Torus - Data-Oriented Programming (DOP) architecture
//
// A torus displaced towards a draggable morph point, shaded with a glow
// that follows the displacement. Data lives in *_data modules, behaviour
// in *_operations modules as pure functions.
//
// - morph: the displacement-shading model (CPU reference, mirrored in WGSL)
// - mesh, camera, gizmo, input, config: scene and interaction state
// - renderer, app: wgpu pipelines and the winit event loop

pub mod error;

// Model
pub mod mesh;
pub mod morph;

// Scene and interaction
pub mod camera;
pub mod config;
pub mod gizmo;
pub mod input;

// Presentation
pub mod app;
pub mod renderer;

pub use camera::{CameraData, CameraUniform};
pub use config::{load_config, load_config_or_default, DemoConfig, ShadingSettings};
pub use error::{DemoError, DemoResult, ErrorContext, OptionExt};
pub use gizmo::{GizmoData, GizmoHandle};
pub use input::KeyCode;
pub use mesh::{MeshData, Vertex};
pub use morph::{displace, displace_mesh, recompute_normal, shade, smoothstep, MorphParams};

// Re-export wgpu for callers that need GPU types
pub use wgpu;

/// Entry point for the morphing torus demo
pub struct Demo {
    config: DemoConfig,
}

impl Demo {
    /// Validate the configuration up front
    pub fn new(config: DemoConfig) -> DemoResult<Self> {
        log::debug!("[Demo::new] Validating configuration");
        if let Err(e) = config::validate_config(&config) {
            log::error!("[Demo::new] Configuration validation failed: {}", e);
            return Err(e);
        }
        log::info!("[Demo::new] Demo initialization complete");
        Ok(Self { config })
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    /// Open the window and block until it closes
    pub fn run(self) -> DemoResult<()> {
        log::info!("[Demo::run] Starting");
        let result = app::run(self.config);

        match &result {
            Ok(_) => log::info!("[Demo::run] Finished"),
            Err(e) => log::error!("[Demo::run] Error: {}", e),
        }
        result
    }
}
