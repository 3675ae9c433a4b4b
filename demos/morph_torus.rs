//! Interactive morphing torus
//!
//! Drag the gizmo to move the morph point. Hold R to rotate the camera,
//! scroll to zoom. `[` `]` nudge the lower threshold, `-` `=` the upper,
//! `0` resets both, Esc quits.
//!
//! Usage: cargo run --example morph_torus [config.toml]

use std::path::PathBuf;
use torus_morph::{load_config_or_default, Demo};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    log::info!("[morph_torus] Config: {:?}", config_path);

    let config = load_config_or_default(config_path.as_deref())?;
    Demo::new(config)?.run()?;
    Ok(())
}
