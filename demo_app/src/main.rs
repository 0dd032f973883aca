//! Headless scene demo
//!
//! Builds the demo scenes on a recording backend and drives each one for a
//! fixed number of frames: a scripted fly-through with the mouse in relative
//! mode. Uniform traffic and draw calls are logged per scene.
//!
//! Usage: `scene_demo [config.toml|config.ron]`

mod assets;
mod demo_scenes;

use std::path::PathBuf;

use thiserror::Error;

use scene_engine::core::config::{Config, ConfigError, HarnessConfig};
use scene_engine::foundation::logging;
use scene_engine::foundation::time::Timer;
use scene_engine::input::{InputManager, KeyCode};
use scene_engine::scene::{SceneDirector, SceneError};

use assets::DemoAssets;

const DEFAULT_CONFIG: &str = "demo_app/config/demo.toml";

/// Errors that stop the harness
#[derive(Error, Debug)]
pub enum HarnessError {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Configuration loaded but is not usable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A scene could not be assembled
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// A scene asked for an asset that was never loaded
    #[error("Missing {kind} '{name}'")]
    MissingAsset {
        /// Asset category
        kind: &'static str,
        /// Requested name
        name: String,
    },

    /// The configuration names a scene that does not exist
    #[error("Unknown scene '{0}'")]
    UnknownScene(String),
}

fn load_config() -> Result<HarnessConfig, HarnessError> {
    let path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG), PathBuf::from);

    let config = if path.exists() {
        HarnessConfig::load_from_file(&path)?
    } else {
        eprintln!("Config {} not found, using defaults", path.display());
        HarnessConfig::default()
    };
    config.validate().map_err(HarnessError::InvalidConfig)?;
    Ok(config)
}

fn build_director(assets: &DemoAssets, config: &HarnessConfig) -> Result<SceneDirector, HarnessError> {
    let names: Vec<&str> = if config.scenes.is_empty() {
        demo_scenes::DEMO_SCENES.iter().map(|&(name, _)| name).collect()
    } else {
        config.scenes.iter().map(String::as_str).collect()
    };

    let mut director = SceneDirector::new();
    for name in names {
        let builder = demo_scenes::find(name).ok_or_else(|| HarnessError::UnknownScene(name.to_string()))?;
        let scene = builder(assets, &config.scene)?;
        log::info!("Built scene '{}' with {} entities", name, scene.entity_count());
        director.add(scene);
    }
    Ok(director)
}

/// Scripted input for one frame: walk forward for the first half, then strafe
/// while looking around
fn script_input(input: &mut InputManager, frame: u32, frames: u32) {
    input.begin_frame();
    let walking = frame < frames / 2;
    input.handle_key_input(KeyCode::W, walking);
    input.handle_key_input(KeyCode::D, !walking);
    input.handle_mouse_motion(if walking { 0.0 } else { 2.0 }, 0.5);
}

fn run(config: &HarnessConfig) -> Result<(), HarnessError> {
    let assets = DemoAssets::headless();
    let mut director = build_director(&assets, config)?;
    let projection = config.projection_matrix();

    let mut input = InputManager::new();
    input.set_relative_mouse_mode(true);

    let mut timer = Timer::new();
    for _ in 0..director.len() {
        assets.reset_traffic();
        let Some(scene) = director.active_mut() else {
            break;
        };

        for frame in 0..config.frames_per_scene {
            script_input(&mut input, frame, config.frames_per_scene);
            scene.update(&input, config.fixed_delta);
            scene.render(&projection);
            timer.update();
        }

        log::info!(
            "Scene '{}': {} frames, {} draws, camera at {:?}, light generation {}",
            scene.name(),
            config.frames_per_scene,
            assets.log.drawn_meshes().len(),
            scene.camera().position(),
            scene.light_generation()
        );
        for (shader, writes) in assets.uniform_traffic() {
            log::debug!("  {shader}: {writes} uniform writes");
        }

        director.next();
    }

    log::info!(
        "Simulated {} frames in {:.2?} ({:.0} fps)",
        timer.frame_count(),
        timer.total_duration(),
        timer.average_fps()
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    logging::init_with_level(&config.log_level);

    log::info!("Starting headless scene demo");
    match run(&config) {
        Ok(()) => {
            log::info!("Scene demo completed successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Scene demo failed: {}", e);
            Err(e.into())
        }
    }
}
