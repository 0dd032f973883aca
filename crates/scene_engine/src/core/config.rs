//! # Unified Configuration System
//!
//! Configuration structures for the camera, scenes and the demo harness.
//! Everything here is serializable through the [`Config`] trait (TOML, RON).
//!
//! ## Configuration Categories
//!
//! - **Camera Config**: initial pose, movement speed, mouse sensitivity
//! - **Projection Config**: perspective parameters used when rendering
//! - **Scene Config**: per-scene defaults applied on construction
//! - **Harness Config**: frame loop and scene selection for the demo harness

use serde::{Deserialize, Serialize};

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};

pub use crate::config::{Config, ConfigError, ConfigFormat};

/// # Camera Configuration
///
/// Initial state of an FPS camera. Angles are in degrees: `alpha` is the
/// polar angle measured from the up axis, `phi` the azimuth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting position
    pub position: Vec3,
    /// Movement speed in units per second
    pub speed: f32,
    /// Degrees of rotation per pixel of mouse movement
    pub sensitivity: f32,
    /// Polar angle from the up axis
    pub alpha_degrees: f32,
    /// Azimuth
    pub phi_degrees: f32,
    /// Up axis
    pub up: Vec3,
}

impl CameraConfig {
    /// Set the starting position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set movement speed
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Set mouse sensitivity
    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.up.norm_squared() <= f32::EPSILON {
            return Err("Camera up axis cannot be zero".to_string());
        }
        if self.speed < 0.0 {
            return Err("Camera speed cannot be negative".to_string());
        }
        Ok(())
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            speed: 5.0,
            sensitivity: 0.2,
            alpha_degrees: 90.0,
            phi_degrees: 0.0,
            up: Vec3::y(),
        }
    }
}

/// # Projection Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
}

impl ProjectionConfig {
    /// Perspective matrix for a viewport of the given size
    #[allow(clippy::cast_precision_loss)]
    pub fn matrix(&self, width: u32, height: u32) -> Mat4 {
        let aspect = width as f32 / height.max(1) as f32;
        Mat4::perspective(utils::deg_to_rad(self.fov_y_degrees), aspect, self.near, self.far)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.fov_y_degrees > 0.0 && self.fov_y_degrees < 180.0) {
            return Err(format!("Field of view out of range: {}", self.fov_y_degrees));
        }
        if self.near <= 0.0 || self.far <= self.near {
            return Err(format!("Invalid clip planes: near {} far {}", self.near, self.far));
        }
        Ok(())
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// # Scene Configuration
///
/// Defaults applied when a scene is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Initial camera state
    pub camera: CameraConfig,
    /// Distance the camera is pulled back along its look direction on creation
    pub camera_pullback: f32,
    /// Whether spot lights start out locked to the camera
    pub lock_spotlights_to_camera: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            camera_pullback: 10.0,
            lock_spotlights_to_camera: false,
        }
    }
}

/// # Harness Configuration
///
/// Top-level configuration of the headless demo harness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
    /// Viewport width used for the projection aspect ratio
    pub width: u32,
    /// Viewport height used for the projection aspect ratio
    pub height: u32,
    /// Number of frames simulated for every scene
    pub frames_per_scene: u32,
    /// Fixed simulation step in seconds
    pub fixed_delta: f32,
    /// Scenes to run, by name; empty means every demo scene
    pub scenes: Vec<String>,
    /// Projection settings
    pub projection: ProjectionConfig,
    /// Scene defaults
    pub scene: SceneConfig,
}

impl HarnessConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err("Viewport size must be non-zero".to_string());
        }
        if self.fixed_delta <= 0.0 {
            return Err(format!("Fixed delta must be positive, got {}", self.fixed_delta));
        }
        self.projection.validate()?;
        self.scene.camera.validate()?;
        Ok(())
    }

    /// Projection matrix for the configured viewport
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.matrix(self.width, self.height)
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            width: 1280,
            height: 720,
            frames_per_scene: 120,
            fixed_delta: 1.0 / 60.0,
            scenes: Vec::new(),
            projection: ProjectionConfig::default(),
            scene: SceneConfig::default(),
        }
    }
}

impl Config for CameraConfig {}
impl Config for SceneConfig {}
impl Config for HarnessConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(HarnessConfig::default().validate().is_ok());
        assert!(CameraConfig::default().validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = HarnessConfig::default();
        config.scenes = vec!["four_balls".to_string(), "solar_system".to_string()];
        config.scene.camera = config.scene.camera.with_speed(8.0);

        let text = config.to_string_with_format(ConfigFormat::Toml).unwrap();
        let parsed = HarnessConfig::from_str_with_format(&text, ConfigFormat::Toml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_ron_round_trip() {
        let config = SceneConfig {
            lock_spotlights_to_camera: true,
            ..SceneConfig::default()
        };
        let text = config.to_string_with_format(ConfigFormat::Ron).unwrap();
        let parsed = SceneConfig::from_str_with_format(&text, ConfigFormat::Ron).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let text = "frames_per_scene = 10\n\n[scene.camera]\nspeed = 2.5\n";
        let parsed = HarnessConfig::from_str_with_format(text, ConfigFormat::Toml).unwrap();
        assert_eq!(parsed.frames_per_scene, 10);
        assert!((parsed.scene.camera.speed - 2.5).abs() < f32::EPSILON);
        assert!((parsed.scene.camera_pullback - 10.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_invalid_projection_rejected() {
        let mut config = HarnessConfig::default();
        config.projection.near = 0.0;
        assert!(config.validate().is_err());
    }
}
