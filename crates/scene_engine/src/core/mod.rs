//! # Core Engine Module
//!
//! Shared abstractions used by every other subsystem.
//!
//! ## Organization
//!
//! - **Config**: Unified configuration system for the camera, scenes and harness
//! - **Foundation**: Low-level utilities (math, collections, time, logging)

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;

// Re-export commonly used config types
pub use config::{
    CameraConfig,
    Config,
    ConfigError,
    ConfigFormat,
    HarnessConfig,
    ProjectionConfig,
    SceneConfig,
};
