//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and operations
//! - Collections and stable handles
//! - Frame timing
//! - Logging utilities
//! - Bezier paths for procedural animation

pub mod math;
pub mod collections;
pub mod time;
pub mod logging;
pub mod bezier;
