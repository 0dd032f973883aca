//! # Scene Engine
//!
//! Scene composition and light distribution for a real-time rendering demo
//! harness.
//!
//! ## Features
//!
//! - **Transform Algebra**: translate/rotate/scale transforms, matrix compositors
//!   and per-frame transform modifiers
//! - **Scene Graph**: parent-relative entities with a parents-first world pass
//! - **Light Distribution**: capped point/spot/directional light stores whose
//!   changes are pushed to every subscribed shader
//! - **FPS Camera**: spherical-coordinate camera with a lazily cached view matrix
//! - **Headless Backend**: recording shader/mesh/texture implementations
//!
//! ## Quick Start
//!
//! ```rust
//! use std::rc::Rc;
//! use scene_engine::prelude::*;
//! use scene_engine::render::headless::{HeadlessMesh, HeadlessShader};
//!
//! let shader = Rc::new(HeadlessShader::new("phong"));
//! let mut scene = Scene::new("quick start");
//! scene.add_light(PointLight::at(Vec3::new(0.0, 5.0, 0.0)));
//! scene
//!     .add_entity(
//!         EntityDesc::new(shader.clone(), Rc::new(HeadlessMesh::new("ball", 960))),
//!         AddEntityOptions::forwarding(),
//!     )
//!     .unwrap();
//!
//! scene.update(&InputManager::new(), 1.0 / 60.0);
//! scene.render(&ProjectionConfig::default().matrix(1280, 720));
//! assert_eq!(shader.int_uniform("light.num_point_lights"), Some(1));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;
pub mod foundation;

pub mod config;
pub mod events;
pub mod input;
pub mod render;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        core::config::{CameraConfig, Config, HarnessConfig, ProjectionConfig, SceneConfig},
        events::{EventDistributor, EventProducer},
        foundation::{
            bezier::{BezierCurve, BezierList},
            collections::EntityId,
            math::{Mat3, Mat4, Mat4Ext, Quat, Vec3, Vec4},
            time::{FrameTime, Timer},
        },
        input::{InputManager, KeyCode},
        render::{
            Camera, DirectionalLight, Light, LightKind, Material, Mesh, PhongBlinnMaterial, PointLight,
            Shader, ShaderExt, Skybox, SpotLight, Texture, TextureKind, Uniform,
        },
        scene::{
            AddEntityOptions, EntityDesc, LightHandle, LightId, Mat4Compositor, RenderableEntity, Scene,
            SceneDirector, SceneError, Transform,
        },
    };
}
