//! Scene composition
//!
//! Transforms and matrix compositors build model matrices; renderable
//! entities live in a [`SceneGraph`] arena with optional parent links; a
//! [`Scene`] owns the camera, the lights and the distributors that forward
//! both to entity shaders; a [`SceneDirector`] switches between scenes.
//!
//! ## Architecture
//!
//! ```text
//! Camera ──► camera distributor ──┐
//! Lights ──► light distributors ──┼──► entity shaders
//! Counts ──► count distributor ───┘
//!
//! SceneGraph (parents first) ──► world matrices ──► RenderableEntity::render
//! ```

mod compositor;
mod director;
mod light_rig;
mod renderable_entity;
#[allow(clippy::module_inception)]
mod scene;
mod scene_graph;
mod transform;

use bitflags::bitflags;
use thiserror::Error;

use crate::foundation::collections::EntityId;

pub use compositor::Mat4Compositor;
pub use director::SceneDirector;
pub use light_rig::{LightChannel, LightHandle, LightId, LightMut, LightRig, StoredLight};
pub use renderable_entity::{EntityDesc, RenderableEntity, TransformModifier, UpdateHook};
pub use scene::{Scene, CAMERA_POSITION_UNIFORM};
pub use scene_graph::SceneGraph;
pub use transform::Transform;

bitflags! {
    /// Distributors an entity's shader subscribes to when it is added
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AddEntityOptions: u32 {
        /// Receive `camera_position` whenever the camera changes
        const PASS_CAMERA_POSITION = 1;
        /// Receive every light block and the light counts
        const PASS_LIGHTS = 1 << 1;
    }
}

impl AddEntityOptions {
    /// Camera position and lights
    pub const fn forwarding() -> Self {
        Self::PASS_CAMERA_POSITION.union(Self::PASS_LIGHTS)
    }
}

impl Default for AddEntityOptions {
    fn default() -> Self {
        Self::forwarding()
    }
}

/// Scene structure errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    /// The entity names a parent that is not in the scene
    #[error("parent entity {0:?} is not in the scene")]
    UnknownParent(EntityId),

    /// No entity with this id
    #[error("entity {0:?} is not in the scene")]
    UnknownEntity(EntityId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forwarding_is_both_flags() {
        let options = AddEntityOptions::forwarding();
        assert!(options.contains(AddEntityOptions::PASS_CAMERA_POSITION));
        assert!(options.contains(AddEntityOptions::PASS_LIGHTS));
        assert_eq!(AddEntityOptions::default(), options);
    }
}
