//! Scene graph: arena of entities with optional parent links
//!
//! Entities live in a [`SlotMap`] keyed by [`EntityId`], plus a vector that
//! keeps insertion order. A parent must already be in the graph when its child
//! is inserted, so insertion order is a valid topological order and a single
//! forward pass computes every world matrix parents-first.

use slotmap::SlotMap;

use crate::foundation::collections::EntityId;
use crate::foundation::math::Mat4;
use crate::foundation::time::FrameTime;
use super::renderable_entity::RenderableEntity;
use super::SceneError;

/// Arena of renderable entities
#[derive(Debug, Default)]
pub struct SceneGraph {
    entities: SlotMap<EntityId, RenderableEntity>,
    order: Vec<EntityId>,
}

impl SceneGraph {
    /// Create a new empty scene graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity and seed its world matrix
    ///
    /// The seed is `parent_world * transform.model_matrix()`; the modifier is
    /// not called until the next [`propagate`](Self::propagate).
    ///
    /// Fails with [`SceneError::UnknownParent`] when the entity names a parent
    /// that is not in the graph.
    pub fn insert(&mut self, mut entity: RenderableEntity) -> Result<EntityId, SceneError> {
        let parent_world = match entity.parent() {
            Some(parent) => self
                .world_matrix(parent)
                .ok_or(SceneError::UnknownParent(parent))?,
            None => Mat4::identity(),
        };

        entity.set_world_matrix(parent_world * entity.transform().model_matrix());
        let id = self.entities.insert(entity);
        self.order.push(id);
        Ok(id)
    }

    /// Remove an entity and all of its descendants; returns how many were removed
    pub fn remove(&mut self, id: EntityId) -> Result<usize, SceneError> {
        if !self.entities.contains_key(id) {
            return Err(SceneError::UnknownEntity(id));
        }

        let mut doomed = vec![id];
        for &candidate in &self.order {
            let parent = self.entities.get(candidate).and_then(RenderableEntity::parent);
            if parent.is_some_and(|parent| doomed.contains(&parent)) {
                doomed.push(candidate);
            }
        }

        for &gone in &doomed {
            self.entities.remove(gone);
        }
        self.order.retain(|candidate| !doomed.contains(candidate));
        Ok(doomed.len())
    }

    /// Entity by id
    pub fn get(&self, id: EntityId) -> Option<&RenderableEntity> {
        self.entities.get(id)
    }

    /// Mutable entity by id
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut RenderableEntity> {
        self.entities.get_mut(id)
    }

    /// Whether `id` is in the graph
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(id)
    }

    /// Number of entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the graph is empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Ids in insertion order
    pub fn ids(&self) -> &[EntityId] {
        &self.order
    }

    /// Entities in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &RenderableEntity)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.entities.get(id).map(|entity| (id, entity)))
    }

    /// Direct children of `id`, in insertion order
    pub fn children_of(&self, id: EntityId) -> Vec<EntityId> {
        self.iter()
            .filter(|(_, entity)| entity.parent() == Some(id))
            .map(|(child, _)| child)
            .collect()
    }

    /// Cached world matrix of `id`
    pub fn world_matrix(&self, id: EntityId) -> Option<Mat4> {
        self.entities.get(id).map(|entity| *entity.world_matrix())
    }

    /// Run every entity's per-frame update hook, in insertion order
    pub fn update_entities(&mut self, delta_time: f32) {
        for &id in &self.order {
            if let Some(entity) = self.entities.get_mut(id) {
                entity.update(delta_time);
            }
        }
    }

    /// Recompute every world matrix, parents before children
    pub fn propagate(&mut self, time: &FrameTime) {
        for index in 0..self.order.len() {
            let id = self.order[index];
            self.update_world(id, time);
        }
    }

    fn update_world(&mut self, id: EntityId, time: &FrameTime) {
        let parent_world = self
            .entities
            .get(id)
            .and_then(RenderableEntity::parent)
            .and_then(|parent| self.world_matrix(parent))
            .unwrap_or_else(Mat4::identity);

        if let Some(entity) = self.entities.get_mut(id) {
            let local = entity.local_matrix(time);
            entity.set_world_matrix(parent_world * local);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{utils, Mat4Ext, Vec3};
    use crate::render::headless::{HeadlessMesh, HeadlessShader};
    use crate::scene::{EntityDesc, Transform};
    use approx::assert_relative_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    fn desc_at(position: Vec3) -> EntityDesc {
        EntityDesc::new(Rc::new(HeadlessShader::new("s")), Rc::new(HeadlessMesh::new("m", 3)))
            .with_transform(Transform::from_position(position))
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let mut graph = SceneGraph::new();
        let parent = graph
            .insert(RenderableEntity::new(desc_at(Vec3::zeros())))
            .unwrap();
        graph.remove(parent).unwrap();

        let orphan = RenderableEntity::new(desc_at(Vec3::zeros()).with_parent(parent));
        assert!(matches!(
            graph.insert(orphan),
            Err(SceneError::UnknownParent(id)) if id == parent
        ));
        assert!(graph.is_empty());
    }

    #[test]
    fn test_children_follow_parents() {
        let time = FrameTime::zero();
        let mut graph = SceneGraph::new();
        let sun = graph
            .insert(RenderableEntity::new(desc_at(Vec3::new(10.0, 0.0, 0.0))))
            .unwrap();
        let planet = graph
            .insert(RenderableEntity::new(desc_at(Vec3::new(0.0, 0.0, 5.0)).with_parent(sun)))
            .unwrap();
        let moon = graph
            .insert(RenderableEntity::new(desc_at(Vec3::new(0.0, 1.0, 0.0)).with_parent(planet)))
            .unwrap();

        assert_relative_eq!(
            utils::translation_of(&graph.world_matrix(moon).unwrap()),
            Vec3::new(10.0, 1.0, 5.0)
        );

        graph.get_mut(sun).unwrap().transform_mut().translate(Vec3::new(0.0, 0.0, -5.0));
        graph.propagate(&time);

        assert_relative_eq!(
            utils::translation_of(&graph.world_matrix(planet).unwrap()),
            Vec3::new(10.0, 0.0, 0.0)
        );
        assert_relative_eq!(
            utils::translation_of(&graph.world_matrix(moon).unwrap()),
            Vec3::new(10.0, 1.0, 0.0)
        );
        assert_eq!(graph.children_of(sun), vec![planet]);
    }

    #[test]
    fn test_parent_modifier_moves_child() {
        let mut graph = SceneGraph::new();
        let spinning = EntityDesc::new(Rc::new(HeadlessShader::new("s")), Rc::new(HeadlessMesh::new("m", 3)))
            .with_modifier(|model: &Mat4, time: &FrameTime| {
                model * Mat4::from_euler_degrees(&Vec3::new(0.0, 90.0 * time.elapsed, 0.0))
            });
        let center = graph.insert(RenderableEntity::new(spinning)).unwrap();
        let satellite = graph
            .insert(RenderableEntity::new(desc_at(Vec3::new(0.0, 0.0, 5.0)).with_parent(center)))
            .unwrap();

        let mut time = FrameTime::zero();
        time.advance(1.0);
        graph.propagate(&time);

        assert_relative_eq!(
            utils::translation_of(&graph.world_matrix(satellite).unwrap()),
            Vec3::new(5.0, 0.0, 0.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_modifier_waits_for_propagate() {
        let calls = Rc::new(Cell::new(0_u32));
        let counter = calls.clone();
        let lifted = desc_at(Vec3::new(1.0, 0.0, 0.0)).with_modifier(move |model: &Mat4, _: &FrameTime| {
            counter.set(counter.get() + 1);
            Mat4::from_translation_vector(&Vec3::new(0.0, 3.0, 0.0)) * model
        });

        let mut graph = SceneGraph::new();
        let id = graph.insert(RenderableEntity::new(lifted)).unwrap();
        assert_eq!(calls.get(), 0);
        assert_relative_eq!(
            utils::translation_of(&graph.world_matrix(id).unwrap()),
            Vec3::new(1.0, 0.0, 0.0)
        );

        graph.propagate(&FrameTime::zero());
        assert_eq!(calls.get(), 1);
        assert_relative_eq!(
            utils::translation_of(&graph.world_matrix(id).unwrap()),
            Vec3::new(1.0, 3.0, 0.0)
        );
    }

    #[test]
    fn test_remove_takes_subtree() {
        let mut graph = SceneGraph::new();
        let root = graph.insert(RenderableEntity::new(desc_at(Vec3::zeros()))).unwrap();
        let child = graph
            .insert(RenderableEntity::new(desc_at(Vec3::zeros()).with_parent(root)))
            .unwrap();
        graph
            .insert(RenderableEntity::new(desc_at(Vec3::zeros()).with_parent(child)))
            .unwrap();
        let other = graph.insert(RenderableEntity::new(desc_at(Vec3::zeros()))).unwrap();

        assert_eq!(graph.remove(root).unwrap(), 3);
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.ids(), &[other]);
        assert!(matches!(graph.remove(root), Err(SceneError::UnknownEntity(_))));
    }
}
