//! Ordered list of scenes with one active at a time

use super::scene::Scene;

/// Holds the demo's scenes and switches between them
///
/// Shaders are usually shared between scenes, so whatever scene ran last
/// left its camera and lights in them. Every activation re-broadcasts the
/// newly active scene's distributors.
#[derive(Debug, Default)]
pub struct SceneDirector {
    scenes: Vec<Scene>,
    active: Option<usize>,
}

impl SceneDirector {
    /// Director without scenes
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scene; the first scene added becomes active. Returns its index.
    ///
    /// Building `scene` may have written into shaders the active scene also
    /// uses, so the active scene is re-broadcast after every later add.
    pub fn add(&mut self, scene: Scene) -> usize {
        self.scenes.push(scene);
        let index = self.scenes.len() - 1;
        match self.active.and_then(|active| self.scenes.get(active)) {
            Some(active) => active.invoke_distributors(),
            None => {
                self.activate(index);
            }
        }
        index
    }

    /// Number of scenes
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether no scene was added
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Index of the active scene
    pub const fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Make `index` the active scene and resync its distributors
    ///
    /// Returns `false` (and leaves the active scene alone) for an unknown index.
    pub fn activate(&mut self, index: usize) -> bool {
        let Some(scene) = self.scenes.get(index) else {
            log::warn!("No scene at index {} ({} scenes)", index, self.scenes.len());
            return false;
        };

        scene.invoke_distributors();
        self.active = Some(index);
        log::info!("Activated scene #{} '{}'", index, scene.name());
        true
    }

    /// Activate the following scene, wrapping around
    pub fn next(&mut self) -> bool {
        match self.active {
            Some(index) if !self.scenes.is_empty() => self.activate((index + 1) % self.scenes.len()),
            _ => false,
        }
    }

    /// Activate the preceding scene, wrapping around
    pub fn previous(&mut self) -> bool {
        match self.active {
            Some(index) if !self.scenes.is_empty() => {
                let count = self.scenes.len();
                self.activate((index + count - 1) % count)
            }
            _ => false,
        }
    }

    /// Active scene
    pub fn active(&self) -> Option<&Scene> {
        self.active.and_then(|index| self.scenes.get(index))
    }

    /// Mutable active scene
    pub fn active_mut(&mut self) -> Option<&mut Scene> {
        self.active.and_then(|index| self.scenes.get_mut(index))
    }

    /// Scenes in insertion order
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::render::headless::{HeadlessMesh, HeadlessShader};
    use crate::render::{PointLight, Uniform};
    use crate::scene::{AddEntityOptions, EntityDesc};
    use std::rc::Rc;

    fn lit_scene(name: &str, shader: &Rc<HeadlessShader>, light_x: f32) -> Scene {
        let mut scene = Scene::new(name);
        scene.add_light(PointLight::at(Vec3::new(light_x, 0.0, 0.0)));
        scene
            .add_entity(
                EntityDesc::new(shader.clone(), Rc::new(HeadlessMesh::new("ball", 6))),
                AddEntityOptions::forwarding(),
            )
            .unwrap();
        scene
    }

    #[test]
    fn test_activation_resyncs_shared_shader() {
        let shader = Rc::new(HeadlessShader::new("shared"));
        let mut director = SceneDirector::new();
        director.add(lit_scene("first", &shader, 1.0));
        director.add(lit_scene("second", &shader, 2.0));
        assert_eq!(director.active_index(), Some(0));

        assert!(director.next());
        assert_eq!(
            shader.uniform("light.point_lights[0].position"),
            Some(Uniform::Vec3(Vec3::new(2.0, 0.0, 0.0)))
        );

        assert!(director.next());
        assert_eq!(director.active().map(Scene::name), Some("first"));
        assert_eq!(
            shader.uniform("light.point_lights[0].position"),
            Some(Uniform::Vec3(Vec3::new(1.0, 0.0, 0.0)))
        );
    }

    #[test]
    fn test_first_scene_keeps_its_lights_after_later_adds() {
        let shader = Rc::new(HeadlessShader::new("shared"));
        let mesh = Rc::new(HeadlessMesh::new("ball", 6));
        let build = |name: &str, light_x: f32| {
            let mut scene = Scene::new(name);
            scene
                .add_entity(EntityDesc::new(shader.clone(), mesh.clone()), AddEntityOptions::forwarding())
                .unwrap();
            scene.add_light(PointLight::at(Vec3::new(light_x, 0.0, 0.0)));
            scene
        };

        let mut director = SceneDirector::new();
        director.add(build("first", 1.0));
        director.add(build("second", 2.0));

        assert_eq!(director.active().map(Scene::name), Some("first"));
        assert_eq!(
            shader.uniform("light.point_lights[0].position"),
            Some(Uniform::Vec3(Vec3::new(1.0, 0.0, 0.0)))
        );
    }

    #[test]
    fn test_reactivating_same_scene_still_resyncs() {
        let shader = Rc::new(HeadlessShader::new("shared"));
        let mut director = SceneDirector::new();
        director.add(lit_scene("only", &shader, 1.0));
        shader.clear_writes();

        assert!(director.activate(0));
        assert_eq!(shader.writes_to("camera_position"), 1);
    }

    #[test]
    fn test_previous_wraps_and_bad_index_rejected() {
        let mut director = SceneDirector::new();
        assert!(!director.next());
        director.add(Scene::new("a"));
        director.add(Scene::new("b"));
        director.add(Scene::new("c"));

        assert!(director.previous());
        assert_eq!(director.active().map(Scene::name), Some("c"));
        assert!(!director.activate(7));
        assert_eq!(director.active_index(), Some(2));
    }
}
