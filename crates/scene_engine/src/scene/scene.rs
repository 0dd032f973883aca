//! Scene: camera, entities, lights and the distributors wiring them together
//!
//! Entities added with forwarding options get their shader subscribed to the
//! camera distributor (`camera_position`) and to every light distributor.
//! Subscriptions are append-only and live as long as the scene.

use std::rc::Rc;

use crate::core::config::SceneConfig;
use crate::events::EventDistributor;
use crate::foundation::collections::EntityId;
use crate::foundation::math::Mat4;
use crate::foundation::time::FrameTime;
use crate::input::InputManager;
use crate::render::{Camera, Light, LightCounts, Shader, ShaderExt, Skybox};
use super::light_rig::{LightHandle, LightId, LightMut, LightRig, StoredLight};
use super::renderable_entity::{EntityDesc, RenderableEntity};
use super::scene_graph::SceneGraph;
use super::{AddEntityOptions, SceneError};

/// Uniform receiving the camera position for forwarding entities
pub const CAMERA_POSITION_UNIFORM: &str = "camera_position";

/// A renderable scene
#[derive(Debug)]
pub struct Scene {
    name: String,
    camera: Camera,
    camera_distributor: Rc<EventDistributor<Camera>>,
    graph: SceneGraph,
    lights: LightRig,
    skybox: Option<Rc<Skybox>>,
    time: FrameTime,
    spotlights_locked: bool,
}

impl Scene {
    /// Empty scene with the default camera, pulled back from the origin
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, &SceneConfig::default())
    }

    /// Empty scene built from its configuration
    pub fn with_config(name: impl Into<String>, config: &SceneConfig) -> Self {
        let camera_distributor = Rc::new(EventDistributor::new());
        let mut camera = Camera::new(&config.camera);

        let forward = Rc::clone(&camera_distributor);
        camera.set_notify_callback(move |camera: &Camera| forward.notify(camera));
        camera.move_forward(-config.camera_pullback);

        let mut scene = Self {
            name: name.into(),
            camera,
            camera_distributor,
            graph: SceneGraph::new(),
            lights: LightRig::new(),
            skybox: None,
            time: FrameTime::zero(),
            spotlights_locked: false,
        };
        scene.lock_spotlights_to_camera(config.lock_spotlights_to_camera);
        log::debug!("Created scene '{}'", scene.name);
        scene
    }

    /// Scene name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add an entity, wiring its shader to the distributors named in `options`
    ///
    /// # Errors
    /// [`SceneError::UnknownParent`] when the description names a parent that
    /// is not in this scene. Nothing is subscribed in that case.
    pub fn add_entity(&mut self, desc: EntityDesc, options: AddEntityOptions) -> Result<EntityId, SceneError> {
        if let Some(parent) = desc.parent {
            if !self.graph.contains(parent) {
                return Err(SceneError::UnknownParent(parent));
            }
        }

        let shader = Rc::clone(&desc.shader);
        if options.contains(AddEntityOptions::PASS_CAMERA_POSITION) {
            let camera_shader = Rc::clone(&shader);
            self.camera_distributor.subscribe(move |camera: &Camera| {
                camera_shader.set(CAMERA_POSITION_UNIFORM, camera.position());
            });
        }
        if options.contains(AddEntityOptions::PASS_LIGHTS) {
            self.lights.subscribe_shader(&shader);
        }

        let id = self.graph.insert(RenderableEntity::new(desc))?;
        log::debug!("Scene '{}': added entity {:?} ({:?})", self.name, id, options);
        Ok(id)
    }

    /// Remove an entity and its descendants; returns how many entities went away
    ///
    /// # Errors
    /// [`SceneError::UnknownEntity`] when `id` is not in this scene.
    pub fn remove_entity(&mut self, id: EntityId) -> Result<usize, SceneError> {
        let removed = self.graph.remove(id)?;
        log::debug!("Scene '{}': removed {} entities", self.name, removed);
        Ok(removed)
    }

    /// Entity by id
    pub fn entity(&self, id: EntityId) -> Option<&RenderableEntity> {
        self.graph.get(id)
    }

    /// Mutable entity by id
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut RenderableEntity> {
        self.graph.get_mut(id)
    }

    /// Number of entities
    pub fn entity_count(&self) -> usize {
        self.graph.len()
    }

    /// World matrix of `id` from the last transform pass
    pub fn world_matrix(&self, id: EntityId) -> Option<Mat4> {
        self.graph.world_matrix(id)
    }

    /// Entity arena
    pub const fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Add any light variant; `None` when its kind is already full
    pub fn add_light(&mut self, light: impl Into<Light>) -> Option<LightId> {
        self.lights.add_light(light.into())
    }

    /// Add a light of a known kind, returning a typed handle
    pub fn insert_light<L: StoredLight>(&mut self, light: L) -> Option<LightHandle<L>> {
        self.lights.add(light)
    }

    /// Mutable access to a held light; subscribers are updated when the guard drops
    pub fn light_mut<L: StoredLight>(&mut self, handle: LightHandle<L>) -> Option<LightMut<'_, L>> {
        self.lights.light_mut(handle)
    }

    /// Held light by handle
    pub fn light<L: StoredLight>(&self, handle: LightHandle<L>) -> Option<&L> {
        self.lights.get(handle)
    }

    /// Re-announce the kind of `handle` without changing it
    pub fn invoke_light<L: StoredLight>(&self, handle: LightHandle<L>) -> bool {
        self.lights.invoke(handle)
    }

    /// Held lights of one kind, in insertion order
    pub fn lights<L: StoredLight>(&self) -> &[L] {
        self.lights.lights()
    }

    /// Held light counts
    pub fn light_counts(&self) -> LightCounts {
        self.lights.counts()
    }

    /// Counter bumped on every light addition or change
    pub const fn light_generation(&self) -> u64 {
        self.lights.generation()
    }

    /// Subscribe an extra shader (not owned by an entity) to every light distributor
    pub fn subscribe_light_shader(&self, shader: &Rc<dyn Shader>) {
        self.lights.subscribe_shader(shader);
    }

    /// Set the background skybox
    pub fn set_skybox(&mut self, skybox: Rc<Skybox>) {
        self.skybox = Some(skybox);
    }

    /// Background skybox
    pub fn skybox(&self) -> Option<&Rc<Skybox>> {
        self.skybox.as_ref()
    }

    /// Scene camera
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable scene camera
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Frame time of the last update
    pub const fn frame_time(&self) -> &FrameTime {
        &self.time
    }

    /// Keep every spot light at the camera, pointing where it looks
    pub fn lock_spotlights_to_camera(&mut self, locked: bool) {
        self.spotlights_locked = locked;
        if locked {
            self.sync_spotlights();
        }
    }

    /// Whether spot lights follow the camera
    pub const fn spotlights_locked(&self) -> bool {
        self.spotlights_locked
    }

    fn sync_spotlights(&mut self) {
        self.lights
            .set_spot_poses(self.camera.position(), self.camera.target());
    }

    /// Advance one frame: camera, entity hooks, then the transform pass
    pub fn update(&mut self, input: &InputManager, delta_time: f32) {
        self.time.advance(delta_time);

        if self.camera.update(input, delta_time) && self.spotlights_locked {
            self.sync_spotlights();
        }

        self.graph.update_entities(delta_time);
        self.graph.propagate(&self.time);
    }

    /// Recompute every world matrix, parents before children
    pub fn propagate_transforms(&mut self) {
        self.graph.propagate(&self.time);
    }

    /// Re-announce the camera, every held light and the light counts
    ///
    /// Call after switching to this scene so shared shaders hold its state.
    pub fn invoke_distributors(&self) {
        self.camera.invoke();
        self.lights.invoke_all();
    }

    /// Draw the skybox, then every entity in insertion order
    pub fn render(&self, projection: &Mat4) {
        let view = self.camera.view_matrix();

        if let Some(skybox) = &self.skybox {
            skybox.render(projection, &view);
        }

        let view_projection = projection * view;
        for (_, entity) in self.graph.iter() {
            entity.render(&view_projection);
        }
        log::trace!("Scene '{}': rendered {} entities", self.name, self.graph.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CameraConfig;
    use crate::foundation::math::{utils, Mat4Ext, Vec3};
    use crate::input::KeyCode;
    use crate::render::headless::{CallLog, HeadlessMesh, HeadlessShader, HeadlessTexture};
    use crate::render::{PointLight, SpotLight, TextureKind, Uniform};
    use crate::scene::Transform;
    use approx::assert_relative_eq;

    fn entity(shader: &Rc<HeadlessShader>, log: &CallLog, mesh: &str) -> EntityDesc {
        EntityDesc::new(shader.clone(), Rc::new(HeadlessMesh::with_log(mesh, 6, log)))
    }

    #[test]
    fn test_new_scene_pulls_camera_back() {
        let scene = Scene::new("empty");
        // Default camera looks along +X
        assert_relative_eq!(scene.camera().position(), Vec3::new(-10.0, 0.0, 0.0), epsilon = 1e-5);
        assert_eq!(scene.entity_count(), 0);
    }

    #[test]
    fn test_invoke_distributors_resends_everything() {
        let log = CallLog::new();
        let shader = Rc::new(HeadlessShader::new("lit"));
        let mut scene = Scene::new("lit");
        scene.add_light(PointLight::at(Vec3::new(1.0, 0.0, 0.0)));
        scene.add_light(PointLight::at(Vec3::new(2.0, 0.0, 0.0)));
        scene
            .add_entity(entity(&shader, &log, "ball"), AddEntityOptions::forwarding())
            .unwrap();
        shader.clear_writes();

        scene.invoke_distributors();

        assert_eq!(shader.writes_to("light.point_lights[0].position"), 2);
        assert_eq!(shader.writes_to(CAMERA_POSITION_UNIFORM), 1);
        assert_eq!(
            shader.uniform(CAMERA_POSITION_UNIFORM),
            Some(Uniform::Vec3(scene.camera().position()))
        );
        assert_eq!(shader.int_uniform("light.num_point_lights"), Some(2));
    }

    #[test]
    fn test_light_added_after_entity_reaches_shader() {
        let log = CallLog::new();
        let shader = Rc::new(HeadlessShader::new("lit"));
        let mut scene = Scene::new("late light");
        scene
            .add_entity(entity(&shader, &log, "ball"), AddEntityOptions::PASS_LIGHTS)
            .unwrap();
        assert_eq!(shader.int_uniform("light.num_point_lights"), Some(0));

        let handle = scene.insert_light(PointLight::at(Vec3::new(0.0, 3.0, 0.0))).unwrap();
        assert_eq!(shader.int_uniform("light.num_point_lights"), Some(1));

        scene.light_mut(handle).unwrap().position = Vec3::new(0.0, 4.0, 0.0);
        assert_eq!(
            shader.uniform("light.point_lights[0].position"),
            Some(Uniform::Vec3(Vec3::new(0.0, 4.0, 0.0)))
        );
        assert_eq!(shader.writes_to(CAMERA_POSITION_UNIFORM), 0);
    }

    #[test]
    fn test_unknown_parent_makes_no_subscription() {
        let log = CallLog::new();
        let shader = Rc::new(HeadlessShader::new("lit"));
        let mut scene = Scene::new("orphan");
        let parent = scene
            .add_entity(entity(&shader, &log, "root"), AddEntityOptions::empty())
            .unwrap();
        scene.remove_entity(parent).unwrap();

        let orphan_shader = Rc::new(HeadlessShader::new("orphan"));
        let result = scene.add_entity(
            entity(&orphan_shader, &log, "child").with_parent(parent),
            AddEntityOptions::forwarding(),
        );

        assert!(matches!(result, Err(SceneError::UnknownParent(id)) if id == parent));
        scene.add_light(PointLight::default());
        scene.invoke_distributors();
        assert_eq!(orphan_shader.write_count(), 0);
    }

    #[test]
    fn test_skybox_renders_before_entities() {
        let log = CallLog::new();
        let mut scene = Scene::new("sky");
        let shader = Rc::new(HeadlessShader::with_log("lit", &log));
        scene
            .add_entity(entity(&shader, &log, "first"), AddEntityOptions::empty())
            .unwrap();
        scene
            .add_entity(entity(&shader, &log, "second"), AddEntityOptions::empty())
            .unwrap();
        scene.set_skybox(Rc::new(Skybox::new(
            Rc::new(HeadlessTexture::with_log("sky", TextureKind::CubeMap, &log)),
            Rc::new(HeadlessShader::with_log("skybox", &log)),
            Rc::new(HeadlessMesh::cube(&log)),
        )));

        scene.render(&Mat4::perspective(utils::deg_to_rad(45.0), 16.0 / 9.0, 0.1, 100.0));

        assert_eq!(log.drawn_meshes(), vec!["cube", "first", "second"]);
    }

    #[test]
    fn test_update_moves_camera_and_notifies() {
        let log = CallLog::new();
        let shader = Rc::new(HeadlessShader::new("lit"));
        let mut scene = Scene::new("walk");
        scene
            .add_entity(entity(&shader, &log, "ball"), AddEntityOptions::PASS_CAMERA_POSITION)
            .unwrap();

        let mut input = InputManager::new();
        input.handle_key_input(KeyCode::W, true);
        scene.update(&input, 1.0);

        let expected = Vec3::new(-5.0, 0.0, 0.0);
        assert_relative_eq!(scene.camera().position(), expected, epsilon = 1e-5);
        assert_eq!(shader.writes_to(CAMERA_POSITION_UNIFORM), 1);

        input.begin_frame();
        input.handle_key_input(KeyCode::W, false);
        scene.update(&input, 1.0);
        assert_eq!(shader.writes_to(CAMERA_POSITION_UNIFORM), 1);
        assert_eq!(scene.frame_time().frame, 2);
    }

    #[test]
    fn test_locked_spotlights_follow_camera() {
        let config = SceneConfig {
            camera: CameraConfig::default().with_position(Vec3::new(0.0, 1.0, 0.0)),
            camera_pullback: 0.0,
            lock_spotlights_to_camera: false,
        };
        let mut scene = Scene::with_config("torch", &config);
        let handle = scene.insert_light(SpotLight::default()).unwrap();

        scene.lock_spotlights_to_camera(true);
        let light = scene.light(handle).unwrap();
        assert_relative_eq!(light.position, Vec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(light.direction, scene.camera().target());

        let mut input = InputManager::new();
        input.handle_key_input(KeyCode::D, true);
        scene.update(&input, 1.0);

        let light = scene.light(handle).unwrap();
        assert_relative_eq!(light.position, scene.camera().position());
    }

    #[test]
    fn test_update_runs_hooks_then_propagates() {
        let log = CallLog::new();
        let shader = Rc::new(HeadlessShader::new("lit"));
        let mut scene = Scene::new("drift");
        let id = scene
            .add_entity(
                entity(&shader, &log, "ball")
                    .with_transform(Transform::identity())
                    .with_update(|transform: &mut Transform, dt: f32| {
                        transform.translate(Vec3::new(dt, 0.0, 0.0));
                    }),
                AddEntityOptions::empty(),
            )
            .unwrap();

        scene.update(&InputManager::new(), 0.5);
        scene.update(&InputManager::new(), 0.5);

        let world = scene.world_matrix(id).unwrap();
        assert_relative_eq!(utils::translation_of(&world), Vec3::new(1.0, 0.0, 0.0));
    }
}
