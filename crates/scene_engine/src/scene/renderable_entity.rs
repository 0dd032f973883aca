//! Renderable entity: mesh + shader + textures + material + transform
//!
//! An entity renders itself given a view-projection matrix. Its world matrix
//! is not computed here; the scene graph writes it once per frame as
//! `parent_world * modifier(transform.model_matrix(), frame_time)`.

use std::fmt;
use std::rc::Rc;

use crate::foundation::collections::EntityId;
use crate::foundation::math::{utils, Mat4};
use crate::foundation::time::FrameTime;
use crate::render::{Material, Mesh, Shader, ShaderExt, Texture};
use super::transform::Transform;

/// Per-frame procedural animation: maps the entity's model matrix to a new one
pub type TransformModifier = Box<dyn FnMut(&Mat4, &FrameTime) -> Mat4>;

/// Per-frame hook allowed to mutate the entity's own transform
pub type UpdateHook = Box<dyn FnMut(&mut Transform, f32)>;

/// Everything needed to add an entity to a scene
pub struct EntityDesc {
    /// Shader program
    pub shader: Rc<dyn Shader>,
    /// Geometry
    pub mesh: Rc<dyn Mesh>,
    /// Textures bound to slots `0..N` in order
    pub textures: Vec<Rc<dyn Texture>>,
    /// Local transform
    pub transform: Transform,
    /// Optional surface material
    pub material: Option<Rc<dyn Material>>,
    /// Optional model-matrix modifier; identity when absent
    pub modifier: Option<TransformModifier>,
    /// Optional per-frame update hook
    pub update: Option<UpdateHook>,
    /// Parent entity, which must already be in the scene
    pub parent: Option<EntityId>,
}

impl EntityDesc {
    /// Untextured, unparented entity at the origin
    pub fn new(shader: Rc<dyn Shader>, mesh: Rc<dyn Mesh>) -> Self {
        Self {
            shader,
            mesh,
            textures: Vec::new(),
            transform: Transform::identity(),
            material: None,
            modifier: None,
            update: None,
            parent: None,
        }
    }

    /// Append a texture (next free slot)
    pub fn with_texture(mut self, texture: Rc<dyn Texture>) -> Self {
        self.textures.push(texture);
        self
    }

    /// Replace the texture list
    pub fn with_textures(mut self, textures: Vec<Rc<dyn Texture>>) -> Self {
        self.textures = textures;
        self
    }

    /// Set the local transform
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Set the material
    pub fn with_material(mut self, material: Rc<dyn Material>) -> Self {
        self.material = Some(material);
        self
    }

    /// Set the model-matrix modifier
    pub fn with_modifier<F>(mut self, modifier: F) -> Self
    where
        F: FnMut(&Mat4, &FrameTime) -> Mat4 + 'static,
    {
        self.modifier = Some(Box::new(modifier));
        self
    }

    /// Set the per-frame update hook
    pub fn with_update<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut Transform, f32) + 'static,
    {
        self.update = Some(Box::new(hook));
        self
    }

    /// Attach to a parent entity
    pub fn with_parent(mut self, parent: EntityId) -> Self {
        self.parent = Some(parent);
        self
    }
}

impl fmt::Debug for EntityDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityDesc")
            .field("transform", &self.transform)
            .field("textures", &self.textures.len())
            .field("has_material", &self.material.is_some())
            .field("has_modifier", &self.modifier.is_some())
            .field("parent", &self.parent)
            .finish_non_exhaustive()
    }
}

/// Drawable scene entity
pub struct RenderableEntity {
    shader: Rc<dyn Shader>,
    mesh: Rc<dyn Mesh>,
    textures: Vec<Rc<dyn Texture>>,
    transform: Transform,
    material: Option<Rc<dyn Material>>,
    modifier: Option<TransformModifier>,
    update: Option<UpdateHook>,
    parent: Option<EntityId>,
    world: Mat4,
}

impl RenderableEntity {
    /// Build an entity from its description; the world matrix starts as the bare model matrix
    pub fn new(desc: EntityDesc) -> Self {
        let world = desc.transform.model_matrix();
        Self {
            shader: desc.shader,
            mesh: desc.mesh,
            textures: desc.textures,
            transform: desc.transform,
            material: desc.material,
            modifier: desc.modifier,
            update: desc.update,
            parent: desc.parent,
            world,
        }
    }

    /// Local transform
    pub const fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Mutable local transform
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Shader program
    pub fn shader(&self) -> &Rc<dyn Shader> {
        &self.shader
    }

    /// Geometry
    pub fn mesh(&self) -> &Rc<dyn Mesh> {
        &self.mesh
    }

    /// Textures in slot order
    pub fn textures(&self) -> &[Rc<dyn Texture>] {
        &self.textures
    }

    /// Material, if any
    pub fn material(&self) -> Option<&Rc<dyn Material>> {
        self.material.as_ref()
    }

    /// Replace the material
    pub fn set_material(&mut self, material: Option<Rc<dyn Material>>) {
        self.material = material;
    }

    /// Replace the model-matrix modifier
    pub fn set_modifier<F>(&mut self, modifier: F)
    where
        F: FnMut(&Mat4, &FrameTime) -> Mat4 + 'static,
    {
        self.modifier = Some(Box::new(modifier));
    }

    /// Drop the modifier (identity)
    pub fn clear_modifier(&mut self) {
        self.modifier = None;
    }

    /// Parent entity
    pub const fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    /// World matrix from the last scene-graph pass
    pub const fn world_matrix(&self) -> &Mat4 {
        &self.world
    }

    pub(crate) fn set_world_matrix(&mut self, world: Mat4) {
        self.world = world;
    }

    /// Model matrix after the modifier, before parent chaining
    pub fn local_matrix(&mut self, time: &FrameTime) -> Mat4 {
        let model = self.transform.model_matrix();
        match self.modifier.as_mut() {
            Some(modifier) => modifier(&model, time),
            None => model,
        }
    }

    /// Per-frame hook
    pub fn update(&mut self, delta_time: f32) {
        if let Some(hook) = self.update.as_mut() {
            hook(&mut self.transform, delta_time);
        }
    }

    /// Draw with the cached world matrix
    pub fn render(&self, view_projection: &Mat4) {
        let shader = self.shader.as_ref();
        shader.bind();
        shader.set("model_matrix", self.world);
        shader.set("mvp_matrix", view_projection * self.world);
        shader.set("normal_matrix", utils::normal_matrix(&self.world));

        if let Some(material) = &self.material {
            material.apply(shader);
        }

        for (slot, texture) in (0_u32..).zip(&self.textures) {
            texture.bind(slot);
        }

        self.mesh.bind();
        self.mesh.draw_indexed(self.mesh.index_count());
    }
}

impl fmt::Debug for RenderableEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderableEntity")
            .field("transform", &self.transform)
            .field("parent", &self.parent)
            .field("textures", &self.textures.len())
            .field("has_material", &self.material.is_some())
            .field("has_modifier", &self.modifier.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Mat3, Mat4Ext, Vec3};
    use crate::render::headless::{CallLog, HeadlessMesh, HeadlessShader, HeadlessTexture, RenderCall};
    use crate::render::{PhongBlinnMaterial, TextureKind, Uniform};
    use approx::assert_relative_eq;

    #[test]
    fn test_render_pushes_matrices_and_draws() {
        let log = CallLog::new();
        let shader = Rc::new(HeadlessShader::with_log("lit", &log));
        let desc = EntityDesc::new(shader.clone(), Rc::new(HeadlessMesh::with_log("ball", 960, &log)))
            .with_transform(Transform::from_position(Vec3::new(1.0, 2.0, 3.0)))
            .with_material(Rc::new(PhongBlinnMaterial::default()))
            .with_texture(Rc::new(HeadlessTexture::with_log("albedo", TextureKind::Texture2D, &log)))
            .with_texture(Rc::new(HeadlessTexture::with_log("normal", TextureKind::Texture2D, &log)));
        let entity = RenderableEntity::new(desc);

        let view_projection = Mat4::from_scale_vector(&Vec3::new(2.0, 2.0, 2.0));
        entity.render(&view_projection);

        let model = Mat4::from_translation_vector(&Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(shader.uniform("model_matrix"), Some(Uniform::Mat4(model)));
        assert_eq!(shader.uniform("mvp_matrix"), Some(Uniform::Mat4(view_projection * model)));
        assert_eq!(shader.uniform("normal_matrix"), Some(Uniform::Mat3(Mat3::identity())));
        assert_eq!(shader.writes_with_prefix("material."), 4);

        assert_eq!(
            log.calls(),
            vec![
                RenderCall::BindShader("lit".into()),
                RenderCall::BindTexture { name: "albedo".into(), slot: 0 },
                RenderCall::BindTexture { name: "normal".into(), slot: 1 },
                RenderCall::BindMesh("ball".into()),
                RenderCall::Draw { mesh: "ball".into(), count: 960 },
            ]
        );
    }

    #[test]
    fn test_modifier_receives_model_and_time() {
        let shader = Rc::new(HeadlessShader::new("s"));
        let desc = EntityDesc::new(shader, Rc::new(HeadlessMesh::new("m", 3)))
            .with_transform(Transform::from_position(Vec3::new(1.0, 0.0, 0.0)))
            .with_modifier(|model: &Mat4, time: &FrameTime| {
                Mat4::from_translation_vector(&Vec3::new(0.0, time.elapsed, 0.0)) * model
            });
        let mut entity = RenderableEntity::new(desc);

        let mut time = FrameTime::zero();
        time.advance(2.0);
        let local = entity.local_matrix(&time);

        assert_relative_eq!(utils::translation_of(&local), Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_no_modifier_is_identity() {
        let desc = EntityDesc::new(Rc::new(HeadlessShader::new("s")), Rc::new(HeadlessMesh::new("m", 3)))
            .with_transform(Transform::identity().with_uniform_scale(3.0));
        let mut entity = RenderableEntity::new(desc);
        assert_eq!(entity.local_matrix(&FrameTime::zero()), entity.transform().model_matrix());
    }

    #[test]
    fn test_update_hook_mutates_transform() {
        let desc = EntityDesc::new(Rc::new(HeadlessShader::new("s")), Rc::new(HeadlessMesh::new("m", 3)))
            .with_update(|transform: &mut Transform, dt: f32| {
                transform.rotate(Vec3::new(0.0, 90.0 * dt, 0.0));
            });
        let mut entity = RenderableEntity::new(desc);

        entity.update(0.5);
        entity.update(0.5);
        assert_relative_eq!(entity.transform().rotation.y, 90.0);
    }
}
