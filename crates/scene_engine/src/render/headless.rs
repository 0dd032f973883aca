//! Headless rendering backend
//!
//! Implements the render traits without a GPU. Every bind, uniform write and
//! draw is recorded so scenes can be driven and inspected from tests and from
//! the demo harness.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use super::mesh::Mesh;
use super::shader::{Shader, Uniform};
use super::texture::{Texture, TextureKind};

/// One recorded backend call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCall {
    /// A shader program was made current
    BindShader(String),
    /// A texture was bound to a slot
    BindTexture {
        /// Texture name
        name: String,
        /// Texture unit
        slot: u32,
    },
    /// A mesh was bound
    BindMesh(String),
    /// An indexed draw was issued
    Draw {
        /// Mesh name
        mesh: String,
        /// Index count
        count: u32,
    },
}

/// Shared, ordered record of backend calls
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<RenderCall>>>);

impl CallLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, call: RenderCall) {
        self.0.borrow_mut().push(call);
    }

    /// Snapshot of every recorded call
    pub fn calls(&self) -> Vec<RenderCall> {
        self.0.borrow().clone()
    }

    /// Names of the meshes drawn, in draw order
    pub fn drawn_meshes(&self) -> Vec<String> {
        self.0
            .borrow()
            .iter()
            .filter_map(|call| match call {
                RenderCall::Draw { mesh, .. } => Some(mesh.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded calls
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Forget every recorded call
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// Shader that stores uniform values instead of uploading them
#[derive(Debug)]
pub struct HeadlessShader {
    name: String,
    log: CallLog,
    declared: Option<HashSet<String>>,
    uniforms: RefCell<HashMap<String, Uniform>>,
    writes: RefCell<Vec<(String, Uniform)>>,
    binds: Cell<u32>,
}

impl HeadlessShader {
    /// Create a shader with its own call log that accepts any uniform name
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_log(name, &CallLog::new())
    }

    /// Create a shader that records into a shared call log
    pub fn with_log(name: impl Into<String>, log: &CallLog) -> Self {
        Self {
            name: name.into(),
            log: log.clone(),
            declared: None,
            uniforms: RefCell::new(HashMap::new()),
            writes: RefCell::new(Vec::new()),
            binds: Cell::new(0),
        }
    }

    /// Only accept the given uniform names; writes to anything else are dropped
    pub fn with_declared_uniforms<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declared = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Shader name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Latest value written to `name`
    pub fn uniform(&self, name: &str) -> Option<Uniform> {
        self.uniforms.borrow().get(name).copied()
    }

    /// Latest integer value written to `name`
    pub fn int_uniform(&self, name: &str) -> Option<i32> {
        match self.uniform(name) {
            Some(Uniform::Int(value)) => Some(value),
            _ => None,
        }
    }

    /// Every accepted write, in order
    pub fn writes(&self) -> Vec<(String, Uniform)> {
        self.writes.borrow().clone()
    }

    /// Number of accepted writes
    pub fn write_count(&self) -> usize {
        self.writes.borrow().len()
    }

    /// Number of accepted writes to exactly `name`
    pub fn writes_to(&self, name: &str) -> usize {
        self.writes
            .borrow()
            .iter()
            .filter(|(written, _)| written == name)
            .count()
    }

    /// Number of accepted writes whose name starts with `prefix`
    pub fn writes_with_prefix(&self, prefix: &str) -> usize {
        self.writes
            .borrow()
            .iter()
            .filter(|(written, _)| written.starts_with(prefix))
            .count()
    }

    /// How many times the program was bound
    pub fn bind_count(&self) -> u32 {
        self.binds.get()
    }

    /// Forget the write history (current values are kept)
    pub fn clear_writes(&self) {
        self.writes.borrow_mut().clear();
    }
}

impl Shader for HeadlessShader {
    fn bind(&self) {
        self.binds.set(self.binds.get() + 1);
        self.log.push(RenderCall::BindShader(self.name.clone()));
    }

    fn set_uniform(&self, name: &str, value: Uniform) {
        if let Some(declared) = &self.declared {
            if !declared.contains(name) {
                log::trace!("Shader '{}' ignores unknown uniform '{}'", self.name, name);
                return;
            }
        }
        self.uniforms.borrow_mut().insert(name.to_string(), value);
        self.writes.borrow_mut().push((name.to_string(), value));
    }
}

/// Mesh that only knows its index count
#[derive(Debug)]
pub struct HeadlessMesh {
    name: String,
    index_count: u32,
    log: CallLog,
    draws: Cell<u32>,
}

impl HeadlessMesh {
    /// Create a mesh with its own call log
    pub fn new(name: impl Into<String>, index_count: u32) -> Self {
        Self::with_log(name, index_count, &CallLog::new())
    }

    /// Create a mesh that records into a shared call log
    pub fn with_log(name: impl Into<String>, index_count: u32, log: &CallLog) -> Self {
        Self {
            name: name.into(),
            index_count,
            log: log.clone(),
            draws: Cell::new(0),
        }
    }

    /// Unit cube (12 triangles)
    pub fn cube(log: &CallLog) -> Self {
        Self::with_log("cube", 36, log)
    }

    /// Mesh name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of draw calls issued
    pub fn draw_count(&self) -> u32 {
        self.draws.get()
    }
}

impl Mesh for HeadlessMesh {
    fn bind(&self) {
        self.log.push(RenderCall::BindMesh(self.name.clone()));
    }

    fn index_count(&self) -> u32 {
        self.index_count
    }

    fn draw_indexed(&self, count: u32) {
        self.draws.set(self.draws.get() + 1);
        self.log.push(RenderCall::Draw {
            mesh: self.name.clone(),
            count,
        });
    }
}

/// Texture that records the slots it gets bound to
#[derive(Debug)]
pub struct HeadlessTexture {
    name: String,
    kind: TextureKind,
    log: CallLog,
    slots: RefCell<Vec<u32>>,
}

impl HeadlessTexture {
    /// Create a texture with its own call log
    pub fn new(name: impl Into<String>, kind: TextureKind) -> Self {
        Self::with_log(name, kind, &CallLog::new())
    }

    /// Create a texture that records into a shared call log
    pub fn with_log(name: impl Into<String>, kind: TextureKind, log: &CallLog) -> Self {
        Self {
            name: name.into(),
            kind,
            log: log.clone(),
            slots: RefCell::new(Vec::new()),
        }
    }

    /// Texture name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Slots this texture was bound to, in order
    pub fn bound_slots(&self) -> Vec<u32> {
        self.slots.borrow().clone()
    }
}

impl Texture for HeadlessTexture {
    fn bind(&self, slot: u32) {
        self.slots.borrow_mut().push(slot);
        self.log.push(RenderCall::BindTexture {
            name: self.name.clone(),
            slot,
        });
    }

    fn kind(&self) -> TextureKind {
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::shader::ShaderExt;

    #[test]
    fn test_shader_records_writes() {
        let shader = HeadlessShader::new("basic");
        shader.set("light.num_point_lights", 2);
        shader.set("light.num_point_lights", 3);

        assert_eq!(shader.int_uniform("light.num_point_lights"), Some(3));
        assert_eq!(shader.writes_to("light.num_point_lights"), 2);
    }

    #[test]
    fn test_undeclared_uniforms_are_ignored() {
        let shader = HeadlessShader::new("skybox").with_declared_uniforms(["view_projection_matrix"]);
        shader.set("camera_position", 1.0_f32);
        assert_eq!(shader.write_count(), 0);
        assert!(shader.uniform("camera_position").is_none());
    }

    #[test]
    fn test_shared_log_orders_calls() {
        let log = CallLog::new();
        let shader = HeadlessShader::with_log("s", &log);
        let mesh = HeadlessMesh::with_log("m", 6, &log);
        let texture = HeadlessTexture::with_log("t", TextureKind::Texture2D, &log);

        shader.bind();
        texture.bind(0);
        mesh.bind();
        mesh.draw_indexed(mesh.index_count());

        assert_eq!(
            log.calls(),
            vec![
                RenderCall::BindShader("s".into()),
                RenderCall::BindTexture { name: "t".into(), slot: 0 },
                RenderCall::BindMesh("m".into()),
                RenderCall::Draw { mesh: "m".into(), count: 6 },
            ]
        );
        assert_eq!(log.drawn_meshes(), vec!["m".to_string()]);
    }
}
