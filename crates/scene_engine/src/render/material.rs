//! Material system for rendering

use crate::foundation::math::Vec3;
use super::shader::{Shader, ShaderExt};

/// Shading model implemented by a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    /// Blinn-Phong lighting with ambient/diffuse/specular colours
    PhongBlinn,
}

/// Surface parameters pushed into a shader before drawing
pub trait Material {
    /// Write this material's uniforms into `shader`
    fn apply(&self, shader: &dyn Shader);

    /// Shading model of this material
    fn kind(&self) -> MaterialKind;
}

/// Blinn-Phong material properties
#[derive(Debug, Clone, PartialEq)]
pub struct PhongBlinnMaterial {
    /// Colour under ambient light
    pub ambient_color: Vec3,
    /// Colour under direct light
    pub diffuse_color: Vec3,
    /// Highlight colour
    pub specular_color: Vec3,
    /// Specular exponent
    pub specular_shininess: f32,
}

impl PhongBlinnMaterial {
    /// Create a new material with default properties (white, shininess 32)
    pub fn new() -> Self {
        Self {
            ambient_color: Vec3::new(1.0, 1.0, 1.0),
            diffuse_color: Vec3::new(1.0, 1.0, 1.0),
            specular_color: Vec3::new(1.0, 1.0, 1.0),
            specular_shininess: 32.0,
        }
    }

    /// Single colour used for the ambient, diffuse and specular terms
    pub fn uniform_color(color: Vec3, specular_shininess: f32) -> Self {
        Self {
            ambient_color: color,
            diffuse_color: color,
            specular_color: color,
            specular_shininess,
        }
    }

    /// Set the ambient colour
    pub fn with_ambient_color(mut self, color: Vec3) -> Self {
        self.ambient_color = color;
        self
    }

    /// Set the diffuse colour
    pub fn with_diffuse_color(mut self, color: Vec3) -> Self {
        self.diffuse_color = color;
        self
    }

    /// Set the specular colour
    pub fn with_specular_color(mut self, color: Vec3) -> Self {
        self.specular_color = color;
        self
    }

    /// Set the specular exponent
    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.specular_shininess = shininess.max(0.0);
        self
    }
}

impl Default for PhongBlinnMaterial {
    fn default() -> Self {
        Self::new()
    }
}

impl Material for PhongBlinnMaterial {
    fn apply(&self, shader: &dyn Shader) {
        shader.set("material.ambient_color", self.ambient_color);
        shader.set("material.diffuse_color", self.diffuse_color);
        shader.set("material.specular_color", self.specular_color);
        shader.set("material.specular_shininess", self.specular_shininess);
    }

    fn kind(&self) -> MaterialKind {
        MaterialKind::PhongBlinn
    }
}
