//! Lighting system
//!
//! Three light variants, each with a fixed per-kind cap and its own uniform
//! array in the lit shaders:
//!
//! | kind        | array uniform               | count uniform                   |
//! |-------------|-----------------------------|---------------------------------|
//! | point       | `light.point_lights`        | `light.num_point_lights`        |
//! | spot        | `light.spot_lights`         | `light.num_spot_lights`         |
//! | directional | `light.directional_lights`  | `light.num_directional_lights`  |

use std::fmt;

use crate::foundation::math::Vec3;
use super::shader::{Shader, ShaderExt};

/// Maximum number of point lights a scene holds
pub const MAX_POINT_LIGHTS: usize = 4;
/// Maximum number of spot lights a scene holds
pub const MAX_SPOT_LIGHTS: usize = 4;
/// Maximum number of directional lights a scene holds
pub const MAX_DIRECTIONAL_LIGHTS: usize = 4;

/// Behaviour shared by every light variant
pub trait LightKind: Clone + fmt::Debug + 'static {
    /// Per-kind cap on lights held by a scene
    const MAX: usize;
    /// Name of the uniform array holding this kind's blocks
    const ARRAY_UNIFORM: &'static str;
    /// Name of the integer uniform holding this kind's count
    const COUNT_UNIFORM: &'static str;
    /// Human-readable kind name for logs
    const KIND_NAME: &'static str;

    /// Push this light's uniform block at `index` of the array
    fn write_uniforms(&self, shader: &dyn Shader, index: usize);
}

fn block_prefix<L: LightKind>(index: usize) -> String {
    format!("{}[{}]", L::ARRAY_UNIFORM, index)
}

fn write_intensity(shader: &dyn Shader, prefix: &str, ambient: f32, diffuse: f32, specular: f32) {
    shader.set(&format!("{prefix}.intensity.ambient"), ambient);
    shader.set(&format!("{prefix}.intensity.diffuse"), diffuse);
    shader.set(&format!("{prefix}.intensity.specular"), specular);
}

/// Clamp a light count into the `int` range used by shader uniforms
pub fn count_uniform(count: usize) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

/// Re-push every held light of a kind at its own index, then that kind's count
pub fn upload_lights<L: LightKind>(shader: &dyn Shader, lights: &[L]) {
    for (index, light) in lights.iter().enumerate() {
        light.write_uniforms(shader, index);
    }
    shader.set(L::COUNT_UNIFORM, count_uniform(lights.len()));
}

/// Omnidirectional light with a finite illumination radius
#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    /// World position
    pub position: Vec3,
    /// Light colour
    pub color: Vec3,
    /// Ambient term intensity
    pub ambient_intensity: f32,
    /// Diffuse term intensity
    pub diffuse_intensity: f32,
    /// Specular term intensity
    pub specular_intensity: f32,
    /// Distance beyond which the light has no effect
    pub illumination_radius: f32,
}

impl PointLight {
    /// Default point light placed at `position`
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Set the position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set the colour
    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    /// Set ambient, diffuse and specular intensities
    pub fn with_intensities(mut self, ambient: f32, diffuse: f32, specular: f32) -> Self {
        self.ambient_intensity = ambient;
        self.diffuse_intensity = diffuse;
        self.specular_intensity = specular;
        self
    }

    /// Set the illumination radius
    pub fn with_illumination_radius(mut self, radius: f32) -> Self {
        self.illumination_radius = radius;
        self
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            color: Vec3::new(1.0, 1.0, 1.0),
            ambient_intensity: 0.1,
            diffuse_intensity: 1.0,
            specular_intensity: 1.0,
            illumination_radius: 100.0,
        }
    }
}

impl LightKind for PointLight {
    const MAX: usize = MAX_POINT_LIGHTS;
    const ARRAY_UNIFORM: &'static str = "light.point_lights";
    const COUNT_UNIFORM: &'static str = "light.num_point_lights";
    const KIND_NAME: &'static str = "point";

    fn write_uniforms(&self, shader: &dyn Shader, index: usize) {
        let prefix = block_prefix::<Self>(index);
        shader.set(&format!("{prefix}.position"), self.position);
        shader.set(&format!("{prefix}.color"), self.color);
        write_intensity(
            shader,
            &prefix,
            self.ambient_intensity,
            self.diffuse_intensity,
            self.specular_intensity,
        );
        shader.set(&format!("{prefix}.illumination_radius"), self.illumination_radius);
    }
}

/// Cone-shaped light; cone angles are in degrees
#[derive(Debug, Clone, PartialEq)]
pub struct SpotLight {
    /// World position
    pub position: Vec3,
    /// Cone axis
    pub direction: Vec3,
    /// Light colour
    pub color: Vec3,
    /// Ambient term intensity
    pub ambient_intensity: f32,
    /// Diffuse term intensity
    pub diffuse_intensity: f32,
    /// Specular term intensity
    pub specular_intensity: f32,
    /// Distance beyond which the light has no effect
    pub illumination_radius: f32,
    /// Full-intensity cone half-angle
    pub inner_cone_angle_degrees: f32,
    /// Falloff cone half-angle
    pub outer_cone_angle_degrees: f32,
}

impl SpotLight {
    /// Set position and direction at once
    pub fn with_pose(mut self, position: Vec3, direction: Vec3) -> Self {
        self.position = position;
        self.direction = direction;
        self
    }

    /// Set the colour
    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    /// Set ambient, diffuse and specular intensities
    pub fn with_intensities(mut self, ambient: f32, diffuse: f32, specular: f32) -> Self {
        self.ambient_intensity = ambient;
        self.diffuse_intensity = diffuse;
        self.specular_intensity = specular;
        self
    }

    /// Set the illumination radius
    pub fn with_illumination_radius(mut self, radius: f32) -> Self {
        self.illumination_radius = radius;
        self
    }

    /// Set inner and outer cone angles (degrees)
    pub fn with_cone_degrees(mut self, inner: f32, outer: f32) -> Self {
        self.inner_cone_angle_degrees = inner;
        self.outer_cone_angle_degrees = outer;
        self
    }
}

impl Default for SpotLight {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            direction: Vec3::zeros(),
            color: Vec3::new(1.0, 1.0, 1.0),
            ambient_intensity: 0.0,
            diffuse_intensity: 1.0,
            specular_intensity: 1.0,
            illumination_radius: 100.0,
            inner_cone_angle_degrees: 10.0,
            outer_cone_angle_degrees: 25.0,
        }
    }
}

impl LightKind for SpotLight {
    const MAX: usize = MAX_SPOT_LIGHTS;
    const ARRAY_UNIFORM: &'static str = "light.spot_lights";
    const COUNT_UNIFORM: &'static str = "light.num_spot_lights";
    const KIND_NAME: &'static str = "spot";

    fn write_uniforms(&self, shader: &dyn Shader, index: usize) {
        let prefix = block_prefix::<Self>(index);
        shader.set(&format!("{prefix}.position"), self.position);
        shader.set(&format!("{prefix}.direction"), self.direction);
        shader.set(&format!("{prefix}.color"), self.color);
        write_intensity(
            shader,
            &prefix,
            self.ambient_intensity,
            self.diffuse_intensity,
            self.specular_intensity,
        );
        shader.set(&format!("{prefix}.illumination_radius"), self.illumination_radius);
        shader.set(&format!("{prefix}.inner_cone_angle_degrees"), self.inner_cone_angle_degrees);
        shader.set(&format!("{prefix}.outer_cone_angle_degrees"), self.outer_cone_angle_degrees);
    }
}

/// Light at infinity (sunlight)
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    /// Direction the light travels in
    pub direction: Vec3,
    /// Light colour
    pub color: Vec3,
    /// Ambient term intensity
    pub ambient_intensity: f32,
    /// Diffuse term intensity
    pub diffuse_intensity: f32,
    /// Specular term intensity
    pub specular_intensity: f32,
}

impl DirectionalLight {
    /// Default directional light travelling along `direction`
    pub fn along(direction: Vec3) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    /// Set the colour
    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    /// Set ambient, diffuse and specular intensities
    pub fn with_intensities(mut self, ambient: f32, diffuse: f32, specular: f32) -> Self {
        self.ambient_intensity = ambient;
        self.diffuse_intensity = diffuse;
        self.specular_intensity = specular;
        self
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: Vec3::zeros(),
            color: Vec3::new(1.0, 1.0, 1.0),
            ambient_intensity: 0.1,
            diffuse_intensity: 1.0,
            specular_intensity: 1.0,
        }
    }
}

impl LightKind for DirectionalLight {
    const MAX: usize = MAX_DIRECTIONAL_LIGHTS;
    const ARRAY_UNIFORM: &'static str = "light.directional_lights";
    const COUNT_UNIFORM: &'static str = "light.num_directional_lights";
    const KIND_NAME: &'static str = "directional";

    fn write_uniforms(&self, shader: &dyn Shader, index: usize) {
        let prefix = block_prefix::<Self>(index);
        shader.set(&format!("{prefix}.direction"), self.direction);
        shader.set(&format!("{prefix}.color"), self.color);
        write_intensity(
            shader,
            &prefix,
            self.ambient_intensity,
            self.diffuse_intensity,
            self.specular_intensity,
        );
    }
}

/// Any light variant
#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    /// Point light
    Point(PointLight),
    /// Spot light
    Spot(SpotLight),
    /// Directional light
    Directional(DirectionalLight),
}

impl Light {
    /// Push the light's uniform block at `index` of its kind's array
    pub fn write_uniforms(&self, shader: &dyn Shader, index: usize) {
        match self {
            Self::Point(light) => light.write_uniforms(shader, index),
            Self::Spot(light) => light.write_uniforms(shader, index),
            Self::Directional(light) => light.write_uniforms(shader, index),
        }
    }

    /// Kind name for logs
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Point(_) => PointLight::KIND_NAME,
            Self::Spot(_) => SpotLight::KIND_NAME,
            Self::Directional(_) => DirectionalLight::KIND_NAME,
        }
    }
}

impl From<PointLight> for Light {
    fn from(light: PointLight) -> Self {
        Self::Point(light)
    }
}

impl From<SpotLight> for Light {
    fn from(light: SpotLight) -> Self {
        Self::Spot(light)
    }
}

impl From<DirectionalLight> for Light {
    fn from(light: DirectionalLight) -> Self {
        Self::Directional(light)
    }
}

/// Number of held lights per kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LightCounts {
    /// Point lights
    pub point: usize,
    /// Spot lights
    pub spot: usize,
    /// Directional lights
    pub directional: usize,
}

impl LightCounts {
    /// Write all three count uniforms
    pub fn upload(&self, shader: &dyn Shader) {
        shader.set(PointLight::COUNT_UNIFORM, count_uniform(self.point));
        shader.set(SpotLight::COUNT_UNIFORM, count_uniform(self.spot));
        shader.set(DirectionalLight::COUNT_UNIFORM, count_uniform(self.directional));
    }
}
