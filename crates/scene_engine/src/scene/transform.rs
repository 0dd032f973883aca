//! Entity transform
//!
//! Position, Euler-degree rotation and scale composed into a model matrix as
//! `T(position) * R(rotation) * S(scale)`.
//!
//! # Rotation Convention
//! The Euler vector is turned into a single quaternion (`x` roll, `y` pitch,
//! `z` yaw, i.e. `R = Rz * Ry * Rx`), never into three chained axis rotations.
//! The same conversion backs [`Mat4Compositor::rotate`](super::Mat4Compositor::rotate).

use serde::{Deserialize, Serialize};

use crate::foundation::math::{utils, Mat4, Mat4Ext, Quat, Vec3};

/// Translate/rotate/scale value owned by a renderable entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Translation
    pub position: Vec3,
    /// Euler angles in degrees
    pub rotation: Vec3,
    /// Per-axis scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Builder pattern: Set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder pattern: Set rotation (Euler degrees)
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: Set scale (non-uniform)
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Builder pattern: Set scale (uniform)
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }

    /// Add `offset` to the position
    pub fn translate(&mut self, offset: Vec3) -> &mut Self {
        self.position += offset;
        self
    }

    /// Add `euler_degrees` to the rotation
    pub fn rotate(&mut self, euler_degrees: Vec3) -> &mut Self {
        self.rotation += euler_degrees;
        self
    }

    /// Multiply the scale component-wise by `factors`
    pub fn scale(&mut self, factors: Vec3) -> &mut Self {
        self.scale.component_mul_assign(&factors);
        self
    }

    /// Translated copy
    #[must_use]
    pub fn translate_copy(&self, offset: Vec3) -> Self {
        let mut copy = *self;
        copy.translate(offset);
        copy
    }

    /// Rotated copy
    #[must_use]
    pub fn rotate_copy(&self, euler_degrees: Vec3) -> Self {
        let mut copy = *self;
        copy.rotate(euler_degrees);
        copy
    }

    /// Scaled copy
    #[must_use]
    pub fn scale_copy(&self, factors: Vec3) -> Self {
        let mut copy = *self;
        copy.scale(factors);
        copy
    }

    /// Orientation as a unit quaternion
    pub fn rotation_quaternion(&self) -> Quat {
        utils::quat_from_euler_degrees(&self.rotation)
    }

    /// `T * R * S`
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation_vector(&self.position)
            * self.rotation_quaternion().to_homogeneous()
            * Mat4::from_scale_vector(&self.scale)
    }
}
