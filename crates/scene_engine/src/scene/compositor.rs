//! Matrix composition algebra
//!
//! A [`Mat4Compositor`] is a small expression tree over 4x4 matrices, used to
//! build model matrices by hand (orbits, offsets from a parent) and inside
//! transform modifiers.
//!
//! Applying a compositor to an input matrix `M`:
//! - `Translate` / `Rotate` / `Scale` post-multiply, `M * op`, so the
//!   operation happens in `M`'s local frame
//! - `Mat4(W)` pre-multiplies, `W * M`
//! - `Composite` folds its children left to right, first child first

use crate::foundation::math::{Mat4, Mat4Ext, Vec3};

/// Expression over 4x4 matrices
#[derive(Debug, Clone, PartialEq)]
pub enum Mat4Compositor {
    /// Local translation
    Translate(Vec3),
    /// Local rotation from Euler degrees (same convention as `Transform`)
    Rotate(Vec3),
    /// Local non-uniform scale
    Scale(Vec3),
    /// Fixed matrix applied on the left
    Mat4(Mat4),
    /// Sequence applied in order
    Composite(Vec<Mat4Compositor>),
}

impl Mat4Compositor {
    /// Local translation by `offset`
    pub const fn translate(offset: Vec3) -> Self {
        Self::Translate(offset)
    }

    /// Local rotation by Euler degrees
    pub const fn rotate(euler_degrees: Vec3) -> Self {
        Self::Rotate(euler_degrees)
    }

    /// Local scale by `factors`
    pub const fn scale(factors: Vec3) -> Self {
        Self::Scale(factors)
    }

    /// Fixed matrix, left-multiplied onto the input
    pub const fn matrix(matrix: Mat4) -> Self {
        Self::Mat4(matrix)
    }

    /// Sequence of compositors
    pub fn composite(children: impl IntoIterator<Item = Self>) -> Self {
        Self::Composite(children.into_iter().collect())
    }

    /// Apply to `input`
    pub fn apply(&self, input: &Mat4) -> Mat4 {
        match self {
            Self::Translate(offset) => input * Mat4::from_translation_vector(offset),
            Self::Rotate(euler_degrees) => input * Mat4::from_euler_degrees(euler_degrees),
            Self::Scale(factors) => input * Mat4::from_scale_vector(factors),
            Self::Mat4(matrix) => matrix * input,
            Self::Composite(children) => children
                .iter()
                .fold(*input, |accumulated, child| child.apply(&accumulated)),
        }
    }

    /// Apply to the identity matrix
    pub fn compose(&self) -> Mat4 {
        self.apply(&Mat4::identity())
    }
}

impl From<Mat4> for Mat4Compositor {
    fn from(matrix: Mat4) -> Self {
        Self::Mat4(matrix)
    }
}
