//! Shader program abstraction
//!
//! Shader source is opaque to the engine. The scene only needs to bind a
//! program and push named uniform values into it; compiling and linking is
//! the job of the backend that implements [`Shader`].

use crate::foundation::math::{Mat3, Mat4, Vec3, Vec4};

/// A value that can be written into a named shader uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Uniform {
    /// 4x4 matrix
    Mat4(Mat4),
    /// 3x3 matrix
    Mat3(Mat3),
    /// 3-component vector
    Vec3(Vec3),
    /// 4-component vector
    Vec4(Vec4),
    /// Scalar float
    Float(f32),
    /// Scalar integer (counts, sampler slots)
    Int(i32),
}

impl From<Mat4> for Uniform {
    fn from(value: Mat4) -> Self {
        Self::Mat4(value)
    }
}

impl From<Mat3> for Uniform {
    fn from(value: Mat3) -> Self {
        Self::Mat3(value)
    }
}

impl From<Vec3> for Uniform {
    fn from(value: Vec3) -> Self {
        Self::Vec3(value)
    }
}

impl From<Vec4> for Uniform {
    fn from(value: Vec4) -> Self {
        Self::Vec4(value)
    }
}

impl From<f32> for Uniform {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<i32> for Uniform {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

/// Compiled shader program
///
/// Methods take `&self`: a shader is shared between its entity and the
/// light/camera subscriptions that write into it.
pub trait Shader {
    /// Make this program current
    fn bind(&self);

    /// Write a uniform; names the program does not declare are ignored
    fn set_uniform(&self, name: &str, value: Uniform);
}

/// Convenience setter accepting anything convertible into a [`Uniform`]
pub trait ShaderExt {
    /// Write a uniform value
    fn set(&self, name: &str, value: impl Into<Uniform>);
}

impl<S: Shader + ?Sized> ShaderExt for S {
    fn set(&self, name: &str, value: impl Into<Uniform>) {
        self.set_uniform(name, value.into());
    }
}
