//! Math utilities and types
//!
//! Provides the fundamental math types used by transforms, cameras and lights.
//! All matrices are column-major, right-handed, Y-up.

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix3, Matrix4,
    Quaternion,
    Unit,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = nalgebra::UnitQuaternion<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Mat3, Mat4, Quat, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Component-wise linear interpolation between two vectors
    pub fn lerp_vec3(a: &Vec3, b: &Vec3, t: f32) -> Vec3 {
        a + (b - a) * t
    }

    /// Single orientation from an Euler-degree vector.
    ///
    /// `x` is roll, `y` is pitch, `z` is yaw, combined as `Rz * Ry * Rx`.
    /// Every rotation in the engine goes through this function so that
    /// transforms and compositors agree on the convention.
    pub fn quat_from_euler_degrees(euler_degrees: &Vec3) -> Quat {
        Quat::from_euler_angles(
            deg_to_rad(euler_degrees.x),
            deg_to_rad(euler_degrees.y),
            deg_to_rad(euler_degrees.z),
        )
    }

    /// Normal matrix (inverse-transpose of the upper-left 3x3 block).
    ///
    /// Singular matrices (e.g. a zero scale axis) yield the identity.
    pub fn normal_matrix(model: &Mat4) -> Mat3 {
        let linear: Mat3 = model.fixed_view::<3, 3>(0, 0).into_owned();
        linear
            .try_inverse()
            .map_or_else(Mat3::identity, |inverse| inverse.transpose())
    }

    /// Strip the translation out of a view matrix (skybox rendering)
    pub fn rotation_only(view: &Mat4) -> Mat4 {
        let linear: Mat3 = view.fixed_view::<3, 3>(0, 0).into_owned();
        linear.to_homogeneous()
    }

    /// Translation column of an affine matrix
    pub fn translation_of(matrix: &Mat4) -> Vec3 {
        Vec3::new(matrix[(0, 3)], matrix[(1, 3)], matrix[(2, 3)])
    }
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Translation matrix
    fn from_translation_vector(offset: &Vec3) -> Mat4;

    /// Rotation matrix from Euler degrees (see [`utils::quat_from_euler_degrees`])
    fn from_euler_degrees(euler_degrees: &Vec3) -> Mat4;

    /// Non-uniform scale matrix
    fn from_scale_vector(factors: &Vec3) -> Mat4;

    /// Create a right-handed perspective projection matrix (OpenGL depth range)
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a right-handed look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn from_translation_vector(offset: &Vec3) -> Mat4 {
        Mat4::new_translation(offset)
    }

    fn from_euler_degrees(euler_degrees: &Vec3) -> Mat4 {
        utils::quat_from_euler_degrees(euler_degrees).to_homogeneous()
    }

    fn from_scale_vector(factors: &Vec3) -> Mat4 {
        Mat4::new_nonuniform_scaling(factors)
    }

    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new_perspective(aspect, fov_y, near, far)
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        Mat4::look_at_rh(&Point3::from(eye), &Point3::from(target), &up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_euler_quaternion_yaw_about_y() {
        let rotation = utils::quat_from_euler_degrees(&Vec3::new(0.0, 90.0, 0.0));
        let rotated = rotation * Vec3::new(0.0, 0.0, 1.0);
        assert_relative_eq!(rotated, Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_euler_is_not_chained_xyz() {
        // Rx * Ry * Rz differs from the Rz * Ry * Rx convention for mixed angles
        let euler = Vec3::new(30.0, 45.0, 60.0);
        let combined = Mat4::from_euler_degrees(&euler);
        let chained = Mat4::from_axis_angle(&Vec3::x_axis(), utils::deg_to_rad(30.0))
            * Mat4::from_axis_angle(&Vec3::y_axis(), utils::deg_to_rad(45.0))
            * Mat4::from_axis_angle(&Vec3::z_axis(), utils::deg_to_rad(60.0));
        assert!((combined - chained).norm() > 1e-3);
    }

    #[test]
    fn test_normal_matrix_of_uniform_scale() {
        let model = Mat4::from_scale_vector(&Vec3::new(2.0, 2.0, 2.0));
        let normal = utils::normal_matrix(&model);
        assert_relative_eq!(normal, Mat3::identity() * 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_normal_matrix_singular_falls_back_to_identity() {
        let model = Mat4::from_scale_vector(&Vec3::new(0.0, 1.0, 1.0));
        assert_eq!(utils::normal_matrix(&model), Mat3::identity());
    }

    #[test]
    fn test_rotation_only_drops_translation() {
        let view = Mat4::from_translation_vector(&Vec3::new(1.0, 2.0, 3.0))
            * Mat4::from_euler_degrees(&Vec3::new(0.0, 30.0, 0.0));
        let stripped = utils::rotation_only(&view);
        assert_relative_eq!(utils::translation_of(&stripped), Vec3::zeros());
        assert_relative_eq!(
            stripped.fixed_view::<3, 3>(0, 0).into_owned(),
            view.fixed_view::<3, 3>(0, 0).into_owned()
        );
    }
}
