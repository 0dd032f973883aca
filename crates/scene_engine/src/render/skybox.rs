//! Cube-mapped background drawn before the scene's entities

use std::rc::Rc;

use crate::foundation::math::{utils, Mat4};
use super::mesh::Mesh;
use super::shader::{Shader, ShaderExt};
use super::texture::{Texture, TextureKind};

/// Skybox: cube map + shader + cube mesh
pub struct Skybox {
    cubemap: Rc<dyn Texture>,
    shader: Rc<dyn Shader>,
    cube: Rc<dyn Mesh>,
}

impl Skybox {
    /// Assemble a skybox from its GPU resources
    pub fn new(cubemap: Rc<dyn Texture>, shader: Rc<dyn Shader>, cube: Rc<dyn Mesh>) -> Self {
        if cubemap.kind() != TextureKind::CubeMap {
            log::warn!("Skybox created with a {:?} texture", cubemap.kind());
        }
        Self { cubemap, shader, cube }
    }

    /// Draw the skybox with the translation stripped from `view`, so it follows the camera
    pub fn render(&self, projection: &Mat4, view: &Mat4) {
        let view_projection = projection * utils::rotation_only(view);

        self.shader.bind();
        self.shader.set("view_projection_matrix", view_projection);
        self.cubemap.bind(0);
        self.cube.bind();
        self.cube.draw_indexed(self.cube.index_count());
    }
}

impl std::fmt::Debug for Skybox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Skybox")
            .field("cube_indices", &self.cube.index_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Mat4Ext, Vec3};
    use crate::render::headless::{CallLog, HeadlessMesh, HeadlessShader, HeadlessTexture, RenderCall};
    use crate::render::shader::Uniform;

    #[test]
    fn test_skybox_ignores_camera_translation() {
        let log = CallLog::new();
        let shader = Rc::new(HeadlessShader::with_log("skybox", &log));
        let skybox = Skybox::new(
            Rc::new(HeadlessTexture::with_log("sky", TextureKind::CubeMap, &log)),
            shader.clone(),
            Rc::new(HeadlessMesh::cube(&log)),
        );

        let projection = Mat4::perspective(1.0, 1.5, 0.1, 100.0);
        let near = Mat4::look_at(Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0), Vec3::y());
        let far = Mat4::look_at(Vec3::new(40.0, 5.0, -3.0), Vec3::new(41.0, 5.0, -3.0), Vec3::y());

        skybox.render(&projection, &near);
        let first = shader.uniform("view_projection_matrix");
        skybox.render(&projection, &far);
        let second = shader.uniform("view_projection_matrix");

        assert!(matches!(first, Some(Uniform::Mat4(_))));
        assert_eq!(first, second);
        assert_eq!(
            log.calls()[..4],
            [
                RenderCall::BindShader("skybox".into()),
                RenderCall::BindTexture { name: "sky".into(), slot: 0 },
                RenderCall::BindMesh("cube".into()),
                RenderCall::Draw { mesh: "cube".into(), count: 36 },
            ]
        );
    }
}
