//! # Rendering System
//!
//! The narrow rendering surface the scene layer talks to.
//!
//! ## Architecture
//!
//! - **Resource traits**: [`Shader`], [`Mesh`], [`Texture`] and [`Material`]
//!   are implemented by a backend; the scene only binds, writes uniforms and
//!   issues indexed draws through them
//! - **Camera**: FPS camera with a lazily cached view matrix
//! - **Lighting**: point/spot/directional light variants and their uniform blocks
//! - **Skybox**: cube-mapped background
//! - **Headless**: recording backend used by tests and the demo harness
//!
//! All resource trait methods take `&self`. Resources are shared through `Rc`
//! between entities and the light/camera subscriptions that write into them.

pub mod camera;
pub mod headless;
pub mod lighting;
pub mod material;
pub mod mesh;
pub mod shader;
pub mod skybox;
pub mod texture;

pub use camera::Camera;
pub use lighting::{DirectionalLight, Light, LightCounts, LightKind, PointLight, SpotLight};
pub use material::{Material, MaterialKind, PhongBlinnMaterial};
pub use mesh::Mesh;
pub use shader::{Shader, ShaderExt, Uniform};
pub use skybox::Skybox;
pub use texture::{Texture, TextureKind};
