//! Named asset storage for the demo scenes
//!
//! The harness has no GPU, so every asset is a headless stand-in that records
//! what the scenes do with it.

use std::collections::HashMap;
use std::rc::Rc;

use scene_engine::render::headless::{CallLog, HeadlessMesh, HeadlessShader, HeadlessTexture};
use scene_engine::render::{Mesh, Shader, Texture, TextureKind};

use crate::HarnessError;

/// Shared handles looked up by name
pub struct AssetStorage<T: ?Sized> {
    kind: &'static str,
    assets: HashMap<String, Rc<T>>,
}

impl<T: ?Sized> AssetStorage<T> {
    /// Empty storage; `kind` only shows up in log messages and errors
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            assets: HashMap::new(),
        }
    }

    /// Store `asset` under `name`, replacing any previous one
    pub fn insert(&mut self, name: impl Into<String>, asset: Rc<T>) {
        let name = name.into();
        if self.assets.insert(name.clone(), asset).is_some() {
            log::warn!("Replaced {} '{}'", self.kind, name);
        }
    }

    /// Shared handle of `name`
    pub fn get(&self, name: &str) -> Result<Rc<T>, HarnessError> {
        self.assets.get(name).cloned().ok_or_else(|| {
            log::warn!("Missing {} '{}'", self.kind, name);
            HarnessError::MissingAsset {
                kind: self.kind,
                name: name.to_string(),
            }
        })
    }

    /// Number of stored assets
    pub fn len(&self) -> usize {
        self.assets.len()
    }
}

/// Every asset the demo scenes use
pub struct DemoAssets {
    /// Draw-call record shared by all meshes and textures
    pub log: CallLog,
    /// Meshes by name
    pub meshes: AssetStorage<dyn Mesh>,
    /// Shader programs by name
    pub shaders: AssetStorage<dyn Shader>,
    /// Textures by name
    pub textures: AssetStorage<dyn Texture>,
    headless_shaders: Vec<Rc<HeadlessShader>>,
}

const MESHES: &[(&str, u32)] = &[
    ("ball", 2880),
    ("grid", 600),
    ("plane", 6),
    ("terrain", 24_576),
    ("tonk", 9_042),
    ("mad", 4_812),
    ("tree", 3_264),
    ("bush", 1_998),
    ("suzi", 2_904),
    ("rat", 6_210),
];

const SHADERS: &[&str] = &[
    "phong",
    "phong_without_clip",
    "phong_textured",
    "phong_textured_normals",
    "blinn",
    "constant",
    "white",
    "black",
    "normal",
    "rtx",
    "grass",
    "skybox",
];

const TEXTURES: &[&str] = &["grass", "mad", "tonk", "rat", "wall", "wall_normal"];

impl DemoAssets {
    /// Build the headless asset set
    pub fn headless() -> Self {
        let log = CallLog::new();

        let mut meshes: AssetStorage<dyn Mesh> = AssetStorage::new("mesh");
        for &(name, index_count) in MESHES {
            meshes.insert(name, Rc::new(HeadlessMesh::with_log(name, index_count, &log)));
        }
        meshes.insert("cube", Rc::new(HeadlessMesh::cube(&log)));

        let mut shaders: AssetStorage<dyn Shader> = AssetStorage::new("shader");
        let mut headless_shaders = Vec::with_capacity(SHADERS.len());
        for &name in SHADERS {
            let shader = Rc::new(HeadlessShader::with_log(name, &log));
            shaders.insert(name, shader.clone());
            headless_shaders.push(shader);
        }

        let mut textures: AssetStorage<dyn Texture> = AssetStorage::new("texture");
        for &name in TEXTURES {
            textures.insert(
                name,
                Rc::new(HeadlessTexture::with_log(name, TextureKind::Texture2D, &log)),
            );
        }
        textures.insert(
            "skybox",
            Rc::new(HeadlessTexture::with_log("skybox", TextureKind::CubeMap, &log)),
        );

        log::info!(
            "Loaded {} meshes, {} shaders, {} textures",
            meshes.len(),
            shaders.len(),
            textures.len()
        );

        Self {
            log,
            meshes,
            shaders,
            textures,
            headless_shaders,
        }
    }

    /// Uniform writes recorded per shader since the last reset, busiest first
    pub fn uniform_traffic(&self) -> Vec<(String, usize)> {
        let mut traffic: Vec<(String, usize)> = self
            .headless_shaders
            .iter()
            .map(|shader| (shader.name().to_string(), shader.write_count()))
            .filter(|(_, writes)| *writes > 0)
            .collect();
        traffic.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        traffic
    }

    /// Forget recorded calls and uniform writes
    pub fn reset_traffic(&self) {
        self.log.clear();
        for shader in &self.headless_shaders {
            shader.clear_writes();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_asset_is_an_error() {
        let assets = DemoAssets::headless();
        assert!(assets.meshes.get("ball").is_ok());
        assert!(matches!(
            assets.shaders.get("nope"),
            Err(HarnessError::MissingAsset { kind: "shader", .. })
        ));
    }
}
