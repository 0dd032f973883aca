//! Texture abstraction

/// Texture dimensionality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    /// Regular 2D image
    Texture2D,
    /// Six-face cube map (skyboxes)
    CubeMap,
}

/// GPU texture bindable to a sampler slot
pub trait Texture {
    /// Bind to the given texture unit
    fn bind(&self, slot: u32);

    /// Dimensionality of this texture
    fn kind(&self) -> TextureKind;
}
