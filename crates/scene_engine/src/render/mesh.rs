//! Mesh abstraction
//!
//! Vertex and index data live with the backend; the scene only binds a mesh
//! and issues an indexed triangle draw over its index buffer.

/// GPU-resident indexed triangle mesh
pub trait Mesh {
    /// Bind vertex and index buffers
    fn bind(&self);

    /// Number of indices in the index buffer
    fn index_count(&self) -> u32;

    /// Draw `count` indices as triangles
    fn draw_indexed(&self, count: u32);
}
