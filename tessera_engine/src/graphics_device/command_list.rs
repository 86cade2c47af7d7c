/// CommandList trait - for recording upload and draw commands

use std::sync::Arc;
use crate::error::Result;
use crate::graphics_device::{Buffer, IndexType, Texture};

/// Command list for recording GPU commands
///
/// Commands execute in recording order once the list is submitted by the
/// backend. Uploads recorded with `update_buffer` are therefore visible to
/// every draw recorded after them, and only to those.
pub trait CommandList: Send + Sync {
    /// Bind a vertex buffer to a binding slot
    ///
    /// # Arguments
    ///
    /// * `binding` - Binding index declared in the vertex layout
    /// * `buffer` - Buffer to bind
    /// * `offset` - Offset into the buffer in bytes
    fn bind_vertex_buffer(&mut self, binding: u32, buffer: &Arc<dyn Buffer>, offset: u64) -> Result<()>;

    /// Bind an index buffer
    ///
    /// # Arguments
    ///
    /// * `buffer` - Buffer to bind
    /// * `offset` - Offset into the buffer in bytes
    /// * `index_type` - Type of indices (U16 or U32)
    fn bind_index_buffer(&mut self, buffer: &Arc<dyn Buffer>, offset: u64, index_type: IndexType) -> Result<()>;

    /// Bind a sampled texture to a material slot
    fn bind_texture(&mut self, slot: u32, texture: &Arc<dyn Texture>) -> Result<()>;

    /// Record a buffer upload ordered with the surrounding draws
    ///
    /// # Arguments
    ///
    /// * `buffer` - Destination buffer
    /// * `offset` - Offset into the buffer in bytes
    /// * `data` - Bytes to copy
    fn update_buffer(&mut self, buffer: &Arc<dyn Buffer>, offset: u64, data: &[u8]) -> Result<()>;

    /// Draw indexed vertices
    ///
    /// # Arguments
    ///
    /// * `index_count` - Number of indices to draw
    /// * `first_index` - Index of first index
    /// * `vertex_offset` - Value added to vertex index before indexing into the vertex buffer
    fn draw_indexed(&mut self, index_count: u32, first_index: u32, vertex_offset: i32) -> Result<()>;

    /// Draw indexed vertices for several instances
    ///
    /// # Arguments
    ///
    /// * `index_count` - Number of indices per instance
    /// * `instance_count` - Number of instances
    /// * `first_index` - Index of first index
    /// * `vertex_offset` - Value added to vertex index before indexing into the vertex buffer
    /// * `first_instance` - Instance id of the first instance
    fn draw_indexed_instanced(
        &mut self,
        index_count: u32,
        instance_count: u32,
        first_index: u32,
        vertex_offset: i32,
        first_instance: u32,
    ) -> Result<()>;
}
