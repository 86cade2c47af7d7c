/// Graphics device module - the boundary to the GPU backend
///
/// A backend (Vulkan, wgpu, ...) implements these traits. Meshes, instanced
/// batches and glyph atlases only ever talk to the device through them.

pub mod graphics_device;
pub mod buffer;
pub mod texture;
pub mod pipeline;
pub mod command_list;

pub use graphics_device::*;
pub use buffer::*;
pub use texture::*;
pub use pipeline::*;
pub use command_list::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
