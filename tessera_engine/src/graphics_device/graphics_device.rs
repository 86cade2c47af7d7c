/// GraphicsDevice trait - GPU resource factory

use std::sync::{Arc, Mutex, MutexGuard};
use crate::error::Result;
use crate::graphics_device::{Buffer, BufferDesc, CommandList, Texture, TextureDesc};

/// GPU resource factory
///
/// Shared as `Arc<Mutex<dyn GraphicsDevice>>`. Creation calls lock the device
/// for their duration. Returned resources are released when their last handle
/// is dropped.
pub trait GraphicsDevice: Send + Sync {
    /// Create a buffer
    ///
    /// # Arguments
    ///
    /// * `desc` - Buffer size and usage
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn Buffer>>;

    /// Create a texture, uploading `desc.data` if present
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>>;

    /// Create a command list for recording draw and upload commands
    fn create_command_list(&self) -> Result<Box<dyn CommandList>>;
}

/// Lock a shared device, turning a poisoned mutex into an error
pub(crate) fn lock_device<'a>(
    device: &'a Arc<Mutex<dyn GraphicsDevice>>,
    source: &str,
) -> Result<MutexGuard<'a, dyn GraphicsDevice + 'static>> {
    device
        .lock()
        .map_err(|_| crate::engine_err!(source, "Graphics device mutex poisoned"))
}
