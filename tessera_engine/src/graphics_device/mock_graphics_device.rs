/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// The mock records every created resource, tracks how many buffers are
/// still alive, and hands out command lists that record commands together
/// with upload payloads so batching can be checked byte for byte.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::graphics_device::{
    GraphicsDevice, Buffer, BufferDesc, BufferUsage, CommandList, IndexType,
    Texture, TextureDesc, TextureInfo,
};
use crate::error::{Error, Result};
use crate::engine_bail;

/// Address of a resource handle, used to match recorded commands with resources
pub fn resource_id<T: ?Sized>(resource: &Arc<T>) -> usize {
    Arc::as_ptr(resource) as *const () as usize
}

// ============================================================================
// Mock Buffer
// ============================================================================

#[derive(Debug)]
pub struct MockBuffer {
    pub size: u64,
    pub usage: BufferUsage,
    pub data: Mutex<Vec<u8>>,
    counter: Arc<BufferCounter>,
}

/// Live buffer count and its high-water mark, shared by the buffers of one device
#[derive(Debug, Default)]
pub struct BufferCounter {
    live: AtomicUsize,
    peak: AtomicUsize,
}

impl MockBuffer {
    pub fn new(size: u64, usage: BufferUsage, counter: Arc<BufferCounter>) -> Self {
        let live = counter.live.fetch_add(1, Ordering::SeqCst) + 1;
        counter.peak.fetch_max(live, Ordering::SeqCst);
        Self {
            size,
            usage,
            data: Mutex::new(vec![0; size as usize]),
            counter,
        }
    }
}

impl Buffer for MockBuffer {
    fn update(&self, offset: u64, data: &[u8]) -> Result<()> {
        let end = offset as usize + data.len();
        if end as u64 > self.size {
            engine_bail!("tessera::MockBuffer", "Write of {} bytes at {} overflows buffer of {}", data.len(), offset, self.size);
        }
        let mut bytes = self.data.lock().unwrap();
        bytes[offset as usize..end].copy_from_slice(data);
        Ok(())
    }

    fn size(&self) -> u64 {
        self.size
    }
}

impl Drop for MockBuffer {
    fn drop(&mut self) {
        self.counter.live.fetch_sub(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Mock Texture
// ============================================================================

#[derive(Debug)]
pub struct MockTexture {
    pub info: TextureInfo,
    pub data: Option<Vec<u8>>,
}

impl Texture for MockTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }
}

// ============================================================================
// Mock CommandList
// ============================================================================

/// One recorded command
#[derive(Debug, Clone, PartialEq)]
pub enum MockCommand {
    BindVertexBuffer { binding: u32, buffer: usize, offset: u64 },
    BindIndexBuffer { buffer: usize, offset: u64, index_type: IndexType },
    BindTexture { slot: u32, texture: usize },
    UpdateBuffer { buffer: usize, offset: u64, data: Vec<u8> },
    DrawIndexed { index_count: u32, first_index: u32, vertex_offset: i32 },
    DrawIndexedInstanced {
        index_count: u32,
        instance_count: u32,
        first_index: u32,
        vertex_offset: i32,
        first_instance: u32,
    },
}

#[derive(Debug, Default)]
pub struct MockCommandList {
    pub commands: Vec<MockCommand>,
}

impl MockCommandList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded instanced draws, in order
    pub fn instanced_draws(&self) -> Vec<u32> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                MockCommand::DrawIndexedInstanced { instance_count, .. } => Some(*instance_count),
                _ => None,
            })
            .collect()
    }

    /// Recorded upload payloads, in order
    pub fn uploads(&self) -> Vec<&[u8]> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                MockCommand::UpdateBuffer { data, .. } => Some(data.as_slice()),
                _ => None,
            })
            .collect()
    }
}

impl CommandList for MockCommandList {
    fn bind_vertex_buffer(&mut self, binding: u32, buffer: &Arc<dyn Buffer>, offset: u64) -> Result<()> {
        self.commands.push(MockCommand::BindVertexBuffer {
            binding,
            buffer: resource_id(buffer),
            offset,
        });
        Ok(())
    }

    fn bind_index_buffer(&mut self, buffer: &Arc<dyn Buffer>, offset: u64, index_type: IndexType) -> Result<()> {
        self.commands.push(MockCommand::BindIndexBuffer {
            buffer: resource_id(buffer),
            offset,
            index_type,
        });
        Ok(())
    }

    fn bind_texture(&mut self, slot: u32, texture: &Arc<dyn Texture>) -> Result<()> {
        self.commands.push(MockCommand::BindTexture { slot, texture: resource_id(texture) });
        Ok(())
    }

    fn update_buffer(&mut self, buffer: &Arc<dyn Buffer>, offset: u64, data: &[u8]) -> Result<()> {
        if offset + data.len() as u64 > buffer.size() {
            engine_bail!("tessera::MockCommandList", "Upload of {} bytes at {} overflows buffer of {}", data.len(), offset, buffer.size());
        }
        self.commands.push(MockCommand::UpdateBuffer {
            buffer: resource_id(buffer),
            offset,
            data: data.to_vec(),
        });
        Ok(())
    }

    fn draw_indexed(&mut self, index_count: u32, first_index: u32, vertex_offset: i32) -> Result<()> {
        self.commands.push(MockCommand::DrawIndexed { index_count, first_index, vertex_offset });
        Ok(())
    }

    fn draw_indexed_instanced(
        &mut self,
        index_count: u32,
        instance_count: u32,
        first_index: u32,
        vertex_offset: i32,
        first_instance: u32,
    ) -> Result<()> {
        self.commands.push(MockCommand::DrawIndexedInstanced {
            index_count,
            instance_count,
            first_index,
            vertex_offset,
            first_instance,
        });
        Ok(())
    }
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

#[derive(Debug, Default)]
pub struct MockGraphicsDevice {
    pub created_buffers: Vec<BufferDesc>,
    pub created_textures: Vec<TextureDesc>,
    /// When set, every creation fails with `Error::OutOfMemory`
    pub out_of_memory: bool,
    buffers: Arc<BufferCounter>,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared device handle plus the concrete mock for inspection
    pub fn shared() -> (Arc<Mutex<dyn GraphicsDevice>>, Arc<Mutex<MockGraphicsDevice>>) {
        let mock = Arc::new(Mutex::new(MockGraphicsDevice::new()));
        let device: Arc<Mutex<dyn GraphicsDevice>> = mock.clone();
        (device, mock)
    }

    /// Buffers created and not yet dropped
    pub fn live_buffers(&self) -> usize {
        self.buffers.live.load(Ordering::SeqCst)
    }

    /// Most buffers alive at the same time since the device was created
    pub fn peak_buffers(&self) -> usize {
        self.buffers.peak.load(Ordering::SeqCst)
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn Buffer>> {
        if self.out_of_memory {
            return Err(Error::OutOfMemory);
        }
        let buffer = MockBuffer::new(desc.size, desc.usage, Arc::clone(&self.buffers));
        self.created_buffers.push(desc);
        Ok(Arc::new(buffer))
    }

    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>> {
        if self.out_of_memory {
            return Err(Error::OutOfMemory);
        }
        let texture = MockTexture {
            info: TextureInfo {
                width: desc.width,
                height: desc.height,
                format: desc.format,
                usage: desc.usage,
            },
            data: desc.data.clone(),
        };
        self.created_textures.push(desc);
        Ok(Arc::new(texture))
    }

    fn create_command_list(&self) -> Result<Box<dyn CommandList>> {
        Ok(Box::new(MockCommandList::new()))
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
