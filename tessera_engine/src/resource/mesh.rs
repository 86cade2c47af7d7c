/// Canonical indexed triangle mesh.
///
/// A `Mesh` owns the GPU buffers of one triangle list (one buffer per vertex
/// stream plus a u32 index buffer) and one `Material`. A CPU copy of the
/// arrays is kept in `MeshData`.
///
/// Vertex streams are bound at fixed binding indices:
///
/// | binding | stream         | format              |
/// |---------|----------------|---------------------|
/// | 0       | position       | R32G32B32_SFLOAT    |
/// | 1       | uv             | R32G32_SFLOAT       |
/// | 2       | normal         | R32G32B32_SFLOAT    |
/// | 3       | bone weights   | R32G32B32A32_SFLOAT |
/// | 4       | joint indices  | R32G32B32A32_UINT   |
///
/// Buffers are released by `destroy()` (or when the mesh is dropped).

use std::sync::{Arc, Mutex};
use crate::error::{Error, Result};
use crate::engine_bail;
use crate::graphics_device::{
    self, Buffer, BufferDesc, BufferFormat, BufferUsage, CommandList, GraphicsDevice,
    IndexType, VertexAttribute, VertexBinding, VertexInputRate, VertexLayout,
};
use crate::resource::Material;

/// Bone influences reserved per vertex when skinning buffers are requested
pub const MAX_WEIGHTS: usize = 4;

// ============================================================================
// MeshData
// ============================================================================

/// CPU-side geometry arrays of a mesh
///
/// `positions` holds 3 floats per vertex, `uvs` 2, `normals` 3. `uvs` and
/// `normals` are either empty or sized to the vertex count. `indices` is a
/// triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<f32>,
    pub uvs: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
    skinning: bool,
}

impl MeshData {
    pub fn new(positions: Vec<f32>, uvs: Vec<f32>, normals: Vec<f32>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            uvs,
            normals,
            indices,
            skinning: false,
        }
    }

    /// Request zeroed bone weight and joint index streams
    pub fn with_skinning(mut self) -> Self {
        self.skinning = true;
        self
    }

    pub fn has_skinning(&self) -> bool {
        self.skinning
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Check array lengths and index bounds
    pub fn validate(&self) -> Result<()> {
        let vertex_count = self.vertex_count();

        if self.positions.len() % 3 != 0 {
            return Err(Error::InvalidResource(format!(
                "Position array length {} is not a multiple of 3", self.positions.len()
            )));
        }
        if !self.uvs.is_empty() && self.uvs.len() != vertex_count * 2 {
            return Err(Error::InvalidResource(format!(
                "UV array length {} does not match {} vertices", self.uvs.len(), vertex_count
            )));
        }
        if !self.normals.is_empty() && self.normals.len() != vertex_count * 3 {
            return Err(Error::InvalidResource(format!(
                "Normal array length {} does not match {} vertices", self.normals.len(), vertex_count
            )));
        }
        if self.indices.len() % 3 != 0 {
            return Err(Error::InvalidResource(format!(
                "Index count {} is not a multiple of 3", self.indices.len()
            )));
        }
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(Error::InvalidResource(format!(
                "Index {} out of range for {} vertices", index, vertex_count
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Mesh
// ============================================================================

#[derive(Default)]
struct MeshBuffers {
    positions: Option<Arc<dyn Buffer>>,
    uvs: Option<Arc<dyn Buffer>>,
    normals: Option<Arc<dyn Buffer>>,
    bone_weights: Option<Arc<dyn Buffer>>,
    joint_indices: Option<Arc<dyn Buffer>>,
    indices: Option<Arc<dyn Buffer>>,
}

impl MeshBuffers {
    fn count(&self) -> usize {
        [
            &self.positions,
            &self.uvs,
            &self.normals,
            &self.bone_weights,
            &self.joint_indices,
            &self.indices,
        ]
        .iter()
        .filter(|b| b.is_some())
        .count()
    }
}

pub struct Mesh {
    device: Arc<Mutex<dyn GraphicsDevice>>,
    data: MeshData,
    material: Material,
    buffers: Option<MeshBuffers>,
}

impl Mesh {
    pub const BINDING_POSITION: u32 = 0;
    pub const BINDING_UV: u32 = 1;
    pub const BINDING_NORMAL: u32 = 2;
    pub const BINDING_BONE_WEIGHTS: u32 = 3;
    pub const BINDING_JOINT_INDICES: u32 = 4;

    /// Validate the arrays and upload them into new GPU buffers
    pub fn new(
        device: Arc<Mutex<dyn GraphicsDevice>>,
        data: MeshData,
        material: Material,
    ) -> Result<Self> {
        if let Err(err) = data.validate() {
            engine_bail!("tessera::Mesh", err);
        }

        let buffers = Self::create_buffers(&device, &data)?;
        crate::engine_trace!(
            "tessera::Mesh",
            "Created mesh: {} vertices, {} indices, {} buffers",
            data.vertex_count(),
            data.index_count(),
            buffers.count()
        );

        Ok(Self {
            device,
            data,
            material,
            buffers: Some(buffers),
        })
    }

    fn create_buffers(
        device: &Arc<Mutex<dyn GraphicsDevice>>,
        data: &MeshData,
    ) -> Result<MeshBuffers> {
        let mut buffers = MeshBuffers {
            positions: upload(device, BufferUsage::Vertex, bytemuck::cast_slice(&data.positions))?,
            uvs: upload(device, BufferUsage::Vertex, bytemuck::cast_slice(&data.uvs))?,
            normals: upload(device, BufferUsage::Vertex, bytemuck::cast_slice(&data.normals))?,
            indices: upload(device, BufferUsage::Index, bytemuck::cast_slice(&data.indices))?,
            ..MeshBuffers::default()
        };

        if data.has_skinning() {
            let vertex_count = data.vertex_count();
            let weights = vec![0.0f32; vertex_count * MAX_WEIGHTS];
            let joints = vec![0u32; vertex_count * MAX_WEIGHTS];
            buffers.bone_weights = upload(device, BufferUsage::Vertex, bytemuck::cast_slice(&weights))?;
            buffers.joint_indices = upload(device, BufferUsage::Vertex, bytemuck::cast_slice(&joints))?;
        }

        Ok(buffers)
    }

    /// Release every GPU buffer owned by this mesh. Calling it again is a no-op.
    pub fn destroy(&mut self) {
        if let Some(buffers) = self.buffers.take() {
            crate::engine_trace!("tessera::Mesh", "Releasing {} buffers", buffers.count());
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.buffers.is_none()
    }

    /// Bind vertex streams, index buffer and material texture
    pub fn bind(&self, cmd: &mut dyn CommandList) -> Result<()> {
        let Some(buffers) = &self.buffers else {
            engine_bail!("tessera::Mesh", Error::InvalidResource("Mesh has been destroyed".to_string()));
        };

        let streams = [
            (Self::BINDING_POSITION, &buffers.positions),
            (Self::BINDING_UV, &buffers.uvs),
            (Self::BINDING_NORMAL, &buffers.normals),
            (Self::BINDING_BONE_WEIGHTS, &buffers.bone_weights),
            (Self::BINDING_JOINT_INDICES, &buffers.joint_indices),
        ];
        for (binding, buffer) in streams {
            if let Some(buffer) = buffer {
                cmd.bind_vertex_buffer(binding, buffer, 0)?;
            }
        }
        if let Some(indices) = &buffers.indices {
            cmd.bind_index_buffer(indices, 0, IndexType::U32)?;
        }
        if let Some(texture) = self.material.texture() {
            cmd.bind_texture(0, texture.gpu_texture())?;
        }
        Ok(())
    }

    /// Bind and issue one indexed draw (nothing is drawn for an empty mesh)
    pub fn render(&self, cmd: &mut dyn CommandList) -> Result<()> {
        self.bind(cmd)?;
        if self.index_count() > 0 {
            cmd.draw_indexed(self.index_count() as u32, 0, 0)?;
        }
        Ok(())
    }

    /// Layout of the streams this mesh binds
    pub fn vertex_layout(&self) -> VertexLayout {
        let streams = [
            (Self::BINDING_POSITION, !self.data.positions.is_empty(), BufferFormat::R32G32B32_SFLOAT),
            (Self::BINDING_UV, !self.data.uvs.is_empty(), BufferFormat::R32G32_SFLOAT),
            (Self::BINDING_NORMAL, !self.data.normals.is_empty(), BufferFormat::R32G32B32_SFLOAT),
            (Self::BINDING_BONE_WEIGHTS, self.data.has_skinning(), BufferFormat::R32G32B32A32_SFLOAT),
            (Self::BINDING_JOINT_INDICES, self.data.has_skinning(), BufferFormat::R32G32B32A32_UINT),
        ];

        let mut layout = VertexLayout::default();
        for (binding, present, format) in streams {
            if !present {
                continue;
            }
            layout.bindings.push(VertexBinding {
                binding,
                stride: format.size_bytes(),
                input_rate: VertexInputRate::Vertex,
            });
            layout.attributes.push(VertexAttribute {
                location: binding,
                binding,
                format,
                offset: 0,
            });
        }
        layout
    }

    // ===== GETTERS =====

    pub fn device(&self) -> &Arc<Mutex<dyn GraphicsDevice>> {
        &self.device
    }

    pub fn data(&self) -> &MeshData {
        &self.data
    }

    pub fn vertex_count(&self) -> usize {
        self.data.vertex_count()
    }

    pub fn index_count(&self) -> usize {
        self.data.index_count()
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn material_mut(&mut self) -> &mut Material {
        &mut self.material
    }

    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }
}

/// Create a buffer holding `bytes`, or nothing when `bytes` is empty
fn upload(
    device: &Arc<Mutex<dyn GraphicsDevice>>,
    usage: BufferUsage,
    bytes: &[u8],
) -> Result<Option<Arc<dyn Buffer>>> {
    if bytes.is_empty() {
        return Ok(None);
    }
    let buffer = graphics_device::lock_device(device, "tessera::Mesh")?.create_buffer(BufferDesc {
        size: bytes.len() as u64,
        usage,
    })?;
    buffer.update(0, bytes)?;
    Ok(Some(buffer))
}

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;
