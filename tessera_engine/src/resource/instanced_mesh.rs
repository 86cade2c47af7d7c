/// Instanced mesh batcher.
///
/// An `InstancedMesh` is a `Mesh` plus one per-instance buffer holding up to
/// `capacity` instance records. `render_instanced` splits any number of
/// entities into consecutive chunks of at most `capacity`, uploads each chunk
/// through the command list and issues one instanced draw per chunk.
///
/// Instance record layout (binding 5, per-instance, 76 bytes):
///
/// | location | offset | content                          |
/// |----------|--------|----------------------------------|
/// | 5..=8    | 0      | model matrix columns (4 x vec4)  |
/// | 9        | 64     | atlas UV offset (vec2)           |
/// | 10       | 72     | selection flag (float)           |

use std::sync::{Arc, Mutex};
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use crate::error::{Error, Result};
use crate::engine_bail;
use crate::camera::Camera;
use crate::graphics_device::{
    self, Buffer, BufferDesc, BufferFormat, BufferUsage, CommandList, GraphicsDevice,
    VertexAttribute, VertexBinding, VertexInputRate, VertexLayout,
};
use crate::resource::{Material, Mesh, MeshData};
use crate::scene::{Entity, Transformation};

// ===== INSTANCE RECORD =====

/// Per-instance data uploaded for every entity of a chunk
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct InstanceRecord {
    /// Model matrix, column-major
    pub model: [f32; 16],
    /// Offset of the entity's atlas cell in texture space
    pub atlas_offset: [f32; 2],
    /// 1.0 when the entity is selected, 0.0 otherwise
    pub selected: f32,
}

/// Size in bytes of one `InstanceRecord`
pub const INSTANCE_RECORD_SIZE: usize = std::mem::size_of::<InstanceRecord>();

const _: () = assert!(INSTANCE_RECORD_SIZE == 76);

/// Result of one `render_instanced` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Number of instanced draws issued
    pub draw_calls: u32,
    /// Number of instances drawn
    pub instances: u32,
}

// ===== INSTANCED MESH =====

pub struct InstancedMesh {
    mesh: Mesh,
    capacity: usize,
    instance_buffer: Option<Arc<dyn Buffer>>,
}

impl InstancedMesh {
    pub const BINDING_INSTANCE: u32 = 5;
    pub const LOCATION_MODEL: u32 = 5;
    pub const LOCATION_ATLAS_OFFSET: u32 = 9;
    pub const LOCATION_SELECTED: u32 = 10;

    /// Build the base mesh (with skinning streams) and an instance buffer of
    /// `capacity` records
    pub fn new(
        device: Arc<Mutex<dyn GraphicsDevice>>,
        data: MeshData,
        material: Material,
        capacity: usize,
    ) -> Result<Self> {
        if capacity < 1 {
            engine_bail!("tessera::InstancedMesh", Error::InvalidArgument(format!(
                "Instance capacity must be at least 1, got {}", capacity
            )));
        }

        let mesh = Mesh::new(Arc::clone(&device), data.with_skinning(), material)?;
        let instance_buffer = graphics_device::lock_device(&device, "tessera::InstancedMesh")?
            .create_buffer(BufferDesc {
                size: (capacity * INSTANCE_RECORD_SIZE) as u64,
                usage: BufferUsage::Instance,
            })?;

        crate::engine_debug!(
            "tessera::InstancedMesh",
            "Created instanced mesh: {} vertices, capacity {}",
            mesh.vertex_count(),
            capacity
        );

        Ok(Self {
            mesh,
            capacity,
            instance_buffer: Some(instance_buffer),
        })
    }

    /// Draw every entity, `capacity` instances per draw call
    ///
    /// Entities are chunked in iteration order. With `billboard` set and a
    /// camera given, each model matrix's rotation block is replaced so the
    /// instance faces the camera. Returns how many draws and instances were
    /// issued; an empty sequence issues nothing.
    pub fn render_instanced<'a, I>(
        &self,
        cmd: &mut dyn CommandList,
        entities: I,
        camera: Option<&Camera>,
        billboard: bool,
    ) -> Result<BatchStats>
    where
        I: IntoIterator<Item = &'a Entity>,
    {
        let Some(instance_buffer) = &self.instance_buffer else {
            engine_bail!("tessera::InstancedMesh", Error::InvalidResource(
                "Instanced mesh has been destroyed".to_string()
            ));
        };

        let entities: Vec<&Entity> = entities.into_iter().collect();
        let mut stats = BatchStats::default();
        if entities.is_empty() {
            return Ok(stats);
        }
        if billboard && camera.is_none() {
            crate::engine_warn!("tessera::InstancedMesh", "Billboard requested without a camera, using model rotation");
        }

        self.mesh.bind(cmd)?;
        cmd.bind_vertex_buffer(Self::BINDING_INSTANCE, instance_buffer, 0)?;

        let index_count = self.mesh.index_count() as u32;
        for chunk in entities.chunks(self.capacity) {
            let records = self.pack_chunk(chunk, camera, billboard);
            cmd.update_buffer(instance_buffer, 0, bytemuck::cast_slice(&records))?;
            cmd.draw_indexed_instanced(index_count, chunk.len() as u32, 0, 0, 0)?;
            stats.draw_calls += 1;
            stats.instances += chunk.len() as u32;
        }

        crate::engine_trace!(
            "tessera::InstancedMesh",
            "Drew {} instances in {} draw calls",
            stats.instances,
            stats.draw_calls
        );
        Ok(stats)
    }

    /// Non-billboard shorthand for `render_instanced`
    pub fn render_list_instanced<'a, I>(
        &self,
        cmd: &mut dyn CommandList,
        entities: I,
        camera: Option<&Camera>,
    ) -> Result<BatchStats>
    where
        I: IntoIterator<Item = &'a Entity>,
    {
        self.render_instanced(cmd, entities, camera, false)
    }

    /// Instance records for one chunk, in order
    pub fn pack_chunk(
        &self,
        chunk: &[&Entity],
        camera: Option<&Camera>,
        billboard: bool,
    ) -> Vec<InstanceRecord> {
        let billboard_camera = if billboard { camera } else { None };
        chunk
            .iter()
            .map(|entity| self.pack_record(entity, billboard_camera))
            .collect()
    }

    fn pack_record(&self, entity: &Entity, billboard_camera: Option<&Camera>) -> InstanceRecord {
        let mut model = Transformation::model_matrix(entity);
        if let Some(camera) = billboard_camera {
            face_camera(&mut model, camera);
        }

        InstanceRecord {
            model: model.to_cols_array(),
            atlas_offset: self.atlas_offset(entity.atlas_index()),
            selected: if entity.is_selected() { 1.0 } else { 0.0 },
        }
    }

    /// Offset of atlas cell `index` (row-major) in the material texture
    fn atlas_offset(&self, index: u32) -> [f32; 2] {
        match self.mesh.material().texture() {
            Some(texture) => {
                let cols = texture.cols();
                let rows = texture.rows();
                let col = index % cols;
                let row = index / cols;
                [col as f32 / cols as f32, row as f32 / rows as f32]
            }
            None => [0.0, 0.0],
        }
    }

    /// Release the base mesh buffers and the instance buffer
    pub fn destroy(&mut self) {
        self.mesh.destroy();
        self.instance_buffer = None;
    }

    pub fn is_destroyed(&self) -> bool {
        self.instance_buffer.is_none()
    }

    /// Layout of the per-instance stream
    pub fn instance_vertex_layout() -> VertexLayout {
        let mut attributes: Vec<VertexAttribute> = (0..4)
            .map(|column| VertexAttribute {
                location: Self::LOCATION_MODEL + column,
                binding: Self::BINDING_INSTANCE,
                format: BufferFormat::R32G32B32A32_SFLOAT,
                offset: column * 16,
            })
            .collect();
        attributes.push(VertexAttribute {
            location: Self::LOCATION_ATLAS_OFFSET,
            binding: Self::BINDING_INSTANCE,
            format: BufferFormat::R32G32_SFLOAT,
            offset: 64,
        });
        attributes.push(VertexAttribute {
            location: Self::LOCATION_SELECTED,
            binding: Self::BINDING_INSTANCE,
            format: BufferFormat::R32_SFLOAT,
            offset: 72,
        });

        VertexLayout {
            bindings: vec![VertexBinding {
                binding: Self::BINDING_INSTANCE,
                stride: INSTANCE_RECORD_SIZE as u32,
                input_rate: VertexInputRate::Instance,
            }],
            attributes,
        }
    }

    /// Mesh streams followed by the instance stream
    pub fn vertex_layout(&self) -> VertexLayout {
        self.mesh.vertex_layout().merged(&Self::instance_vertex_layout())
    }

    // ===== GETTERS =====

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn mesh_mut(&mut self) -> &mut Mesh {
        &mut self.mesh
    }

    pub fn material(&self) -> &Material {
        self.mesh.material()
    }

    /// Maximum instances per draw call
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn instance_buffer(&self) -> Option<&Arc<dyn Buffer>> {
        self.instance_buffer.as_ref()
    }
}

/// Overwrite the rotation block with the transpose of the view rotation
fn face_camera(model: &mut Mat4, camera: &Camera) {
    let rotation = camera.view_rotation().transpose();
    model.x_axis = rotation.x_axis.extend(model.x_axis.w);
    model.y_axis = rotation.y_axis.extend(model.y_axis.w);
    model.z_axis = rotation.z_axis.extend(model.z_axis.w);
}

#[cfg(test)]
#[path = "instanced_mesh_tests.rs"]
mod tests;
