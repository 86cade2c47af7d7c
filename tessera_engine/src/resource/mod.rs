//! Resource module
//!
//! GPU-backed resources built by the importers and the text builders:
//! textures and their cache, materials, canonical meshes and instanced meshes.

pub mod texture;
pub mod texture_cache;
pub mod material;
pub mod mesh;
pub mod instanced_mesh;

pub use texture::Texture;
pub use texture_cache::TextureCache;
pub use material::Material;
pub use mesh::{Mesh, MeshData};
pub use instanced_mesh::{InstancedMesh, InstanceRecord, BatchStats, INSTANCE_RECORD_SIZE};
