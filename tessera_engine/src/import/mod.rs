//! Geometry import
//!
//! Two adapters feed the canonical `Mesh`:
//! - the line format (`v`/`vt`/`vn`/`f`), reconciled to one index per vertex
//!   and built as an `InstancedMesh` for repeated geometry;
//! - glTF scenes, converted to a `SceneDescription` then to meshes and
//!   materials sharing textures through a `TextureCache`.

pub mod line_format;
pub mod reconcile;
pub mod scene;
pub mod gltf_adapter;

pub use line_format::{parse as parse_line_format, Face, FaceIndexGroup, LineFormatData};
pub use reconcile::{reconcile, reconcile_strict};
pub use scene::{build_scene, ImportedScene, SceneDescription, SceneMaterial, SceneSubMesh};
pub use gltf_adapter::{load_scene_description, scene_description_from_slice};

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use crate::error::{Error, Result};
use crate::graphics_device::GraphicsDevice;
use crate::resource::{InstancedMesh, Material, Mesh, MeshData, TextureCache};

/// Import a glTF scene; diffuse texture paths resolve against `texture_dir`
pub fn import_scene(
    device: &Arc<Mutex<dyn GraphicsDevice>>,
    cache: &mut TextureCache,
    path: &Path,
    texture_dir: &Path,
) -> Result<ImportedScene> {
    crate::engine_info!("tessera::import", "Importing scene '{}'", path.display());
    let description = load_scene_description(path)?;
    build_scene(device, cache, &description, texture_dir)
}

/// Import a line-format file as an instanced mesh holding up to
/// `instance_count` instances per draw
///
/// `instance_count` is checked before the file is read.
pub fn import_line_format(
    device: Arc<Mutex<dyn GraphicsDevice>>,
    path: &Path,
    instance_count: usize,
) -> Result<InstancedMesh> {
    if instance_count < 1 {
        crate::engine_bail!(
            "tessera::import",
            Error::InvalidArgument(format!(
                "instance_count must be at least 1, got {} for '{}'",
                instance_count,
                path.display()
            ))
        );
    }

    let data = read_line_format(path)?;
    InstancedMesh::new(device, data, Material::default(), instance_count)
}

/// Import a line-format file as a plain mesh
pub fn import_line_format_static(device: Arc<Mutex<dyn GraphicsDevice>>, path: &Path) -> Result<Mesh> {
    let data = read_line_format(path)?;
    Mesh::new(device, data, Material::default())
}

fn read_line_format(path: &Path) -> Result<MeshData> {
    crate::engine_info!("tessera::import", "Importing line format '{}'", path.display());
    let source = fs::read_to_string(path).map_err(|e| {
        crate::engine_err!(
            "tessera::import",
            Error::Io(format!("Failed to read '{}': {}", path.display(), e))
        )
    })?;
    reconcile(&parse_line_format(&source)?)
}

#[cfg(test)]
#[path = "import_tests.rs"]
mod tests;
