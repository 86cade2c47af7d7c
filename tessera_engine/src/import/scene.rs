/// Structured scene description and its conversion to meshes.
///
/// A `SceneDescription` is what a structured-scene adapter (glTF) produces:
/// materials with optional colors and a diffuse texture path, and triangle
/// submeshes referencing a material by index. `build_scene` turns it into
/// GPU meshes and materials.

use std::path::Path;
use std::sync::{Arc, Mutex};
use crate::error::Result;
use crate::graphics_device::GraphicsDevice;
use crate::resource::{Material, Mesh, MeshData, TextureCache};

/// Material as read from a scene file; missing colors are `None`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneMaterial {
    pub ambient: Option<[f32; 4]>,
    pub diffuse: Option<[f32; 4]>,
    pub specular: Option<[f32; 4]>,
    /// Diffuse texture path, relative to the texture directory
    pub diffuse_texture: Option<String>,
}

/// One triangle list with per-vertex attributes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneSubMesh {
    pub name: Option<String>,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    /// First texture coordinate channel, as stored in the file
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
    pub material_index: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneDescription {
    pub materials: Vec<SceneMaterial>,
    pub submeshes: Vec<SceneSubMesh>,
}

/// Meshes and the materials they were built with
pub struct ImportedScene {
    pub meshes: Vec<Mesh>,
    pub materials: Vec<Material>,
}

/// Build materials then meshes from a scene description
///
/// Texture paths are resolved against `texture_dir` and loaded through
/// `cache`, so a texture shared by several materials is uploaded once.
/// A submesh whose material index is missing or out of range gets
/// `Material::default()`.
pub fn build_scene(
    device: &Arc<Mutex<dyn GraphicsDevice>>,
    cache: &mut TextureCache,
    description: &SceneDescription,
    texture_dir: &Path,
) -> Result<ImportedScene> {
    let materials = description
        .materials
        .iter()
        .map(|material| build_material(device, cache, material, texture_dir))
        .collect::<Result<Vec<_>>>()?;

    let mut meshes = Vec::with_capacity(description.submeshes.len());
    for submesh in &description.submeshes {
        let material = match submesh.material_index.and_then(|i| materials.get(i)) {
            Some(material) => material.clone(),
            None => {
                crate::engine_debug!(
                    "tessera::import::Scene",
                    "Submesh {:?} has no valid material ({:?}), using default",
                    submesh.name,
                    submesh.material_index
                );
                Material::default()
            }
        };
        meshes.push(Mesh::new(Arc::clone(device), submesh_data(submesh), material)?);
    }

    crate::engine_info!(
        "tessera::import::Scene",
        "Imported {} meshes, {} materials",
        meshes.len(),
        materials.len()
    );
    Ok(ImportedScene { meshes, materials })
}

fn build_material(
    device: &Arc<Mutex<dyn GraphicsDevice>>,
    cache: &mut TextureCache,
    material: &SceneMaterial,
    texture_dir: &Path,
) -> Result<Material> {
    let texture = match material.diffuse_texture.as_deref() {
        Some(path) if !path.is_empty() => Some(cache.get_or_load(device, &texture_dir.join(path))?),
        _ => None,
    };

    Ok(Material::new(
        material.ambient.unwrap_or(Material::DEFAULT_COLOR),
        material.diffuse.unwrap_or(Material::DEFAULT_COLOR),
        material.specular.unwrap_or(Material::DEFAULT_COLOR),
        texture,
        1.0,
    ))
}

/// Copy attributes verbatim except V, which is flipped to `1 - v`
fn submesh_data(submesh: &SceneSubMesh) -> MeshData {
    MeshData::new(
        submesh.positions.iter().flatten().copied().collect(),
        submesh.uvs.iter().flat_map(|&[u, v]| [u, 1.0 - v]).collect(),
        submesh.normals.iter().flatten().copied().collect(),
        submesh.indices.clone(),
    )
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
