/// glTF adapter producing a `SceneDescription`.
///
/// Accepts both `.gltf` (JSON) and `.glb` input. Buffers may live in the GLB
/// binary chunk, in base64 data URIs, or in files next to the scene file.
/// Only triangle-list primitives are imported; others are skipped with a
/// warning.

use std::fs;
use std::path::Path;
use base64::Engine;
use gltf::Buffer;
use gltf::mesh::{Mode, Reader};
use crate::error::{Error, Result};
use crate::import::scene::{SceneDescription, SceneMaterial, SceneSubMesh};

const DATA_URI_PREFIXES: [&str; 2] = [
    "data:application/octet-stream;base64,",
    "data:application/gltf-buffer;base64,",
];

/// Read a scene file; external buffers resolve relative to its directory
pub fn load_scene_description(path: &Path) -> Result<SceneDescription> {
    let bytes = fs::read(path).map_err(|e| {
        crate::engine_err!(
            "tessera::import::Gltf",
            Error::Io(format!("Failed to read '{}': {}", path.display(), e))
        )
    })?;
    scene_description_from_slice(&bytes, path.parent())
}

/// Parse glTF or GLB bytes
///
/// `base_dir` is used for buffers referenced by relative URI. Without it,
/// such buffers are a `SceneFormat` error.
pub fn scene_description_from_slice(bytes: &[u8], base_dir: Option<&Path>) -> Result<SceneDescription> {
    let gltf = gltf::Gltf::from_slice(bytes)
        .map_err(|e| crate::engine_err!("tessera::import::Gltf", Error::from(e)))?;
    let buffers = load_buffers(&gltf, base_dir)?;

    let materials: Vec<SceneMaterial> = gltf.document.materials().map(|m| read_material(&m)).collect();

    let mut submeshes = Vec::new();
    for mesh in gltf.document.meshes() {
        for primitive in mesh.primitives() {
            if primitive.mode() != Mode::Triangles {
                crate::engine_warn!(
                    "tessera::import::Gltf",
                    "Skipping primitive {} of mesh {:?}: mode {:?} is not a triangle list",
                    primitive.index(),
                    mesh.name(),
                    primitive.mode()
                );
                continue;
            }

            let reader = primitive.reader(|buffer: Buffer<'_>| buffers.get(buffer.index()).map(Vec::as_slice));
            let positions = read_positions(&reader, mesh.name())?;
            let vertex_count = positions.len() as u32;

            submeshes.push(SceneSubMesh {
                name: mesh.name().map(String::from),
                normals: reader.read_normals().map(|it| it.collect()).unwrap_or_default(),
                uvs: reader
                    .read_tex_coords(0)
                    .map(|it| it.into_f32().collect())
                    .unwrap_or_default(),
                indices: reader
                    .read_indices()
                    .map(|it| it.into_u32().collect())
                    .unwrap_or_else(|| (0..vertex_count).collect()),
                positions,
                material_index: primitive.material().index(),
            });
        }
    }

    crate::engine_debug!(
        "tessera::import::Gltf",
        "Read {} submeshes, {} materials, {} buffers",
        submeshes.len(),
        materials.len(),
        buffers.len()
    );
    Ok(SceneDescription { materials, submeshes })
}

fn load_buffers(gltf: &gltf::Gltf, base_dir: Option<&Path>) -> Result<Vec<Vec<u8>>> {
    let mut buffer_data = Vec::new();
    for buffer in gltf.buffers() {
        match buffer.source() {
            gltf::buffer::Source::Bin => match gltf.blob.as_deref() {
                Some(blob) => buffer_data.push(blob.to_vec()),
                None => crate::engine_bail!(
                    "tessera::import::Gltf",
                    Error::SceneFormat("GLB binary chunk is referenced but missing".to_string())
                ),
            },
            gltf::buffer::Source::Uri(uri) if uri.starts_with("data:") => {
                buffer_data.push(decode_data_uri(uri)?);
            }
            gltf::buffer::Source::Uri(uri) => {
                let Some(dir) = base_dir else {
                    crate::engine_bail!(
                        "tessera::import::Gltf",
                        Error::SceneFormat(format!("External buffer '{}' needs a base directory", uri))
                    );
                };
                let path = dir.join(uri);
                let bytes = fs::read(&path).map_err(|e| {
                    crate::engine_err!(
                        "tessera::import::Gltf",
                        Error::Io(format!("{}: {}", path.display(), e))
                    )
                })?;
                buffer_data.push(bytes);
            }
        }
    }
    Ok(buffer_data)
}

fn decode_data_uri(uri: &str) -> Result<Vec<u8>> {
    let payload = DATA_URI_PREFIXES
        .iter()
        .find_map(|prefix| uri.strip_prefix(prefix))
        .ok_or_else(|| {
            crate::engine_err!(
                "tessera::import::Gltf",
                Error::SceneFormat(format!("Unsupported data URI: {:.40}", uri))
            )
        })?;
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| {
            crate::engine_err!(
                "tessera::import::Gltf",
                Error::SceneFormat(format!("Invalid base64 buffer: {}", e))
            )
        })
}

fn read_material(material: &gltf::Material<'_>) -> SceneMaterial {
    let pbr = material.pbr_metallic_roughness();
    let diffuse_texture = pbr.base_color_texture().and_then(|info| match info.texture().source().source() {
        gltf::image::Source::Uri { uri, .. } => Some(uri.to_string()),
        gltf::image::Source::View { .. } => {
            crate::engine_warn!(
                "tessera::import::Gltf",
                "Material {:?}: embedded base color images are not supported",
                material.name()
            );
            None
        }
    });

    SceneMaterial {
        ambient: None,
        diffuse: Some(pbr.base_color_factor()),
        specular: None,
        diffuse_texture,
    }
}

fn read_positions<'a, 's, F>(reader: &Reader<'a, 's, F>, mesh_name: Option<&str>) -> Result<Vec<[f32; 3]>>
where
    F: Clone + Fn(Buffer<'a>) -> Option<&'s [u8]>,
{
    match reader.read_positions() {
        Some(positions) => Ok(positions.collect()),
        None => Err(crate::engine_err!(
            "tessera::import::Gltf",
            Error::SceneFormat(format!("Mesh {:?} has a primitive without positions", mesh_name))
        )),
    }
}

#[cfg(test)]
#[path = "gltf_adapter_tests.rs"]
mod tests;
