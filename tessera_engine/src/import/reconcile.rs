/// Vertex index reconciliation.
///
/// The line format indexes positions, UVs and normals independently per face
/// corner. GPU meshes use one index per vertex. Reconciliation keeps the
/// position order as declared, uses each corner's position index as the
/// vertex index, and copies the corner's UV and normal into that position's
/// slot.
///
/// When several corners share a position but reference different UVs or
/// normals, `reconcile` keeps the value of the last corner in file order.
/// `reconcile_strict` rejects the input instead.

use crate::error::{Error, ParseErrorKind, Result};
use crate::import::line_format::{FaceIndexGroup, LineFormatData};
use crate::resource::MeshData;

/// Reconcile with last-write-wins for shared positions
pub fn reconcile(data: &LineFormatData) -> Result<MeshData> {
    reconcile_with(data, false)
}

/// Reconcile, failing with `ParseErrorKind::ConflictingAttributes` when a
/// shared position is given two different UVs or normals
pub fn reconcile_strict(data: &LineFormatData) -> Result<MeshData> {
    reconcile_with(data, true)
}

fn reconcile_with(data: &LineFormatData, strict: bool) -> Result<MeshData> {
    let vertex_count = data.positions.len();
    let positions: Vec<f32> = data.positions.iter().flatten().copied().collect();
    let mut uvs = vec![0.0f32; vertex_count * 2];
    let mut normals = vec![0.0f32; vertex_count * 3];
    let mut indices = Vec::with_capacity(data.faces.len() * 3);

    // Which UV / normal value each slot received, for conflict detection
    let mut written_uv: Vec<Option<[f32; 2]>> = vec![None; if strict { vertex_count } else { 0 }];
    let mut written_normal: Vec<Option<[f32; 3]>> = vec![None; if strict { vertex_count } else { 0 }];

    for face in &data.faces {
        for corner in &face.corners {
            let FaceIndexGroup { position, uv, normal } = *corner;
            let slot = checked(position, vertex_count, "position", face.line)?;
            indices.push(slot as u32);

            if let Some(uv) = uv {
                let value = data.uvs[checked(uv, data.uvs.len(), "uv", face.line)?];
                if strict {
                    ensure_consistent(&mut written_uv[slot], value, slot, face.line)?;
                }
                uvs[slot * 2..slot * 2 + 2].copy_from_slice(&value);
            }
            if let Some(normal) = normal {
                let value = data.normals[checked(normal, data.normals.len(), "normal", face.line)?];
                if strict {
                    ensure_consistent(&mut written_normal[slot], value, slot, face.line)?;
                }
                normals[slot * 3..slot * 3 + 3].copy_from_slice(&value);
            }
        }
    }

    Ok(MeshData::new(positions, uvs, normals, indices))
}

fn checked(index: usize, len: usize, attribute: &'static str, line: usize) -> Result<usize> {
    if index < len {
        Ok(index)
    } else {
        Err(crate::engine_err!("tessera::import::Reconcile", Error::Parse {
            line,
            kind: ParseErrorKind::IndexOutOfRange { attribute, index, len },
        }))
    }
}

fn ensure_consistent<const N: usize>(
    written: &mut Option<[f32; N]>,
    value: [f32; N],
    position: usize,
    line: usize,
) -> Result<()> {
    match written {
        Some(previous) if *previous != value => Err(crate::engine_err!(
            "tessera::import::Reconcile",
            Error::Parse {
                line,
                kind: ParseErrorKind::ConflictingAttributes { position },
            }
        )),
        _ => {
            *written = Some(value);
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
