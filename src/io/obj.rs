//! Wavefront OBJ reader.
//!
//! Format records used:
//! - `v x y z [w]`   (vertex position, optional weight ignored)
//! - `f v1 v2 v3 ...` (polygonal face, vertex indices start at 1)
//!
//! Face tokens may carry texture/normal references (`v/vt`, `v//vn`,
//! `v/vt/vn`); only the vertex index is used. Negative indices count back
//! from the most recently defined vertex. `vn`, `vt`, grouping and material
//! records are skipped.

use crate::io::{MeshReader, ReadOptions, parse_field};
use crate::mesh_error::MeshUgridError;
use crate::topology::entity_type::EntityType;
use crate::topology::handle::EntityHandle;
use crate::topology::mesh_core::MeshCore;
use std::io::{BufRead, BufReader, Read};

/// Reader for Wavefront `.obj` polygon meshes.
#[derive(Debug, Default, Clone)]
pub struct ObjReader;

const SKIPPED_RECORDS: [&str; 9] = ["vn", "vt", "vp", "g", "o", "s", "mtllib", "usemtl", "l"];

impl ObjReader {
    fn resolve_index(token: &str, handles: &[EntityHandle]) -> Result<EntityHandle, MeshUgridError> {
        let vertex = token.split('/').next().unwrap_or_default();
        let raw: i64 = parse_field(Some(vertex), "face vertex index")?;
        let count = handles.len() as i64;
        let one_based = if raw < 0 { count + raw + 1 } else { raw };
        if one_based < 1 || one_based > count {
            return Err(MeshUgridError::MeshIoParse(format!(
                "face vertex index {raw} out of range (have {count} vertices)"
            )));
        }
        Ok(handles[(one_based - 1) as usize])
    }
}

impl MeshReader for ObjReader {
    fn read_with_options<R: Read>(
        &self,
        reader: R,
        options: ReadOptions,
    ) -> Result<MeshCore, MeshUgridError> {
        let mut core = MeshCore::new();
        let mut handles = Vec::new();

        for (lineno, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split_whitespace();
            match parts.next() {
                Some("v") => {
                    let x = parse_field(parts.next(), "x coordinate")?;
                    let y = parse_field(parts.next(), "y coordinate")?;
                    let z = parse_field(parts.next(), "z coordinate")?;
                    handles.push(core.add_vertex([x, y, z])?);
                }
                Some("f") => {
                    let conn = parts
                        .map(|token| Self::resolve_index(token, &handles))
                        .collect::<Result<Vec<_>, _>>()?;
                    if conn.len() < 3 {
                        return Err(MeshUgridError::MeshIoParse(format!(
                            "line {}: face needs at least 3 vertices, found {}",
                            lineno + 1,
                            conn.len()
                        )));
                    }
                    core.add_element(EntityType::for_face(conn.len()), conn)?;
                }
                Some(record) if SKIPPED_RECORDS.contains(&record) || !options.strict => {}
                Some(record) => {
                    return Err(MeshUgridError::MeshIoParse(format!(
                        "line {}: unexpected OBJ record `{record}`",
                        lineno + 1
                    )));
                }
                None => {}
            }
        }

        Ok(core)
    }
}
