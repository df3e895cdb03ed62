//! Gmsh `.msh` reader.
//!
//! # Supported format
//! - ASCII `.msh` version **2.2**.
//! - Element types: 1 (line), 2 (triangle), 3 (quad), 4 (tet), 5 (hex),
//!   6 (prism), 7 (pyramid), 15 (point).
//!
//! # Limitations
//! - Binary files are not supported.
//! - `.msh` v4.x (block-based) is not supported.
//! - Higher-order elements are not supported.
//! - Element tags are skipped.
//!
//! Gmsh node tags may be sparse; nodes are renumbered to contiguous vertex
//! handles in the order they appear in `$Nodes`.

use crate::io::{MeshReader, ReadOptions, parse_field};
use crate::mesh_error::MeshUgridError;
use crate::topology::entity_type::EntityType;
use crate::topology::handle::EntityHandle;
use crate::topology::mesh_core::MeshCore;
use std::collections::HashMap;
use std::io::Read;

/// Gmsh `.msh` reader for ASCII v2.2 meshes.
#[derive(Debug, Default, Clone)]
pub struct GmshReader;

impl GmshReader {
    fn parse_version(line: &str) -> Result<&str, MeshUgridError> {
        let mut parts = line.split_whitespace();
        let version = parts
            .next()
            .ok_or_else(|| MeshUgridError::MeshIoParse("missing mesh format version".into()))?;
        let file_type = parts
            .next()
            .ok_or_else(|| MeshUgridError::MeshIoParse("missing mesh format type".into()))?;
        if file_type != "0" {
            return Err(MeshUgridError::MeshIoParse(
                "binary .msh files are not supported".into(),
            ));
        }
        Ok(version)
    }

    fn element_type(elem_type: u32) -> Option<EntityType> {
        match elem_type {
            1 => Some(EntityType::Edge),
            2 => Some(EntityType::Triangle),
            3 => Some(EntityType::Quadrilateral),
            4 => Some(EntityType::Tetrahedron),
            5 => Some(EntityType::Hexahedron),
            6 => Some(EntityType::Prism),
            7 => Some(EntityType::Pyramid),
            15 => Some(EntityType::Vertex),
            _ => None,
        }
    }

    fn expect_end<'a>(
        lines: &mut impl Iterator<Item = &'a str>,
        marker: &str,
    ) -> Result<(), MeshUgridError> {
        match lines.next() {
            Some(line) if line.trim() == marker => Ok(()),
            _ => Err(MeshUgridError::MeshIoParse(format!("missing {marker}"))),
        }
    }
}

impl MeshReader for GmshReader {
    fn read_with_options<R: Read>(
        &self,
        mut reader: R,
        options: ReadOptions,
    ) -> Result<MeshCore, MeshUgridError> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        let mut lines = contents.lines();

        let mut version: Option<String> = None;
        let mut core = MeshCore::new();
        let mut node_handles: HashMap<u64, EntityHandle> = HashMap::new();

        while let Some(line) = lines.next() {
            match line.trim() {
                "$MeshFormat" => {
                    let format_line = lines
                        .next()
                        .ok_or_else(|| MeshUgridError::MeshIoParse("missing MeshFormat".into()))?;
                    version = Some(Self::parse_version(format_line)?.to_string());
                    Self::expect_end(&mut lines, "$EndMeshFormat")?;
                }
                "$Nodes" => {
                    let node_count: usize = parse_field(lines.next().map(str::trim), "node count")?;
                    for _ in 0..node_count {
                        let node_line = lines.next().ok_or_else(|| {
                            MeshUgridError::MeshIoParse("unexpected end of node list".into())
                        })?;
                        let mut parts = node_line.split_whitespace();
                        let tag: u64 = parse_field(parts.next(), "node id")?;
                        let x = parse_field(parts.next(), "x coordinate")?;
                        let y = parse_field(parts.next(), "y coordinate")?;
                        let z = parse_field(parts.next(), "z coordinate")?;
                        let handle = core.add_vertex([x, y, z])?;
                        if node_handles.insert(tag, handle).is_some() {
                            return Err(MeshUgridError::MeshIoParse(format!(
                                "duplicate node id: {tag}"
                            )));
                        }
                    }
                    Self::expect_end(&mut lines, "$EndNodes")?;
                }
                "$Elements" => {
                    let elem_count: usize =
                        parse_field(lines.next().map(str::trim), "element count")?;
                    for _ in 0..elem_count {
                        let elem_line = lines.next().ok_or_else(|| {
                            MeshUgridError::MeshIoParse("unexpected end of element list".into())
                        })?;
                        let mut parts = elem_line.split_whitespace();
                        let _elem_id: u64 = parse_field(parts.next(), "element id")?;
                        let elem_type: u32 = parse_field(parts.next(), "element type")?;
                        let entity_type = Self::element_type(elem_type).ok_or_else(|| {
                            MeshUgridError::MeshIoParse(format!(
                                "unsupported element type: {elem_type}"
                            ))
                        })?;
                        let num_tags: usize = parse_field(parts.next(), "element tag count")?;
                        for _ in 0..num_tags {
                            parts.next();
                        }
                        let node_count = entity_type.vertex_count().unwrap_or_default();
                        let mut conn = Vec::with_capacity(node_count);
                        for _ in 0..node_count {
                            let tag: u64 = parse_field(parts.next(), "element node id")?;
                            let handle = node_handles.get(&tag).copied().ok_or_else(|| {
                                MeshUgridError::MeshIoParse(format!(
                                    "element references unknown node {tag}"
                                ))
                            })?;
                            conn.push(handle);
                        }
                        // point elements duplicate nodes, they are not mesh entities
                        if entity_type != EntityType::Vertex {
                            core.add_element(entity_type, conn)?;
                        }
                    }
                    Self::expect_end(&mut lines, "$EndElements")?;
                }
                "" => {}
                other if options.strict => {
                    return Err(MeshUgridError::MeshIoParse(format!(
                        "unexpected gmsh section: {other}"
                    )));
                }
                _ => {
                    // ignore other sections
                }
            }
        }

        let version = version.unwrap_or_else(|| "2.2".to_string());
        if version != "2.2" {
            return Err(MeshUgridError::MeshIoParse(format!(
                "unsupported gmsh version: {version}"
            )));
        }

        Ok(core)
    }
}
