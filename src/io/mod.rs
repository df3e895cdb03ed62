//! Mesh file loading.
//!
//! This module provides trait-based readers that populate a
//! [`MeshCore`] from a byte stream, and the [`load`] entry point that picks a
//! reader by file extension and extracts the raw arrays the UGRID conversion
//! needs.

pub mod gmsh;
pub mod obj;
pub mod vtk;

use crate::mesh_error::MeshUgridError;
use crate::topology::handle::EntityHandle;
use crate::topology::mesh_core::MeshCore;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Optional settings shared by all readers.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReadOptions {
    /// When enabled, unknown sections/records are an error instead of being skipped.
    pub strict: bool,
}

/// Trait for mesh readers that populate a [`MeshCore`].
pub trait MeshReader {
    /// Parse mesh data from a reader.
    fn read<R: Read>(&self, reader: R) -> Result<MeshCore, MeshUgridError> {
        self.read_with_options(reader, ReadOptions::default())
    }

    /// Parse mesh data from a reader with explicit options.
    fn read_with_options<R: Read>(
        &self,
        reader: R,
        options: ReadOptions,
    ) -> Result<MeshCore, MeshUgridError>;
}

/// Mesh file formats understood by [`load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    /// Gmsh ASCII `.msh` v2.2.
    Gmsh,
    /// Legacy ASCII VTK `.vtk`.
    Vtk,
    /// Wavefront `.obj`.
    Obj,
}

impl MeshFormat {
    /// Detects the format from the (case-insensitive) file extension.
    pub fn from_path(path: &Path) -> Result<Self, MeshUgridError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "msh" => Ok(MeshFormat::Gmsh),
            "vtk" => Ok(MeshFormat::Vtk),
            "obj" => Ok(MeshFormat::Obj),
            _ => Err(MeshUgridError::UnsupportedFormat(ext)),
        }
    }

    /// Reads a mesh in this format from `reader`.
    pub fn read<R: Read>(self, reader: R, options: ReadOptions) -> Result<MeshCore, MeshUgridError> {
        match self {
            MeshFormat::Gmsh => gmsh::GmshReader.read_with_options(reader, options),
            MeshFormat::Vtk => vtk::VtkReader.read_with_options(reader, options),
            MeshFormat::Obj => obj::ObjReader.read_with_options(reader, options),
        }
    }
}

/// Raw arrays extracted from a loaded mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMesh {
    /// Vertex coordinates flattened as `x0 y0 z0 x1 y1 z1 ...`.
    pub coords: Vec<f64>,
    /// Handles of the 2D elements, in engine order.
    pub elements: Vec<EntityHandle>,
    /// Per-element vertex ids, 1-based, parallel to `elements`.
    pub connectivity: Vec<Vec<u64>>,
}

impl RawMesh {
    /// Extracts vertices and 2D element connectivity from an engine.
    ///
    /// Connectivity is queried one element at a time.
    pub fn from_core(core: &MeshCore) -> Result<Self, MeshUgridError> {
        let vertices: Vec<EntityHandle> = core.vertices().collect();
        let coords = core.get_coords(&vertices)?;
        let elements = core.entities_by_dimension(2);
        let connectivity = elements
            .iter()
            .map(|&e| {
                core.connectivity(e)
                    .map(|conn| conn.iter().map(|v| v.id()).collect())
            })
            .collect::<Result<Vec<Vec<u64>>, _>>()?;
        Ok(Self {
            coords,
            elements,
            connectivity,
        })
    }

    /// Number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.coords.len() / 3
    }

    /// Number of 2D elements.
    #[inline]
    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }
}

/// Opens `path` and reads it into a [`MeshCore`].
///
/// The file is opened before its extension is inspected, so a missing file is
/// always [`MeshUgridError::FileNotFound`] whatever its extension.
pub fn read_core(path: impl AsRef<Path>, options: ReadOptions) -> Result<MeshCore, MeshUgridError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => MeshUgridError::FileNotFound(path.to_path_buf()),
        _ => MeshUgridError::Io(err),
    })?;
    let format = MeshFormat::from_path(path)?;
    let core = format.read(BufReader::new(file), options)?;
    log::debug!(
        "loaded {} ({format:?}): {} vertices, {} 2D elements",
        path.display(),
        core.num_vertices(),
        core.num_entities_by_dimension(2)
    );
    Ok(core)
}

/// Loads `path` and returns its vertex coordinates and 2D connectivity.
pub fn load(path: impl AsRef<Path>) -> Result<RawMesh, MeshUgridError> {
    load_with_options(path, ReadOptions::default())
}

/// [`load`] with explicit reader options.
pub fn load_with_options(
    path: impl AsRef<Path>,
    options: ReadOptions,
) -> Result<RawMesh, MeshUgridError> {
    let core = read_core(path, options)?;
    RawMesh::from_core(&core)
}

/// Shared token-parsing helpers for the ASCII readers.
pub(crate) fn parse_field<T: std::str::FromStr>(
    raw: Option<&str>,
    what: &str,
) -> Result<T, MeshUgridError> {
    let raw = raw.ok_or_else(|| MeshUgridError::MeshIoParse(format!("missing {what}")))?;
    raw.parse::<T>()
        .map_err(|_| MeshUgridError::MeshIoParse(format!("invalid {what}: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn format_detection_is_case_insensitive() {
        assert_eq!(
            MeshFormat::from_path(Path::new("a/b/mesh.MSH")).unwrap(),
            MeshFormat::Gmsh
        );
        assert_eq!(
            MeshFormat::from_path(Path::new("grid.vtk")).unwrap(),
            MeshFormat::Vtk
        );
        assert_eq!(
            MeshFormat::from_path(Path::new("sphere.obj")).unwrap(),
            MeshFormat::Obj
        );
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let err = MeshFormat::from_path(Path::new("mesh.h5m")).unwrap_err();
        assert!(matches!(err, MeshUgridError::UnsupportedFormat(ext) if ext == "h5m"));
        let err = MeshFormat::from_path(Path::new("no_extension")).unwrap_err();
        assert!(matches!(err, MeshUgridError::UnsupportedFormat(ext) if ext.is_empty()));
    }

    #[test]
    fn missing_file_is_reported_with_its_path() {
        for name in ["definitely/not/here.msh", "definitely/not/here.h5m"] {
            let path = PathBuf::from(name);
            let err = load(&path).unwrap_err();
            assert!(matches!(err, MeshUgridError::FileNotFound(p) if p == path), "{name}");
        }
    }

    #[test]
    fn parse_field_reports_missing_and_invalid() {
        assert_eq!(parse_field::<usize>(Some("12"), "count").unwrap(), 12);
        let err = parse_field::<usize>(None, "count").unwrap_err();
        assert_eq!(err.to_string(), "Mesh I/O parse error: missing count");
        let err = parse_field::<usize>(Some("x"), "count").unwrap_err();
        assert_eq!(err.to_string(), "Mesh I/O parse error: invalid count: x");
    }
}
