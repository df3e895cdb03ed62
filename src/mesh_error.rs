//! MeshUgridError: Unified error type for mesh-ugrid public APIs
//!
//! Every fallible operation in the crate, from opening a mesh file to
//! assembling the output dataset, reports failures through this enum so
//! callers can propagate them with `?`.

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for mesh loading and UGRID conversion.
#[derive(Debug, Error)]
pub enum MeshUgridError {
    /// The mesh file does not exist.
    #[error("mesh file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    /// Low-level I/O failure while reading a mesh.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The file contents could not be parsed as the detected mesh format.
    #[error("Mesh I/O parse error: {0}")]
    MeshIoParse(String),
    /// No reader is registered for the file extension.
    #[error("unsupported mesh format: `{0}`")]
    UnsupportedFormat(String),
    /// The mesh contains no 2D elements, so no connectivity table can be built.
    #[error("mesh has no 2D elements")]
    EmptyMesh,
    /// An entity handle or source index is zero, out of range, or of the wrong type.
    #[error("invalid entity handle: {0}")]
    InvalidHandle(u64),
    /// A 2D element references no vertices.
    #[error("element {index} has no vertices")]
    EmptyElement { index: usize },
    /// A vertex has no defined direction from the origin: it sits at the origin
    /// or has a NaN or infinite coordinate.
    #[error("vertex {index} has zero or non-finite radius; longitude/latitude undefined")]
    DegenerateVertex { index: usize },
    /// An array's shape does not fit the expected layout.
    #[error("invalid array shape for `{name}`: expected {expected}, found {found:?}")]
    InvalidShape {
        name: String,
        expected: String,
        found: Vec<usize>,
    },
    /// A dimension was registered twice with different lengths.
    #[error("dimension `{dim}` has length {expected}, but `{variable}` uses {found}")]
    DimensionMismatch {
        dim: String,
        variable: String,
        expected: usize,
        found: usize,
    },
}
