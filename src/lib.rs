#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-ugrid
//!
//! mesh-ugrid loads polygonal surface meshes (Gmsh `.msh`, legacy VTK, OBJ)
//! and encodes them in the UGRID unstructured-grid conventions as a labeled
//! multi-dimensional [`Dataset`](data::dataset::Dataset).
//!
//! ## Pipeline
//! 1. [`io::load`] reads the file into a [`MeshCore`](topology::MeshCore)
//!    and extracts vertex coordinates and 2D element connectivity (1-based).
//! 2. [`algs::lonlat`] maps Cartesian vertices to longitude/latitude in
//!    degrees; [`algs::connectivity`] shifts indices to 0-based and pads the
//!    ragged rows with [`INT_FILL_VALUE`](ugrid::conventions::INT_FILL_VALUE).
//! 3. [`ugrid::emit`] builds `node_lon`, `node_lat` and
//!    `face_node_connectivity` plus the source → UGRID dimension mapping.
//!
//! [`convert::read_ugrid`] runs all three steps.
//!
//! ```rust,no_run
//! let (ds, dims) = mesh_ugrid::convert::read_ugrid("sphere.vtk")?;
//! assert_eq!(dims.get("n_faces"), Some("n_face"));
//! println!("{} faces", ds.dim_len("n_face").unwrap_or(0));
//! # Ok::<(), mesh_ugrid::mesh_error::MeshUgridError>(())
//! ```
//!
//! ## Known gaps
//! - Vertices at the origin have no direction; their latitude is NaN. A NaN or
//!   infinite coordinate is reported the same way by the conversion checks.
//! - 2D elements with no vertices become all-fill rows.
//!
//! Both are logged by default and can be turned into errors with
//! [`DegenerateHandling::Error`](convert::DegenerateHandling::Error).
//!
//! ## Features
//! - `rayon`: run the coordinate transform and connectivity packing in
//!   parallel.

pub mod algs;
pub mod convert;
pub mod data;
pub mod io;
pub mod mesh_error;
pub mod topology;
pub mod ugrid;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::convert::{
        ConvertOptions, DegenerateHandling, mesh_to_ugrid, read_ugrid, read_ugrid_with,
    };
    pub use crate::data::dataset::{ArrayData, AttrValue, DataArray, Dataset};
    pub use crate::io::{MeshFormat, MeshReader, RawMesh, ReadOptions};
    pub use crate::mesh_error::MeshUgridError;
    pub use crate::topology::{EntityHandle, EntityType, MeshCore};
    pub use crate::ugrid::SourceDims;
}
