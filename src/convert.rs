//! Mesh file → UGRID dataset conversion.
//!
//! The pipeline is linear: [`io::load`](crate::io::load) extracts vertices and
//! 2D connectivity, then coordinates are mapped to lon/lat while connectivity
//! is zero-based and padded, and finally [`ugrid::emit`] builds the dataset.
//! The two middle stages are independent; with the `rayon` feature they run
//! on separate threads.

use crate::algs::connectivity::{empty_rows, pad_connectivity, to_zero_based};
use crate::algs::lonlat::xyz_to_lonlat_deg;
use crate::data::dataset::Dataset;
use crate::io::{self, RawMesh, ReadOptions};
use crate::mesh_error::MeshUgridError;
use crate::ugrid::conventions::INT_FILL_VALUE;
use crate::ugrid::{self, SourceDims};
use itertools::Itertools;
use ndarray::{Array2, ArrayView2, Axis};
use std::path::Path;

/// How to treat geometry the conversion cannot represent meaningfully:
/// 2D elements with no vertices and vertices whose radius is zero or
/// non-finite (at the origin, or with a NaN or infinite coordinate).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DegenerateHandling {
    /// Emit all-fill rows and NaN coordinates silently.
    Ignore,
    /// Emit them and log a warning.
    #[default]
    Warn,
    /// Fail with [`MeshUgridError::EmptyElement`] or
    /// [`MeshUgridError::DegenerateVertex`].
    Error,
}

/// Conversion settings.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConvertOptions {
    pub degenerate: DegenerateHandling,
    pub read: ReadOptions,
}

/// Reads a mesh file and encodes it as a UGRID dataset.
///
/// Returns the dataset and the mapping from source dimension names
/// (`n_nodes`, `n_faces`) to UGRID dimension names.
pub fn read_ugrid(path: impl AsRef<Path>) -> Result<(Dataset, SourceDims), MeshUgridError> {
    read_ugrid_with(path, &ConvertOptions::default())
}

/// [`read_ugrid`] with explicit options.
pub fn read_ugrid_with(
    path: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<(Dataset, SourceDims), MeshUgridError> {
    let raw = io::load_with_options(path, options.read)?;
    mesh_to_ugrid(&raw, options)
}

/// Converts already-loaded raw mesh arrays.
pub fn mesh_to_ugrid(
    raw: &RawMesh,
    options: &ConvertOptions,
) -> Result<(Dataset, SourceDims), MeshUgridError> {
    if raw.coords.len() % 3 != 0 {
        return Err(MeshUgridError::InvalidShape {
            name: "coords".into(),
            expected: "a multiple of 3 values".into(),
            found: vec![raw.coords.len()],
        });
    }
    let xyz = ArrayView2::from_shape((raw.num_vertices(), 3), raw.coords.as_slice())
        .map_err(|_| MeshUgridError::InvalidShape {
            name: "coords".into(),
            expected: "(n, 3)".into(),
            found: vec![raw.coords.len()],
        })?;

    let (lonlat, table) = join(
        || xyz_to_lonlat_deg(&xyz),
        || pack_connectivity(&raw.connectivity, options.degenerate),
    );
    let (lon, lat) = lonlat?;
    let table = table?;
    check_vertices(&xyz, options.degenerate)?;

    log::debug!(
        "converted mesh: {} nodes, {} faces, max {} nodes per face",
        lon.len(),
        table.nrows(),
        table.ncols()
    );
    ugrid::emit(lon, lat, table)
}

fn pack_connectivity(
    rows: &[Vec<u64>],
    handling: DegenerateHandling,
) -> Result<Array2<i64>, MeshUgridError> {
    let rows = to_zero_based(rows)?;
    let empty = empty_rows(&rows);
    if let Some(&index) = empty.first() {
        match handling {
            DegenerateHandling::Error => return Err(MeshUgridError::EmptyElement { index }),
            DegenerateHandling::Warn => {
                log::warn!(
                    "{} element(s) without vertices, first at index {index}; rows are all fill",
                    empty.len()
                );
            }
            DegenerateHandling::Ignore => {}
        }
    }
    pad_connectivity(&rows, INT_FILL_VALUE)
}

fn check_vertices(
    xyz: &ArrayView2<'_, f64>,
    handling: DegenerateHandling,
) -> Result<(), MeshUgridError> {
    if handling == DegenerateHandling::Ignore {
        return Ok(());
    }
    let mut degenerate = xyz.axis_iter(Axis(0)).positions(|row| {
        let r = row.dot(&row).sqrt();
        r == 0.0 || !r.is_finite()
    });
    let Some(index) = degenerate.next() else {
        return Ok(());
    };
    match handling {
        DegenerateHandling::Error => Err(MeshUgridError::DegenerateVertex { index }),
        _ => {
            let row = xyz.row(index);
            log::warn!(
                "{} vertex(es) with zero or non-finite radius, first at index {index} ({}, {}, {})",
                degenerate.count() + 1,
                row[0],
                row[1],
                row[2]
            );
            Ok(())
        }
    }
}

#[cfg(feature = "rayon")]
fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    rayon::join(a, b)
}

#[cfg(not(feature = "rayon"))]
fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA,
    B: FnOnce() -> RB,
{
    (a(), b())
}
