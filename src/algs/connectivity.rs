//! Ragged connectivity to padded, 0-based tables.
//!
//! Both steps are standalone: [`to_zero_based`] shifts source ids,
//! [`pad_connectivity`] packs rows into a rectangle using a fill value.

use crate::mesh_error::MeshUgridError;
use itertools::Itertools;
use ndarray::{Array1, Array2, ArrayView2, Axis};

/// Shifts 1-based vertex ids to 0-based indices.
///
/// A zero id has no 0-based counterpart and is reported as
/// [`MeshUgridError::InvalidHandle`], as is an id that does not fit `i64`.
pub fn to_zero_based(rows: &[Vec<u64>]) -> Result<Vec<Vec<i64>>, MeshUgridError> {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|&id| {
                    id.checked_sub(1)
                        .and_then(|idx| i64::try_from(idx).ok())
                        .ok_or(MeshUgridError::InvalidHandle(id))
                })
                .collect()
        })
        .collect()
}

/// Packs ragged rows into an `(n_rows, max_row_len)` array.
///
/// Each row is copied left-aligned; the remainder is `fill`. Zero-length rows
/// are accepted and become all-fill rows.
///
/// # Errors
/// [`MeshUgridError::EmptyMesh`] if `rows` is empty, since the table width is
/// undefined.
pub fn pad_connectivity(rows: &[Vec<i64>], fill: i64) -> Result<Array2<i64>, MeshUgridError> {
    let width = rows
        .iter()
        .map(Vec::len)
        .max()
        .ok_or(MeshUgridError::EmptyMesh)?;
    let mut table = Array2::from_elem((rows.len(), width), fill);
    for (mut out, row) in table.axis_iter_mut(Axis(0)).zip(rows) {
        for (slot, &idx) in out.iter_mut().zip(row) {
            *slot = idx;
        }
    }
    Ok(table)
}

/// Number of leading non-fill entries in each row of a padded table.
pub fn face_node_counts(table: &ArrayView2<'_, i64>, fill: i64) -> Array1<i64> {
    table
        .axis_iter(Axis(0))
        .map(|row| row.iter().take_while(|&&v| v != fill).count() as i64)
        .collect()
}

/// Indices of rows with no valid entry.
pub fn empty_rows(rows: &[Vec<i64>]) -> Vec<usize> {
    rows.iter().positions(Vec::is_empty).collect_vec()
}
