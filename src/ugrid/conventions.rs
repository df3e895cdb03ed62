//! UGRID names, dimensions and attributes.
//!
//! These follow the UGRID conventions (<https://ugrid-conventions.github.io>)
//! as used for 2D unstructured climate grids.

use crate::data::dataset::{AttrValue, Attrs};

/// Integer fill value marking "no node" in padded connectivity rows.
pub const INT_FILL_VALUE: i64 = i64::MIN;

pub const NODE_DIM: &str = "n_node";
pub const FACE_DIM: &str = "n_face";
pub const N_MAX_FACE_NODES_DIM: &str = "n_max_face_nodes";

/// Longitude and latitude node coordinate variable names.
pub const NODE_COORDINATES: [&str; 2] = ["node_lon", "node_lat"];
pub const FACE_NODE_CONNECTIVITY: &str = "face_node_connectivity";
pub const FACE_NODE_CONNECTIVITY_DIMS: [&str; 2] = [FACE_DIM, N_MAX_FACE_NODES_DIM];

fn attrs<const N: usize>(entries: [(&str, AttrValue); N]) -> Attrs {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

pub fn node_lon_attrs() -> Attrs {
    attrs([
        ("standard_name", "longitude".into()),
        ("long name", "longitude of mesh nodes".into()),
        ("units", "degrees_east".into()),
    ])
}

pub fn node_lat_attrs() -> Attrs {
    attrs([
        ("standard_name", "latitude".into()),
        ("long name", "latitude of mesh nodes".into()),
        ("units", "degrees_north".into()),
    ])
}

pub fn face_node_connectivity_attrs() -> Attrs {
    attrs([
        ("cf_role", "face_node_connectivity".into()),
        ("long name", "Maps every face to its corner nodes.".into()),
        ("start_index", 0_i64.into()),
        ("_FillValue", INT_FILL_VALUE.into()),
    ])
}
