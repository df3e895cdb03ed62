//! UGRID dataset assembly.
//!
//! [`emit`] packages node coordinates and face connectivity under the fixed
//! UGRID names from [`conventions`] and reports how the source dimension
//! names map onto them.

pub mod conventions;

use crate::data::dataset::{DataArray, Dataset};
use crate::mesh_error::MeshUgridError;
use conventions::{
    FACE_DIM, FACE_NODE_CONNECTIVITY, FACE_NODE_CONNECTIVITY_DIMS, NODE_COORDINATES, NODE_DIM,
    face_node_connectivity_attrs, node_lat_attrs, node_lon_attrs,
};
use ndarray::{Array1, Array2};
use serde::Serialize;

/// Mapping from source dimension names to UGRID dimension names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SourceDims {
    /// UGRID name for the source `n_nodes` dimension.
    pub n_nodes: &'static str,
    /// UGRID name for the source `n_faces` dimension.
    pub n_faces: &'static str,
}

impl Default for SourceDims {
    fn default() -> Self {
        Self {
            n_nodes: NODE_DIM,
            n_faces: FACE_DIM,
        }
    }
}

impl SourceDims {
    /// Looks up the UGRID name for a source dimension.
    pub fn get(&self, source: &str) -> Option<&'static str> {
        match source {
            "n_nodes" => Some(self.n_nodes),
            "n_faces" => Some(self.n_faces),
            _ => None,
        }
    }

    /// `(source, ugrid)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> {
        [("n_nodes", self.n_nodes), ("n_faces", self.n_faces)].into_iter()
    }
}

/// Builds the UGRID dataset from converted arrays.
///
/// Connectivity values are not checked against the node count.
pub fn emit(
    lon: Array1<f64>,
    lat: Array1<f64>,
    face_node_connectivity: Array2<i64>,
) -> Result<(Dataset, SourceDims), MeshUgridError> {
    let mut ds = Dataset::new();
    ds.insert(
        NODE_COORDINATES[0],
        DataArray::new(lon, &[NODE_DIM])?.with_attrs(node_lon_attrs()),
    )?;
    ds.insert(
        NODE_COORDINATES[1],
        DataArray::new(lat, &[NODE_DIM])?.with_attrs(node_lat_attrs()),
    )?;
    ds.insert(
        FACE_NODE_CONNECTIVITY,
        DataArray::new(face_node_connectivity, &FACE_NODE_CONNECTIVITY_DIMS)?
            .with_attrs(face_node_connectivity_attrs()),
    )?;
    Ok((ds, SourceDims::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::AttrValue;
    use conventions::INT_FILL_VALUE;
    use ndarray::array;

    #[test]
    fn emits_three_named_variables() {
        let (ds, dims) = emit(
            array![0.0, 90.0, 180.0],
            array![0.0, 0.0, 45.0],
            array![[0, 1, 2]],
        )
        .unwrap();
        assert_eq!(
            ds.names().collect::<Vec<_>>(),
            vec!["node_lon", "node_lat", "face_node_connectivity"]
        );
        assert_eq!(ds.dim_len("n_node"), Some(3));
        assert_eq!(ds.dim_len("n_face"), Some(1));
        assert_eq!(ds.dim_len("n_max_face_nodes"), Some(3));
        assert_eq!(dims.get("n_nodes"), Some("n_node"));
        assert_eq!(dims.get("n_faces"), Some("n_face"));
        assert_eq!(dims.get("n_edges"), None);
    }

    #[test]
    fn attributes_follow_ugrid() {
        let (ds, _) = emit(array![0.0], array![0.0], array![[0, INT_FILL_VALUE]]).unwrap();
        let lon = ds.get("node_lon").unwrap();
        assert_eq!(lon.attr("units"), Some(&AttrValue::from("degrees_east")));
        assert_eq!(lon.attr("standard_name"), Some(&AttrValue::from("longitude")));
        let lat = ds.get("node_lat").unwrap();
        assert_eq!(lat.attr("units"), Some(&AttrValue::from("degrees_north")));
        let conn = ds.get("face_node_connectivity").unwrap();
        assert_eq!(conn.dims(), ["n_face", "n_max_face_nodes"]);
        assert_eq!(conn.attr("cf_role"), Some(&AttrValue::from("face_node_connectivity")));
        assert_eq!(conn.attr("start_index"), Some(&AttrValue::Int(0)));
        assert_eq!(conn.attr("_FillValue"), Some(&AttrValue::Int(INT_FILL_VALUE)));
    }

    #[test]
    fn mismatched_lon_lat_lengths_fail() {
        let err = emit(array![0.0, 1.0], array![0.0], array![[0]]).unwrap_err();
        assert!(matches!(err, MeshUgridError::DimensionMismatch { .. }));
    }

    #[test]
    fn out_of_range_connectivity_is_passed_through() {
        let (ds, _) = emit(array![0.0], array![0.0], array![[5, 6, 7]]).unwrap();
        let conn = ds.get("face_node_connectivity").unwrap().as_i64().unwrap();
        assert_eq!(conn.iter().copied().collect::<Vec<_>>(), vec![5, 6, 7]);
    }
}
