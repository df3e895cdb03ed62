//! Labeled multi-dimensional dataset.
//!
//! A [`Dataset`] is an ordered collection of named [`DataArray`]s. Every
//! array carries dimension names, free-form attributes and typed
//! n-dimensional data. Dimension names are shared across arrays: once a
//! dimension has a length, every other array using it must agree.

use crate::mesh_error::MeshUgridError;
use ndarray::{Array1, Array2, ArrayD};
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;

/// Attribute value attached to a [`DataArray`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Str(String),
    Int(i64),
    Float(f64),
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Str(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Str(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float(v)
    }
}

/// Attribute map, sorted by key.
pub type Attrs = BTreeMap<String, AttrValue>;

/// Typed array payload.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "dtype", content = "array", rename_all = "lowercase")]
pub enum ArrayData {
    Float64(ArrayD<f64>),
    Int64(ArrayD<i64>),
}

impl ArrayData {
    /// Shape of the payload.
    pub fn shape(&self) -> &[usize] {
        match self {
            ArrayData::Float64(a) => a.shape(),
            ArrayData::Int64(a) => a.shape(),
        }
    }
}

impl From<Array1<f64>> for ArrayData {
    fn from(a: Array1<f64>) -> Self {
        ArrayData::Float64(a.into_dyn())
    }
}

impl From<Array2<f64>> for ArrayData {
    fn from(a: Array2<f64>) -> Self {
        ArrayData::Float64(a.into_dyn())
    }
}

impl From<Array1<i64>> for ArrayData {
    fn from(a: Array1<i64>) -> Self {
        ArrayData::Int64(a.into_dyn())
    }
}

impl From<Array2<i64>> for ArrayData {
    fn from(a: Array2<i64>) -> Self {
        ArrayData::Int64(a.into_dyn())
    }
}

/// A named-dimension array with attributes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DataArray {
    dims: Vec<String>,
    attrs: Attrs,
    data: ArrayData,
}

impl DataArray {
    /// Wraps `data` with one dimension name per axis.
    pub fn new(data: impl Into<ArrayData>, dims: &[&str]) -> Result<Self, MeshUgridError> {
        let data = data.into();
        if data.shape().len() != dims.len() {
            return Err(MeshUgridError::InvalidShape {
                name: dims.join(", "),
                expected: format!("{} dimensions", dims.len()),
                found: data.shape().to_vec(),
            });
        }
        Ok(Self {
            dims: dims.iter().map(|d| d.to_string()).collect(),
            attrs: Attrs::new(),
            data,
        })
    }

    /// Replaces the attribute map.
    pub fn with_attrs(mut self, attrs: Attrs) -> Self {
        self.attrs = attrs;
        self
    }

    #[inline]
    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    #[inline]
    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    /// Looks up a single attribute.
    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    #[inline]
    pub fn data(&self) -> &ArrayData {
        &self.data
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Float payload, if this array holds `f64`.
    pub fn as_f64(&self) -> Option<&ArrayD<f64>> {
        match &self.data {
            ArrayData::Float64(a) => Some(a),
            ArrayData::Int64(_) => None,
        }
    }

    /// Integer payload, if this array holds `i64`.
    pub fn as_i64(&self) -> Option<&ArrayD<i64>> {
        match &self.data {
            ArrayData::Int64(a) => Some(a),
            ArrayData::Float64(_) => None,
        }
    }

    fn sized_dims(&self) -> impl Iterator<Item = (&str, usize)> {
        self.dims
            .iter()
            .map(String::as_str)
            .zip(self.shape().iter().copied())
    }
}

/// Ordered collection of named arrays sharing a dimension namespace.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    dims: Vec<(String, usize)>,
    variables: Vec<(String, DataArray)>,
}

impl Dataset {
    /// Creates an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces variable `name`.
    ///
    /// # Errors
    /// [`MeshUgridError::DimensionMismatch`] if one of the array's dimensions
    /// is already registered with a different length. The dataset is left
    /// unchanged on error.
    pub fn insert(&mut self, name: &str, array: DataArray) -> Result<(), MeshUgridError> {
        let existing = self.variables.iter().position(|(n, _)| n == name);
        let replaced = existing.map(|idx| self.variables.remove(idx));
        if replaced.is_some() {
            self.recompute_dims();
        }

        if let Err(err) = self.check_dims(name, &array) {
            if let (Some(idx), Some(old)) = (existing, replaced) {
                self.variables.insert(idx, old);
                self.recompute_dims();
            }
            return Err(err);
        }
        for (dim, len) in array.sized_dims() {
            if self.dim_len(dim).is_none() {
                self.dims.push((dim.to_string(), len));
            }
        }
        let entry = (name.to_string(), array);
        match existing {
            Some(idx) => self.variables.insert(idx, entry),
            None => self.variables.push(entry),
        }
        Ok(())
    }

    /// Looks up a variable by name.
    pub fn get(&self, name: &str) -> Option<&DataArray> {
        self.variables
            .iter()
            .find_map(|(n, a)| (n == name).then_some(a))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Variables in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataArray)> {
        self.variables.iter().map(|(n, a)| (n.as_str(), a))
    }

    /// Variable names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(|(n, _)| n.as_str())
    }

    /// Registered dimensions and their lengths, in first-use order.
    pub fn dims(&self) -> impl Iterator<Item = (&str, usize)> {
        self.dims.iter().map(|(d, len)| (d.as_str(), *len))
    }

    /// Length of dimension `dim`, if registered.
    pub fn dim_len(&self, dim: &str) -> Option<usize> {
        self.dims
            .iter()
            .find_map(|(d, len)| (d == dim).then_some(*len))
    }

    fn check_dims(&self, name: &str, array: &DataArray) -> Result<(), MeshUgridError> {
        for (dim, len) in array.sized_dims() {
            if let Some(expected) = self.dim_len(dim) {
                if expected != len {
                    return Err(MeshUgridError::DimensionMismatch {
                        dim: dim.to_string(),
                        variable: name.to_string(),
                        expected,
                        found: len,
                    });
                }
            }
        }
        Ok(())
    }

    fn recompute_dims(&mut self) {
        let mut dims: Vec<(String, usize)> = Vec::new();
        for (_, array) in &self.variables {
            for (dim, len) in array.sized_dims() {
                if !dims.iter().any(|(d, _)| d == dim) {
                    dims.push((dim.to_string(), len));
                }
            }
        }
        self.dims = dims;
    }
}

/// Serializes `[(key, value)]` pairs as a map, keeping order.
struct OrderedMap<'a, V>(&'a [(String, V)]);

impl<V: Serialize> Serialize for OrderedMap<'_, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

impl Serialize for Dataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Dataset", 2)?;
        state.serialize_field("dims", &OrderedMap(&self.dims))?;
        state.serialize_field("variables", &OrderedMap(&self.variables))?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn lon() -> DataArray {
        DataArray::new(array![0.0, 90.0, 180.0], &["n_node"]).unwrap()
    }

    #[test]
    fn rank_must_match_dim_count() {
        let err = DataArray::new(array![[1_i64, 2], [3, 4]], &["n_face"]).unwrap_err();
        assert!(matches!(err, MeshUgridError::InvalidShape { .. }));
    }

    #[test]
    fn dims_are_registered_on_insert() {
        let mut ds = Dataset::new();
        ds.insert("node_lon", lon()).unwrap();
        let conn = DataArray::new(array![[0_i64, 1, 2]], &["n_face", "n_max_face_nodes"]).unwrap();
        ds.insert("face_node_connectivity", conn).unwrap();

        let dims: Vec<(&str, usize)> = ds.dims().collect();
        assert_eq!(
            dims,
            vec![("n_node", 3), ("n_face", 1), ("n_max_face_nodes", 3)]
        );
        assert_eq!(
            ds.names().collect::<Vec<_>>(),
            vec!["node_lon", "face_node_connectivity"]
        );
    }

    #[test]
    fn conflicting_dim_length_is_rejected() {
        let mut ds = Dataset::new();
        ds.insert("node_lon", lon()).unwrap();
        let lat = DataArray::new(array![0.0, 0.0], &["n_node"]).unwrap();
        let err = ds.insert("node_lat", lat).unwrap_err();
        assert!(matches!(
            err,
            MeshUgridError::DimensionMismatch { expected: 3, found: 2, .. }
        ));
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn replacing_a_variable_may_resize_its_dims() {
        let mut ds = Dataset::new();
        ds.insert("node_lon", lon()).unwrap();
        let shorter = DataArray::new(array![1.0], &["n_node"]).unwrap();
        ds.insert("node_lon", shorter).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.dim_len("n_node"), Some(1));
    }

    #[test]
    fn attrs_and_typed_access() {
        let mut attrs = Attrs::new();
        attrs.insert("units".into(), "degrees_east".into());
        attrs.insert("start_index".into(), 0_i64.into());
        let a = lon().with_attrs(attrs);
        assert_eq!(a.attr("units"), Some(&AttrValue::Str("degrees_east".into())));
        assert_eq!(a.attr("start_index"), Some(&AttrValue::Int(0)));
        assert!(a.as_f64().is_some());
        assert!(a.as_i64().is_none());
    }

    #[test]
    fn serializes_dims_and_variables() {
        let mut ds = Dataset::new();
        ds.insert("b", lon()).unwrap();
        ds.insert("a", lon()).unwrap();
        let json = serde_json::to_value(&ds).unwrap();
        assert_eq!(json["variables"].as_object().unwrap().len(), 2);
        assert_eq!(json["dims"]["n_node"], 3);
        assert_eq!(json["variables"]["a"]["data"]["dtype"], "float64");
    }
}
