//! In-memory mesh entity database.
//!
//! `MeshCore` stores vertices with their coordinates and higher-dimensional
//! elements with their ordered vertex connectivity. Readers in [`crate::io`]
//! populate it; the UGRID conversion only queries it.
//!
//! Handles are issued per entity type in insertion order, starting at 1, so
//! the n-th vertex added has handle id `n` (see [`EntityHandle`]).

use crate::mesh_error::MeshUgridError;
use crate::topology::entity_type::EntityType;
use crate::topology::handle::EntityHandle;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
struct Element {
    handle: EntityHandle,
    connectivity: Vec<EntityHandle>,
}

/// Entity storage for a single loaded mesh.
#[derive(Clone, Debug, Default)]
pub struct MeshCore {
    coords: Vec<[f64; 3]>,
    elements: BTreeMap<EntityType, Vec<Element>>,
}

impl MeshCore {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vertex at `xyz` and returns its handle.
    pub fn add_vertex(&mut self, xyz: [f64; 3]) -> Result<EntityHandle, MeshUgridError> {
        let handle = EntityHandle::new(EntityType::Vertex, self.coords.len() as u64 + 1)?;
        self.coords.push(xyz);
        Ok(handle)
    }

    /// Adds an element of `entity_type` with ordered vertex `connectivity`.
    ///
    /// Every connectivity handle must refer to an existing vertex. Fixed-size
    /// types must receive exactly their vertex count.
    pub fn add_element(
        &mut self,
        entity_type: EntityType,
        connectivity: Vec<EntityHandle>,
    ) -> Result<EntityHandle, MeshUgridError> {
        if entity_type == EntityType::Vertex {
            return Err(MeshUgridError::MeshIoParse(
                "vertices must be added with add_vertex".into(),
            ));
        }
        if let Some(expected) = entity_type.vertex_count() {
            if connectivity.len() != expected {
                return Err(MeshUgridError::MeshIoParse(format!(
                    "{entity_type:?} expects {expected} vertices, found {}",
                    connectivity.len()
                )));
            }
        }
        for vertex in &connectivity {
            self.vertex_index(*vertex)?;
        }
        let bucket = self.elements.entry(entity_type).or_default();
        let handle = EntityHandle::new(entity_type, bucket.len() as u64 + 1)?;
        bucket.push(Element {
            handle,
            connectivity,
        });
        Ok(handle)
    }

    /// Number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.coords.len()
    }

    /// Number of entities with topological dimension `dim` (vertices for 0).
    pub fn num_entities_by_dimension(&self, dim: u8) -> usize {
        if dim == 0 {
            return self.coords.len();
        }
        self.elements
            .iter()
            .filter(|(ty, _)| ty.dimension() == dim)
            .map(|(_, elems)| elems.len())
            .sum()
    }

    /// All vertex handles in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = EntityHandle> + '_ {
        // ids 1..=len always fit, `add_vertex` already validated them
        (1..=self.coords.len() as u64)
            .filter_map(|id| EntityHandle::new(EntityType::Vertex, id).ok())
    }

    /// Handles of every entity of `entity_type`, in insertion order.
    pub fn entities_by_type(&self, entity_type: EntityType) -> Vec<EntityHandle> {
        if entity_type == EntityType::Vertex {
            return self.vertices().collect();
        }
        self.elements
            .get(&entity_type)
            .map(|elems| elems.iter().map(|e| e.handle).collect())
            .unwrap_or_default()
    }

    /// Handles of every entity with topological dimension `dim`.
    ///
    /// Types are visited in tag order (triangles, then quads, then general
    /// polygons for `dim == 2`), each in insertion order.
    pub fn entities_by_dimension(&self, dim: u8) -> Vec<EntityHandle> {
        if dim == 0 {
            return self.vertices().collect();
        }
        self.elements
            .iter()
            .filter(|(ty, _)| ty.dimension() == dim)
            .flat_map(|(_, elems)| elems.iter().map(|e| e.handle))
            .collect()
    }

    /// Coordinates of the given vertices, flattened as `x0 y0 z0 x1 y1 z1 ...`.
    pub fn get_coords(&self, vertices: &[EntityHandle]) -> Result<Vec<f64>, MeshUgridError> {
        let mut out = Vec::with_capacity(vertices.len() * 3);
        for &vertex in vertices {
            out.extend_from_slice(&self.coords[self.vertex_index(vertex)?]);
        }
        Ok(out)
    }

    /// Ordered vertex handles of a single element.
    pub fn connectivity(&self, element: EntityHandle) -> Result<&[EntityHandle], MeshUgridError> {
        let invalid = || MeshUgridError::InvalidHandle(element.get());
        let idx = usize::try_from(element.id() - 1).map_err(|_| invalid())?;
        self.elements
            .get(&element.entity_type())
            .and_then(|elems| elems.get(idx))
            .map(|e| e.connectivity.as_slice())
            .ok_or_else(invalid)
    }

    fn vertex_index(&self, vertex: EntityHandle) -> Result<usize, MeshUgridError> {
        if vertex.entity_type() != EntityType::Vertex {
            return Err(MeshUgridError::InvalidHandle(vertex.get()));
        }
        let idx = (vertex.id() - 1) as usize;
        if idx >= self.coords.len() {
            return Err(MeshUgridError::InvalidHandle(vertex.get()));
        }
        Ok(idx)
    }
}
