//! Entity type metadata for mesh entities.

/// Entity types known to the mesh engine.
///
/// The discriminant is stored in the top byte of every
/// [`EntityHandle`](crate::topology::handle::EntityHandle).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum EntityType {
    /// 0D vertex.
    #[default]
    Vertex = 0,
    /// 1D segment/edge.
    Edge = 1,
    /// 2D simplex (triangle).
    Triangle = 2,
    /// 2D tensor-product cell (quad).
    Quadrilateral = 3,
    /// 2D polygon with an arbitrary number of vertices.
    Polygon = 4,
    /// 3D simplex (tet).
    Tetrahedron = 5,
    /// 3D pyramid.
    Pyramid = 6,
    /// 3D wedge/prism.
    Prism = 7,
    /// 3D tensor-product cell (hex).
    Hexahedron = 8,
    /// Generic polyhedron.
    Polyhedron = 9,
}

impl EntityType {
    /// All entity types, in handle-tag order.
    pub const ALL: [EntityType; 10] = [
        EntityType::Vertex,
        EntityType::Edge,
        EntityType::Triangle,
        EntityType::Quadrilateral,
        EntityType::Polygon,
        EntityType::Tetrahedron,
        EntityType::Pyramid,
        EntityType::Prism,
        EntityType::Hexahedron,
        EntityType::Polyhedron,
    ];

    /// Returns the topological dimension of the entity.
    pub fn dimension(self) -> u8 {
        match self {
            EntityType::Vertex => 0,
            EntityType::Edge => 1,
            EntityType::Triangle | EntityType::Quadrilateral | EntityType::Polygon => 2,
            EntityType::Tetrahedron
            | EntityType::Pyramid
            | EntityType::Prism
            | EntityType::Hexahedron
            | EntityType::Polyhedron => 3,
        }
    }

    /// Fixed vertex count, or `None` for variable-size entities.
    pub fn vertex_count(self) -> Option<usize> {
        match self {
            EntityType::Vertex => Some(1),
            EntityType::Edge => Some(2),
            EntityType::Triangle => Some(3),
            EntityType::Quadrilateral | EntityType::Tetrahedron => Some(4),
            EntityType::Pyramid => Some(5),
            EntityType::Prism => Some(6),
            EntityType::Hexahedron => Some(8),
            EntityType::Polygon | EntityType::Polyhedron => None,
        }
    }

    /// Picks the most specific 2D type for a face with `n` vertices.
    pub fn for_face(n: usize) -> Self {
        match n {
            3 => EntityType::Triangle,
            4 => EntityType::Quadrilateral,
            _ => EntityType::Polygon,
        }
    }

    /// Tag stored in the top byte of a handle.
    #[inline]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Inverse of [`EntityType::tag`].
    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.get(usize::from(tag)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for ty in EntityType::ALL {
            assert_eq!(EntityType::from_tag(ty.tag()), Some(ty));
        }
        assert_eq!(EntityType::from_tag(42), None);
    }

    #[test]
    fn face_types_are_two_dimensional() {
        for n in [0, 1, 3, 4, 5, 12] {
            assert_eq!(EntityType::for_face(n).dimension(), 2);
        }
        assert_eq!(EntityType::for_face(3), EntityType::Triangle);
        assert_eq!(EntityType::for_face(4), EntityType::Quadrilateral);
        assert_eq!(EntityType::for_face(6), EntityType::Polygon);
    }
}
