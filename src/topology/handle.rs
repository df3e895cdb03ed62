//! `EntityHandle`: a strong, zero-cost handle for mesh entities
//!
//! Every entity stored in a [`MeshCore`](crate::topology::mesh_core::MeshCore)
//! (vertex, polygon, volume cell) is addressed by an opaque handle. The
//! handle wraps a nonzero `u64`: the top byte holds the
//! [`EntityType`] tag and the low 56 bits a 1-based id that counts entities
//! of that type in insertion order.
//!
//! Because [`EntityType::Vertex`] has tag 0, a vertex handle's raw value is
//! exactly its 1-based id. Element connectivity therefore reads as 1-based
//! vertex indices, which is what the UGRID conversion shifts to 0-based.

use crate::mesh_error::MeshUgridError;
use crate::topology::entity_type::EntityType;
use std::{fmt, num::NonZeroU64};

const TYPE_SHIFT: u32 = 56;
const ID_MASK: u64 = (1 << TYPE_SHIFT) - 1;

/// Opaque entity handle.
///
/// # Memory layout
/// This type is `repr(transparent)`, so it has the same ABI and alignment as
/// `u64`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct EntityHandle(NonZeroU64);

impl EntityHandle {
    /// Largest per-type id a handle can encode.
    pub const MAX_ID: u64 = ID_MASK;

    /// Builds a handle from an entity type and a 1-based id.
    ///
    /// # Errors
    /// Returns [`MeshUgridError::InvalidHandle`] if `id` is zero or does not
    /// fit in 56 bits.
    #[inline]
    pub fn new(entity_type: EntityType, id: u64) -> Result<Self, MeshUgridError> {
        if id == 0 || id > ID_MASK {
            return Err(MeshUgridError::InvalidHandle(id));
        }
        let raw = (u64::from(entity_type.tag()) << TYPE_SHIFT) | id;
        NonZeroU64::new(raw)
            .map(EntityHandle)
            .ok_or(MeshUgridError::InvalidHandle(raw))
    }

    /// Reinterprets a raw handle value, validating its type tag.
    pub fn from_raw(raw: u64) -> Result<Self, MeshUgridError> {
        let tag = (raw >> TYPE_SHIFT) as u8;
        let entity_type = EntityType::from_tag(tag).ok_or(MeshUgridError::InvalidHandle(raw))?;
        Self::new(entity_type, raw & ID_MASK)
    }

    /// Returns the raw `u64` value of this handle.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0.get()
    }

    /// Returns the 1-based per-type id.
    #[inline]
    pub const fn id(self) -> u64 {
        self.get() & ID_MASK
    }

    /// Returns the entity type encoded in the handle.
    #[inline]
    pub fn entity_type(self) -> EntityType {
        // Handles are only built through `new`, so the tag is always valid.
        EntityType::from_tag((self.get() >> TYPE_SHIFT) as u8).unwrap_or_default()
    }
}

// -----------------------------------------------------------------------------
// Formatting traits
// -----------------------------------------------------------------------------

impl fmt::Debug for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntityHandle")
            .field(&self.entity_type())
            .field(&self.id())
            .finish()
    }
}

/// Prints only the raw integer.
impl fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

#[cfg(test)]
mod layout_tests {
    use super::*;
    use static_assertions::assert_eq_size;

    assert_eq_size!(EntityHandle, u64);
    assert_eq_size!(Option<EntityHandle>, u64);
}
