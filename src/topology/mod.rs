//! Mesh entity storage: handles, entity types and the [`MeshCore`] engine.

pub mod entity_type;
pub mod handle;
pub mod mesh_core;

pub use entity_type::EntityType;
pub use handle::EntityHandle;
pub use mesh_core::MeshCore;
