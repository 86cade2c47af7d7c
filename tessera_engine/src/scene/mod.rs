//! Scene module
//!
//! Entities drawn through instanced meshes, the snapshot-consistent registry
//! that stores them, and the model-matrix utility.

mod entity;
mod registry;
pub mod transformation;

pub use entity::{Entity, EntityKey};
pub use registry::{EntityRegistry, EntitySnapshot};
pub use transformation::Transformation;
