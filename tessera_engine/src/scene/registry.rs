/// Snapshot-consistent entity storage.
///
/// Game logic mutates entities while the render thread iterates them. The
/// registry keeps its SlotMap behind an `Arc`: `snapshot()` clones that Arc
/// under a brief read lock, and writers copy-on-write through
/// `Arc::make_mut` under the write lock. A snapshot never observes a
/// partially applied update and never blocks a writer while it is iterated.

use std::sync::{Arc, PoisonError, RwLock};
use slotmap::SlotMap;
use crate::scene::{Entity, EntityKey};

/// Immutable view of every entity at one point in time
pub type EntitySnapshot = Arc<SlotMap<EntityKey, Entity>>;

#[derive(Debug, Default)]
pub struct EntityRegistry {
    entities: RwLock<EntitySnapshot>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, entity: Entity) -> EntityKey {
        let mut entities = self.entities.write().unwrap_or_else(PoisonError::into_inner);
        Arc::make_mut(&mut *entities).insert(entity)
    }

    pub fn remove(&self, key: EntityKey) -> Option<Entity> {
        let mut entities = self.entities.write().unwrap_or_else(PoisonError::into_inner);
        if !entities.contains_key(key) {
            return None;
        }
        Arc::make_mut(&mut *entities).remove(key)
    }

    /// Apply `f` to one entity. Returns false if the key is stale.
    pub fn update<F: FnOnce(&mut Entity)>(&self, key: EntityKey, f: F) -> bool {
        let mut entities = self.entities.write().unwrap_or_else(PoisonError::into_inner);
        if !entities.contains_key(key) {
            return false;
        }
        match Arc::make_mut(&mut *entities).get_mut(key) {
            Some(entity) => {
                f(entity);
                true
            }
            None => false,
        }
    }

    /// Copy of one entity
    pub fn get(&self, key: EntityKey) -> Option<Entity> {
        self.snapshot().get(key).cloned()
    }

    /// Current contents; later writes are not visible through it
    pub fn snapshot(&self) -> EntitySnapshot {
        let entities = self.entities.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*entities)
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut entities = self.entities.write().unwrap_or_else(PoisonError::into_inner);
        *entities = Arc::new(SlotMap::with_key());
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
