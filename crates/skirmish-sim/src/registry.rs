//! Entity registry: stable identities, labels and activation status.
//!
//! Identifiers start at 1, increase monotonically and are never reused,
//! even after the entity is despawned.

use std::collections::BTreeMap;

use hecs::Entity;

use skirmish_core::error::{SimError, SimResult};
use skirmish_core::types::EntityId;

#[derive(Debug, Clone)]
struct Entry {
    handle: Entity,
    label: String,
    active: bool,
}

#[derive(Debug)]
pub struct EntityRegistry {
    next_id: u32,
    entries: BTreeMap<EntityId, Entry>,
    player: Option<EntityId>,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            entries: BTreeMap::new(),
            player: None,
        }
    }

    /// Reserve the next identifier. Bind it with [`Self::bind`] once the
    /// ECS entity exists.
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Attach an allocated identifier to its ECS entity. New entities start
    /// active.
    pub fn bind(&mut self, id: EntityId, handle: Entity, label: impl Into<String>) {
        self.entries.insert(
            id,
            Entry {
                handle,
                label: label.into(),
                active: true,
            },
        );
    }

    /// Look up the ECS handle, failing for unknown or despawned ids.
    pub fn resolve(&self, id: EntityId) -> SimResult<Entity> {
        self.entries
            .get(&id)
            .map(|entry| entry.handle)
            .ok_or(SimError::EntityNotFound(id))
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn label(&self, id: EntityId) -> SimResult<&str> {
        self.entries
            .get(&id)
            .map(|entry| entry.label.as_str())
            .ok_or(SimError::EntityNotFound(id))
    }

    /// Unknown ids read as inactive.
    pub fn is_active(&self, id: EntityId) -> bool {
        self.entries.get(&id).is_some_and(|entry| entry.active)
    }

    /// Returns the previous flag.
    pub fn set_active(&mut self, id: EntityId, active: bool) -> SimResult<bool> {
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(SimError::EntityNotFound(id))?;
        Ok(std::mem::replace(&mut entry.active, active))
    }

    /// Forget an entity. Its id is retired, not recycled.
    pub fn release(&mut self, id: EntityId) -> SimResult<Entity> {
        let entry = self
            .entries
            .remove(&id)
            .ok_or(SimError::EntityNotFound(id))?;
        if self.player == Some(id) {
            self.player = None;
        }
        Ok(entry.handle)
    }

    /// Make `id` the controlled agent that chasers pursue by default.
    pub fn set_player(&mut self, id: EntityId) -> SimResult<()> {
        if !self.contains(id) {
            return Err(SimError::EntityNotFound(id));
        }
        self.player = Some(id);
        Ok(())
    }

    pub fn player(&self) -> Option<EntityId> {
        self.player
    }

    /// Registered ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The id the next allocation will return.
    pub fn next_id(&self) -> EntityId {
        EntityId(self.next_id)
    }

    /// Number of ids ever issued.
    pub fn total_created(&self) -> u32 {
        self.next_id - 1
    }
}
