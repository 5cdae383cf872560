//! # Update-Suppression Cache
//!
//! Per-session memory of which entities the client has already been told
//! about, keyed by (region, entity key) with the tick of the last
//! announcement. Lifecycle operations consult it to avoid re-announcing
//! unchanged state and clear it when entities die or leave visibility.
//!
//! Multiple simulation threads announce different entities to the same
//! session concurrently, so operations are atomic per key with no cross-key
//! ordering. The sharded map keeps per-key synchronization fine-grained
//! instead of serializing the whole session behind one lock.

use dashmap::DashMap;

use duskhold_world::{HouseId, ObjectId, RegionId};

/// Identifies a cached entity within a region.
///
/// Houses carry lot numbers from their own id space, so a house and a world
/// object with the same numeric id are distinct cache entries.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum EntityKey {
    /// World object, NPC or player.
    Object(ObjectId),
    /// House lot.
    House(HouseId),
}

impl From<ObjectId> for EntityKey {
    fn from(id: ObjectId) -> Self {
        Self::Object(id)
    }
}

impl From<HouseId> for EntityKey {
    fn from(id: HouseId) -> Self {
        Self::House(id)
    }
}

/// Per-session (region, entity) -> last-announced-tick map.
#[derive(Debug, Default)]
pub struct UpdateCache {
    entries: DashMap<(RegionId, EntityKey), u64>,
}

impl UpdateCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that the entity was announced at `tick`.
    pub fn mark_sent(&self, region: RegionId, id: impl Into<EntityKey>, tick: u64) {
        self.entries.insert((region, id.into()), tick);
    }

    /// Claims the first announcement of an entity, recording `tick`.
    ///
    /// Returns false when the session already knows the entity. Racing
    /// announcers get exactly one `true` between them.
    pub fn try_announce(&self, region: RegionId, id: impl Into<EntityKey>, tick: u64) -> bool {
        match self.entries.entry((region, id.into())) {
            dashmap::mapref::entry::Entry::Occupied(_) => false,
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                entry.insert(tick);
                true
            }
        }
    }

    /// Tick of the last announcement, if the session knows the entity.
    #[must_use]
    pub fn last_sent(&self, region: RegionId, id: impl Into<EntityKey>) -> Option<u64> {
        self.entries.get(&(region, id.into())).map(|entry| *entry)
    }

    /// Forgets one entity (destroyed or left visibility).
    pub fn forget(&self, region: RegionId, id: impl Into<EntityKey>) {
        self.entries.remove(&(region, id.into()));
    }

    /// Forgets every entity of a region (zone transition teardown).
    pub fn clear_region(&self, region: RegionId) {
        self.entries.retain(|(r, _), _| *r != region);
    }

    /// Number of entities the session currently knows about.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been announced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
