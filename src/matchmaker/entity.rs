//! Tracked participants and the population registry.

use super::search::SearchHandle;
use dashmap::DashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use tracing::trace;

/// Unique identity of an entity, assigned in creation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A participant with a rating and at most one running search.
#[derive(Debug)]
pub struct Entity {
    id: EntityId,
    rating: AtomicU32,
    pairings: AtomicU64,
    searching: AtomicBool,
    search: Mutex<Option<SearchHandle>>,
}

impl Entity {
    fn new(id: EntityId, rating: u32) -> Self {
        Self {
            id,
            rating: AtomicU32::new(rating),
            pairings: AtomicU64::new(0),
            searching: AtomicBool::new(false),
            search: Mutex::new(None),
        }
    }

    /// Identity of this entity
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Current rating
    pub fn rating(&self) -> u32 {
        self.rating.load(Ordering::Acquire)
    }

    /// Number of pairings this entity completed
    pub fn pairings(&self) -> u64 {
        self.pairings.load(Ordering::Acquire)
    }

    /// Whether a search process is running for this entity
    pub fn is_searching(&self) -> bool {
        self.searching.load(Ordering::Acquire)
    }

    /// Store the rating produced by a completed pairing
    pub(crate) fn record_pairing(&self, rating: u32) {
        self.rating.store(rating, Ordering::Release);
        self.pairings.fetch_add(1, Ordering::AcqRel);
        trace!("Entity {} now rated {}", self.id, rating);
    }

    pub(crate) fn mark_searching(&self) {
        self.searching.store(true, Ordering::Release);
    }

    pub(crate) fn finish_search(&self) {
        self.searching.store(false, Ordering::Release);
    }

    pub(crate) fn store_search(&self, handle: SearchHandle) {
        *self.search.lock() = Some(handle);
    }

    pub(crate) fn take_search(&self) -> Option<SearchHandle> {
        self.search.lock().take()
    }

    /// Whether the thread of the last search has exited
    pub(crate) fn search_finished(&self) -> bool {
        self.search
            .lock()
            .as_ref()
            .is_none_or(|handle| handle.is_finished())
    }

    /// Ask the running search, if any, to stop
    pub(crate) fn cancel_search(&self) {
        if let Some(handle) = self.search.lock().as_ref() {
            handle.cancel();
        }
    }
}

/// Registry owning every entity of a run, with its identity allocator.
///
/// Entities are only created with the run, so callers cannot add one that the
/// coordinator never queues:
///
/// ```compile_fail
/// let population = matchmaker_rs::Population::new();
/// population.create(1900);
/// ```
#[derive(Debug, Default)]
pub struct Population {
    entities: DashMap<EntityId, Arc<Entity>>,
    next_id: AtomicU64,
}

impl Population {
    /// Create an empty population
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a population of `count` entities rated `rating`
    pub fn with_entities(count: usize, rating: u32) -> Self {
        let population = Self::new();
        for _ in 0..count {
            population.create(rating);
        }
        population
    }

    /// Create a new entity with the next free identity
    pub(crate) fn create(&self, rating: u32) -> Arc<Entity> {
        let id = EntityId(self.next_id.fetch_add(1, Ordering::AcqRel));
        let entity = Arc::new(Entity::new(id, rating));
        self.entities.insert(id, Arc::clone(&entity));
        entity
    }

    /// Look up an entity
    pub fn get(&self, id: EntityId) -> Option<Arc<Entity>> {
        self.entities.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    /// Number of entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the population is empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// All identities in creation order
    pub fn ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.entities.iter().map(|entry| *entry.key()).collect();
        ids.sort_unstable();
        ids
    }

    /// All entities in creation order
    pub fn entities(&self) -> Vec<Arc<Entity>> {
        let mut entities: Vec<Arc<Entity>> = self
            .entities
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        entities.sort_unstable_by_key(|entity| entity.id());
        entities
    }

    /// Entities with a running search
    pub fn searching(&self) -> usize {
        self.entities
            .iter()
            .filter(|entry| entry.value().is_searching())
            .count()
    }
}
