use super::{Repository, RepositoryError};
use crate::di::{Container, Injectable};
use crate::entity::{Entity, EntityKey};
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-local repository backed by a concurrent map
///
/// Keys for new entities come from a monotonically increasing sequence that
/// starts at 1. Keys taken by explicitly keyed inserts are skipped.
pub struct MemoryRepository<E: Entity> {
    rows: DashMap<E::Key, E>,
    sequence: AtomicU64,
}

impl<E: Entity> MemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            rows: DashMap::new(),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn insert_generated(&self, mut entity: E) -> Result<E, RepositoryError> {
        loop {
            let n = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
            let key = E::Key::from_sequence(n)
                .ok_or(RepositoryError::KeysExhausted { entity: E::NAME })?;

            if let Entry::Vacant(slot) = self.rows.entry(key) {
                entity.set_key(key);
                slot.insert(entity.clone());
                return Ok(entity);
            }
        }
    }

    fn insert_keyed(&self, entity: E) -> Result<E, RepositoryError> {
        let key = entity.key();
        match self.rows.entry(key) {
            Entry::Occupied(_) => Err(RepositoryError::conflict::<E>(key)),
            Entry::Vacant(slot) => {
                slot.insert(entity.clone());
                Ok(entity)
            }
        }
    }
}

impl<E: Entity> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Injectable for MemoryRepository<E> {
    fn inject(_container: &Container) -> crate::Result<Self> {
        Ok(Self::new())
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryRepository<E> {
    async fn find(&self, key: E::Key) -> Result<Option<E>, RepositoryError> {
        Ok(self.rows.get(&key).map(|row| row.value().clone()))
    }

    async fn add(&self, entity: E) -> Result<E, RepositoryError> {
        let saved = if entity.is_new() {
            self.insert_generated(entity)?
        } else {
            self.insert_keyed(entity)?
        };
        tracing::debug!(entity = E::NAME, key = %saved.key(), "row added");
        Ok(saved)
    }

    async fn update(&self, entity: E) -> Result<E, RepositoryError> {
        let key = entity.key();
        match self.rows.get_mut(&key) {
            Some(mut row) => {
                *row = entity.clone();
                tracing::debug!(entity = E::NAME, key = %key, "row updated");
                Ok(entity)
            }
            None => Err(RepositoryError::missing::<E>(key)),
        }
    }

    async fn remove(&self, key: E::Key) -> Result<Option<E>, RepositoryError> {
        let removed = self.rows.remove(&key).map(|(_, row)| row);
        if removed.is_some() {
            tracing::debug!(entity = E::NAME, key = %key, "row removed");
        }
        Ok(removed)
    }
}
