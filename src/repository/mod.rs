//! Data access seam between the controller and whatever stores the entities.

use crate::entity::Entity;
use async_trait::async_trait;
use thiserror::Error;

mod memory;

pub use memory::MemoryRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{entity} with key {key} already exists")]
    Conflict { entity: &'static str, key: String },

    #[error("{entity} with key {key} does not exist")]
    Missing { entity: &'static str, key: String },

    #[error("No keys left to assign to new {entity} rows")]
    KeysExhausted { entity: &'static str },

    #[error("Repository backend failure: {0}")]
    Backend(#[from] anyhow::Error),
}

impl RepositoryError {
    pub fn conflict<E: Entity>(key: E::Key) -> Self {
        Self::Conflict {
            entity: E::NAME,
            key: key.to_string(),
        }
    }

    pub fn missing<E: Entity>(key: E::Key) -> Self {
        Self::Missing {
            entity: E::NAME,
            key: key.to_string(),
        }
    }
}

/// Asynchronous keyed store for one entity type
///
/// Misses are reported as `Ok(None)`; `Err` is reserved for failures of the
/// store itself.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    async fn find(&self, key: E::Key) -> Result<Option<E>, RepositoryError>;

    /// Persist a new entity. An entity with the default key is assigned a fresh one.
    async fn add(&self, entity: E) -> Result<E, RepositoryError>;

    /// Overwrite the stored entity that has the same key.
    async fn update(&self, entity: E) -> Result<E, RepositoryError>;

    async fn remove(&self, key: E::Key) -> Result<Option<E>, RepositoryError>;
}
