//! Repository trait definitions
//!
//! The repository trait uses RPITIT (Return Position Impl Trait In Traits)
//! so implementations can be written with plain `async fn`. Every operation
//! receives the caller's [`CancellationToken`]; an implementation must not
//! apply a write once the token has fired.
//!
//! # Example
//!
//! ```rust,ignore
//! use crud_pipeline::repository::{Repository, RepositoryResult, Specification};
//!
//! struct TeamStore { pool: PgPool }
//!
//! impl Repository<Team> for TeamStore {
//!     async fn get_by_id(&self, id: &i64, cancel: &CancellationToken) -> RepositoryResult<Option<Team>> {
//!         tokio::select! {
//!             _ = cancel.cancelled() => Err(RepositoryError::cancelled(RepositoryOperation::GetById)),
//!             row = fetch_team(&self.pool, *id) => row,
//!         }
//!     }
//!     // ... other methods
//! }
//! ```

use std::future::Future;

use tokio_util::sync::CancellationToken;

use super::error::RepositoryError;
use super::specification::Specification;
use crate::entity::Entity;

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Persistence for one entity type
pub trait Repository<E: Entity>: Send + Sync {
    /// Load one entity by identity
    ///
    /// Returns `Ok(None)` when no entity has that identity.
    fn get_by_id(
        &self,
        id: &E::Id,
        cancel: &CancellationToken,
    ) -> impl Future<Output = RepositoryResult<Option<E>>> + Send;

    /// Persist a new entity and return it with its identity assigned
    fn add(
        &self,
        entity: E,
        cancel: &CancellationToken,
    ) -> impl Future<Output = RepositoryResult<E>> + Send;

    /// Persist changes to an existing entity
    fn update(
        &self,
        entity: E,
        cancel: &CancellationToken,
    ) -> impl Future<Output = RepositoryResult<E>> + Send;

    /// Return every entity satisfying `specification`
    fn query(
        &self,
        specification: &dyn Specification<E>,
        cancel: &CancellationToken,
    ) -> impl Future<Output = RepositoryResult<Vec<E>>> + Send;

    /// Remove an entity, returning whether it existed
    fn remove(
        &self,
        id: &E::Id,
        cancel: &CancellationToken,
    ) -> impl Future<Output = RepositoryResult<bool>> + Send;
}
