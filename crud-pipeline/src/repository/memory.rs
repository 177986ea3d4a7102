//! In-memory repository backed by a concurrent map

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use dashmap::DashMap;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::error::{RepositoryError, RepositoryOperation};
use super::specification::Specification;
use super::traits::{Repository, RepositoryResult};
use crate::entity::Entity;

/// Identity types the in-memory repository can generate
pub trait SequentialId: Sized {
    /// Produce an identity from a monotonically increasing sequence number
    ///
    /// Returns `None` once the sequence no longer fits the identity type.
    fn from_sequence(sequence: u64) -> Option<Self>;
}

impl SequentialId for u64 {
    fn from_sequence(sequence: u64) -> Option<Self> {
        Some(sequence)
    }
}

impl SequentialId for i64 {
    fn from_sequence(sequence: u64) -> Option<Self> {
        i64::try_from(sequence).ok()
    }
}

impl SequentialId for Uuid {
    fn from_sequence(_sequence: u64) -> Option<Self> {
        Some(Uuid::now_v7())
    }
}

/// Repository keeping entities in a [`DashMap`]
///
/// Identities start at 1. The repository counts successful writes so tests
/// can assert that a rejected request never reached storage.
#[derive(Debug)]
pub struct InMemoryRepository<E: Entity> {
    entities: DashMap<E::Id, E>,
    sequence: AtomicU64,
    writes: AtomicUsize,
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self {
            entities: DashMap::new(),
            sequence: AtomicU64::new(0),
            writes: AtomicUsize::new(0),
        }
    }
}

impl<E: Entity> InMemoryRepository<E> {
    /// Create an empty repository
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the repository is empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of successful add, update and remove operations
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    #[cfg(test)]
    fn starting_after(sequence: u64) -> Self {
        Self {
            sequence: AtomicU64::new(sequence),
            ..Self::default()
        }
    }

    fn ensure_active(cancel: &CancellationToken, operation: RepositoryOperation) -> RepositoryResult<()> {
        if cancel.is_cancelled() {
            return Err(RepositoryError::cancelled(operation));
        }
        Ok(())
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

impl<E> Repository<E> for InMemoryRepository<E>
where
    E: Entity,
    E::Id: SequentialId,
{
    async fn get_by_id(&self, id: &E::Id, cancel: &CancellationToken) -> RepositoryResult<Option<E>> {
        Self::ensure_active(cancel, RepositoryOperation::GetById)?;
        Ok(self.entities.get(id).map(|entry| entry.value().clone()))
    }

    async fn add(&self, mut entity: E, cancel: &CancellationToken) -> RepositoryResult<E> {
        Self::ensure_active(cancel, RepositoryOperation::Add)?;
        if let Some(id) = entity.id() {
            return Err(RepositoryError::constraint_violation(
                RepositoryOperation::Add,
                "Entity already has an identity",
            )
            .with_entity(E::TYPE_NAME, id.to_string()));
        }

        let id = self
            .sequence
            .fetch_add(1, Ordering::SeqCst)
            .checked_add(1)
            .and_then(E::Id::from_sequence)
            .ok_or_else(|| {
                RepositoryError::constraint_violation(
                    RepositoryOperation::Add,
                    "Identity sequence exhausted",
                )
            })?;
        tracing::debug!(entity = E::TYPE_NAME, id = %id, "Entity added");
        entity.meta_mut().assign_id(id.clone());
        self.entities.insert(id, entity.clone());
        self.record_write();
        Ok(entity)
    }

    async fn update(&self, entity: E, cancel: &CancellationToken) -> RepositoryResult<E> {
        Self::ensure_active(cancel, RepositoryOperation::Update)?;
        let Some(id) = entity.id().cloned() else {
            return Err(RepositoryError::not_found(E::TYPE_NAME, "<unassigned>")
                .with_operation(RepositoryOperation::Update));
        };

        match self.entities.get_mut(&id) {
            Some(mut slot) => {
                *slot = entity.clone();
            }
            None => {
                return Err(RepositoryError::not_found(E::TYPE_NAME, id.to_string())
                    .with_operation(RepositoryOperation::Update));
            }
        }
        self.record_write();
        tracing::debug!(entity = E::TYPE_NAME, id = %id, "Entity updated");
        Ok(entity)
    }

    async fn query(
        &self,
        specification: &dyn Specification<E>,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<E>> {
        Self::ensure_active(cancel, RepositoryOperation::Query)?;
        let matches: Vec<E> = self
            .entities
            .iter()
            .filter(|entry| specification.is_satisfied_by(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        tracing::trace!(
            entity = E::TYPE_NAME,
            specification = specification.describe(),
            matches = matches.len(),
            "Query evaluated"
        );
        Ok(matches)
    }

    async fn remove(&self, id: &E::Id, cancel: &CancellationToken) -> RepositoryResult<bool> {
        Self::ensure_active(cancel, RepositoryOperation::Remove)?;
        let removed = self.entities.remove(id).is_some();
        if removed {
            self.record_write();
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::testing::Widget;
    use crate::entity::Entity;
    use crate::repository::{QuerySpecification, RepositoryErrorKind};

    #[tokio::test]
    async fn test_add_assigns_identity() {
        let repo = InMemoryRepository::<Widget>::new();
        let cancel = CancellationToken::new();

        let first = repo.add(Widget::new("a"), &cancel).await.unwrap();
        let second = repo.add(Widget::new("b"), &cancel).await.unwrap();

        assert_eq!(first.id(), Some(&1));
        assert_eq!(second.id(), Some(&2));
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.write_count(), 2);
    }

    #[tokio::test]
    async fn test_add_rejects_entity_with_identity() {
        let repo = InMemoryRepository::<Widget>::new();
        let cancel = CancellationToken::new();
        let mut widget = Widget::new("a");
        widget.meta.assign_id(10);

        let err = repo.add(widget, &cancel).await.unwrap_err();
        assert_eq!(err.kind, RepositoryErrorKind::ConstraintViolation);
        assert_eq!(repo.write_count(), 0);
    }

    #[tokio::test]
    async fn test_get_by_id_round_trip() {
        let repo = InMemoryRepository::<Widget>::new();
        let cancel = CancellationToken::new();
        let added = repo.add(Widget::new("a"), &cancel).await.unwrap();

        let loaded = repo.get_by_id(&1, &cancel).await.unwrap();
        assert_eq!(loaded, Some(added));
        assert_eq!(repo.get_by_id(&2, &cancel).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_unknown_is_not_found() {
        let repo = InMemoryRepository::<Widget>::new();
        let cancel = CancellationToken::new();
        let mut widget = Widget::new("a");
        widget.meta.assign_id(5);

        let err = repo.update(widget, &cancel).await.unwrap_err();
        assert_eq!(err.kind, RepositoryErrorKind::NotFound);
        assert_eq!(err.operation, RepositoryOperation::Update);
    }

    #[tokio::test]
    async fn test_update_replaces_entity() {
        let repo = InMemoryRepository::<Widget>::new();
        let cancel = CancellationToken::new();
        let mut widget = repo.add(Widget::new("a"), &cancel).await.unwrap();
        widget.label = "b".into();

        repo.update(widget, &cancel).await.unwrap();
        let loaded = repo.get_by_id(&1, &cancel).await.unwrap().unwrap();
        assert_eq!(loaded.label, "b");
        assert_eq!(repo.write_count(), 2);
    }

    #[tokio::test]
    async fn test_query_filters() {
        let repo = InMemoryRepository::<Widget>::new();
        let cancel = CancellationToken::new();
        for label in ["gear", "cog", "gasket"] {
            repo.add(Widget::new(label), &cancel).await.unwrap();
        }

        let spec = QuerySpecification::new("starts with g", |w: &Widget| w.label.starts_with('g'));
        let mut found: Vec<String> = repo
            .query(&spec, &cancel)
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.label)
            .collect();
        found.sort();
        assert_eq!(found, vec!["gasket", "gear"]);
    }

    #[tokio::test]
    async fn test_remove() {
        let repo = InMemoryRepository::<Widget>::new();
        let cancel = CancellationToken::new();
        repo.add(Widget::new("a"), &cancel).await.unwrap();

        assert!(repo.remove(&1, &cancel).await.unwrap());
        assert!(!repo.remove(&1, &cancel).await.unwrap());
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_token_blocks_writes() {
        let repo = InMemoryRepository::<Widget>::new();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = repo.add(Widget::new("a"), &cancel).await.unwrap_err();
        assert_eq!(err.kind, RepositoryErrorKind::Cancelled);
        assert!(repo.is_empty());
        assert_eq!(repo.write_count(), 0);
    }

    #[test]
    fn test_sequential_ids() {
        assert_eq!(i64::from_sequence(7), Some(7));
        assert_eq!(u64::from_sequence(7), Some(7));
        assert_eq!(i64::from_sequence(i64::MAX as u64 + 1), None);
        assert_ne!(Uuid::from_sequence(1), Uuid::from_sequence(1));
    }

    #[tokio::test]
    async fn test_exhausted_sequence_fails_without_overwriting() {
        let repo = InMemoryRepository::<Widget>::starting_after(i64::MAX as u64 - 1);
        let cancel = CancellationToken::new();

        let last = repo.add(Widget::new("last"), &cancel).await.unwrap();
        assert_eq!(last.id(), Some(&i64::MAX));

        let err = repo.add(Widget::new("next"), &cancel).await.unwrap_err();
        assert_eq!(err.kind, RepositoryErrorKind::ConstraintViolation);
        assert_eq!(err.operation, RepositoryOperation::Add);

        let stored = repo.get_by_id(&i64::MAX, &cancel).await.unwrap().unwrap();
        assert_eq!(stored.label, "last");
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.write_count(), 1);
    }
}
