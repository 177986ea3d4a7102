//! Entities: identity, tracking metadata and self-validation
//!
//! An entity owns an [`EntityMeta`] holding its identity and timestamps.
//! Identity is absent until a repository persists the entity for the first
//! time. Factories and mutators go through [`create`] and [`mutate`] so the
//! tracking data is stamped before the entity validates itself.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{ValidationFailure, Violation};

/// Identity type of an entity
pub type IdOf<E> = <E as Entity>::Id;

/// A domain object with an identity and its own invariants
pub trait Entity: Clone + Send + Sync + 'static {
    /// Identity type (integer, UUID, ...)
    type Id: Clone + Eq + Hash + Debug + Display + Send + Sync + 'static;

    /// Name used in logs and not-found messages
    const TYPE_NAME: &'static str;

    /// Tracking metadata
    fn meta(&self) -> &EntityMeta<Self::Id>;

    /// Mutable tracking metadata
    fn meta_mut(&mut self) -> &mut EntityMeta<Self::Id>;

    /// Check the entity's invariants, reporting every violation
    fn validate(&self) -> Vec<Violation>;

    /// Identity, if the entity has been persisted
    fn id(&self) -> Option<&Self::Id> {
        self.meta().id()
    }
}

/// Identity plus creation and modification timestamps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMeta<K> {
    id: Option<K>,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl<K> Default for EntityMeta<K> {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: None,
            created_at: now,
            modified_at: now,
        }
    }
}

impl<K> EntityMeta<K> {
    /// Metadata for an entity that has not been persisted yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity, if assigned
    pub fn id(&self) -> Option<&K> {
        self.id.as_ref()
    }

    /// When the entity was created
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the entity was last modified
    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }

    /// Assign the identity. Called by repositories on first persistence.
    pub fn assign_id(&mut self, id: K) {
        self.id = Some(id);
    }

    /// Stamp creation and modification time
    pub fn stamp_created(&mut self) {
        let now = Utc::now();
        self.created_at = now;
        self.modified_at = now;
    }

    /// Stamp modification time
    pub fn touch(&mut self) {
        self.modified_at = Utc::now();
    }
}

/// Stamp creation data on a freshly built entity and validate it
///
/// ```rust,ignore
/// pub fn create(name: impl Into<String>) -> Result<Team, ValidationFailure> {
///     entity::create(Team { meta: EntityMeta::new(), name: name.into() })
/// }
/// ```
pub fn create<E: Entity>(mut entity: E) -> Result<E, ValidationFailure> {
    entity.meta_mut().stamp_created();
    ValidationFailure::check(entity.validate())?;
    Ok(entity)
}

/// Apply a mutation, stamp modification time and re-validate
///
/// On failure the entity keeps the mutated state; callers discard it
/// instead of persisting it.
pub fn mutate<E: Entity>(entity: &mut E, change: impl FnOnce(&mut E)) -> Result<(), ValidationFailure> {
    change(entity);
    entity.meta_mut().touch();
    ValidationFailure::check(entity.validate())
}

#[cfg(test)]
pub(crate) mod testing {
    //! A small entity shared by the crate's tests

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub struct Widget {
        pub meta: EntityMeta<i64>,
        pub label: String,
    }

    impl Widget {
        pub fn new(label: &str) -> Self {
            Self {
                meta: EntityMeta::new(),
                label: label.to_string(),
            }
        }
    }

    impl Entity for Widget {
        type Id = i64;
        const TYPE_NAME: &'static str = "Widget";

        fn meta(&self) -> &EntityMeta<i64> {
            &self.meta
        }

        fn meta_mut(&mut self) -> &mut EntityMeta<i64> {
            &mut self.meta
        }

        fn validate(&self) -> Vec<Violation> {
            let mut violations = Vec::new();
            if self.label.trim().is_empty() {
                violations.push(Violation::new("Label", "'Label' must not be empty."));
            }
            if self.label.chars().count() > 10 {
                violations.push(Violation::new("Label", "'Label' is too long."));
            }
            violations
        }
    }
}
