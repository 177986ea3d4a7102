//! Repository error types
//!
//! # Example
//!
//! ```rust
//! use crud_pipeline::repository::{RepositoryError, RepositoryErrorKind};
//!
//! let error = RepositoryError::not_found("Team", "42");
//! assert!(matches!(error.kind, RepositoryErrorKind::NotFound));
//! assert!(!error.is_retriable());
//! ```

use std::fmt;

/// Repository operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryOperation {
    /// Reading one entity by identity
    GetById,
    /// Persisting a new entity
    Add,
    /// Persisting changes to an existing entity
    Update,
    /// Evaluating a specification
    Query,
    /// Deleting an entity
    Remove,
}

impl fmt::Display for RepositoryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GetById => write!(f, "get_by_id"),
            Self::Add => write!(f, "add"),
            Self::Update => write!(f, "update"),
            Self::Query => write!(f, "query"),
            Self::Remove => write!(f, "remove"),
        }
    }
}

/// Category of repository error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryErrorKind {
    /// Entity was not found
    NotFound,
    /// Entity already exists (duplicate key)
    AlreadyExists,
    /// Storage constraint violation
    ConstraintViolation,
    /// The operation was abandoned because the caller cancelled
    Cancelled,
    /// Could not reach the backing store
    ConnectionFailed,
    /// Operation timed out
    Timeout,
    /// Backing store reported a failure
    StorageError,
    /// Other unclassified error
    Other,
}

impl fmt::Display for RepositoryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::AlreadyExists => write!(f, "already_exists"),
            Self::ConstraintViolation => write!(f, "constraint_violation"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::ConnectionFailed => write!(f, "connection_failed"),
            Self::Timeout => write!(f, "timeout"),
            Self::StorageError => write!(f, "storage_error"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Structured repository error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryError {
    /// The operation being performed when the error occurred
    pub operation: RepositoryOperation,
    /// The category of error
    pub kind: RepositoryErrorKind,
    /// Human-readable error message
    pub message: String,
    /// The type of entity involved (e.g., "Team")
    pub entity_type: Option<String>,
    /// The identity of the entity involved
    pub entity_id: Option<String>,
}

impl RepositoryError {
    /// Create a new repository error
    pub fn new(
        operation: RepositoryOperation,
        kind: RepositoryErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_type: None,
            entity_id: None,
        }
    }

    /// Entity with the given identity does not exist
    pub fn not_found(entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self::new(
            RepositoryOperation::GetById,
            RepositoryErrorKind::NotFound,
            "Entity not found",
        )
        .with_entity(entity_type, entity_id)
    }

    /// Entity with the given identity already exists
    pub fn already_exists(entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self::new(
            RepositoryOperation::Add,
            RepositoryErrorKind::AlreadyExists,
            "Entity already exists",
        )
        .with_entity(entity_type, entity_id)
    }

    /// Storage constraint violated
    pub fn constraint_violation(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::ConstraintViolation, message)
    }

    /// Operation abandoned on cancellation; nothing was applied
    pub fn cancelled(operation: RepositoryOperation) -> Self {
        Self::new(
            operation,
            RepositoryErrorKind::Cancelled,
            "Operation cancelled before it was applied",
        )
    }

    /// Backing store unreachable
    pub fn connection_failed(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::ConnectionFailed, message)
    }

    /// Operation timed out
    pub fn timeout(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::Timeout, message)
    }

    /// Backing store failure
    pub fn storage_error(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::StorageError, message)
    }

    /// Attach entity context
    #[must_use]
    pub fn with_entity(
        mut self,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id.into());
        self
    }

    /// Override the operation
    #[must_use]
    pub fn with_operation(mut self, operation: RepositoryOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Transient failures that may succeed on retry
    pub fn is_retriable(&self) -> bool {
        matches!(
            self.kind,
            RepositoryErrorKind::ConnectionFailed | RepositoryErrorKind::Timeout
        )
    }
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Repository {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let (Some(entity_type), Some(entity_id)) = (&self.entity_type, &self.entity_id) {
            write!(f, " [{}: {}]", entity_type, entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for RepositoryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_carries_entity() {
        let error = RepositoryError::not_found("Team", "42");
        assert_eq!(error.operation, RepositoryOperation::GetById);
        assert_eq!(error.entity_type.as_deref(), Some("Team"));
        assert_eq!(error.entity_id.as_deref(), Some("42"));
    }

    #[test]
    fn test_with_operation() {
        let error = RepositoryError::not_found("Team", "42").with_operation(RepositoryOperation::Update);
        assert_eq!(error.operation, RepositoryOperation::Update);
        assert_eq!(error.kind, RepositoryErrorKind::NotFound);
    }

    #[test]
    fn test_retriable() {
        assert!(RepositoryError::timeout(RepositoryOperation::Query, "slow").is_retriable());
        assert!(RepositoryError::connection_failed(RepositoryOperation::Add, "refused").is_retriable());
        assert!(!RepositoryError::cancelled(RepositoryOperation::Add).is_retriable());
        assert!(!RepositoryError::already_exists("Team", "1").is_retriable());
        assert!(!RepositoryError::storage_error(RepositoryOperation::Remove, "io").is_retriable());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            RepositoryError::not_found("Team", "42").to_string(),
            "Repository not_found error during get_by_id: Entity not found [Team: 42]"
        );
        assert_eq!(
            RepositoryError::constraint_violation(RepositoryOperation::Add, "id already assigned")
                .to_string(),
            "Repository constraint_violation error during add: id already assigned"
        );
    }
}
