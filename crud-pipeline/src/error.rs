//! Error taxonomy for the request pipeline
//!
//! Two failures are expected outcomes that a caller can fix and resubmit:
//! [`Error::Validation`] and [`Error::NotFound`]. [`Error::NotConfigured`]
//! is a wiring defect in the application. Everything else is a fault that
//! the surrounding transport renders as a generic failure.

use std::fmt;

use thiserror::Error;

use crate::repository::{RepositoryError, RepositoryErrorKind};
use crate::validation::ValidationFailure;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline error
#[derive(Debug, Error)]
pub enum Error {
    /// One or more rules rejected the command or entity
    #[error("{0}")]
    Validation(#[from] ValidationFailure),

    /// No entity exists for the requested identity
    #[error("{entity_type} '{id}' was not found")]
    NotFound {
        /// Entity type name (e.g. "Team")
        entity_type: &'static str,
        /// Requested identity, rendered
        id: String,
    },

    /// A handler or one of its required steps was never supplied
    #[error("Not configured: {0}")]
    NotConfigured(String),

    /// Repository fault
    #[error("{0}")]
    Repository(RepositoryError),

    /// The injected mapping capability failed
    #[error("Mapping error: {0}")]
    Mapping(String),

    /// The caller cancelled the request before it completed
    #[error("Request cancelled")]
    Cancelled,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),
}

impl Error {
    /// Create a not-found error for an entity type and identity
    pub fn not_found(entity_type: &'static str, id: impl fmt::Display) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create a configuration-defect error
    pub fn not_configured(message: impl Into<String>) -> Self {
        Self::NotConfigured(message.into())
    }

    /// True for outcomes the caller can correct (validation, not found)
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound { .. })
    }

    /// The validation failure, if this is one
    #[must_use]
    pub fn as_validation(&self) -> Option<&ValidationFailure> {
        match self {
            Self::Validation(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        match err.kind {
            RepositoryErrorKind::Cancelled => Self::Cancelled,
            _ => Self::Repository(err),
        }
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}
