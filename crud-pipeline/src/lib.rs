//! A typed request pipeline for CRUD endpoints
//!
//! A request is dispatched to the one handler bound to its type. The handler
//! validates it, loads or builds the entity, mutates and persists it through a
//! [`Repository`](repository::Repository), then maps the result. Failures
//! reach the caller as an [`Error`], which [`translate`](translate::translate)
//! shapes into a boundary payload.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use crud_pipeline::prelude::*;
//!
//! let teams = Arc::new(InMemoryRepository::<Team>::new());
//! let mut registry = HandlerRegistry::new();
//! registry.register::<GetTeamRequest>(GetOneHandler::new(teams.clone(), TeamResponse::from_team))?;
//!
//! match registry.dispatch(GetTeamRequest { id: 1 }, &CancellationToken::new()).await {
//!     Ok(team) => println!("{}", team.name),
//!     Err(err) => println!("{:?}", translate(&err)),
//! }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod ids;
pub mod observability;
pub mod repository;
pub mod request;
pub mod translate;
pub mod validation;

pub use error::{Error, Result};

/// Common imports
pub mod prelude {
    pub use crate::config::{Config, ServiceConfig};
    pub use crate::entity::{self, Entity, EntityMeta, IdOf};
    pub use crate::error::{Error, Result};
    pub use crate::handlers::{
        CreateHandler, GetOneHandler, Handler, HandlerRegistry, Mapper, UpdateHandler,
    };
    pub use crate::ids::DispatchId;
    pub use crate::observability::init_tracing;
    pub use crate::repository::{
        InMemoryRepository, QuerySpecification, Repository, RepositoryError, RepositoryErrorKind,
        RepositoryOperation, RepositoryResult, Specification,
    };
    pub use crate::request::{CreateCommand, PointQuery, Request, UpdateCommand};
    pub use crate::translate::{translate, FailureResponse, FailureStatus, FieldMessage};
    pub use crate::validation::{AllOf, RuleSet, ValidationFailure, Validator, Violation};

    pub use async_trait::async_trait;
    pub use tokio_util::sync::CancellationToken;
}
