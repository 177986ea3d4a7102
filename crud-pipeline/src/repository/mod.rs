//! Repository abstraction
//!
//! - [`Repository`]: get by id, add, update, query and remove for one entity type
//! - [`Specification`]: predicate passed to [`Repository::query`]
//! - [`InMemoryRepository`]: a concurrent map implementation
//! - [`RepositoryError`]: structured errors with operation context

mod error;
mod memory;
mod specification;
mod traits;

pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
pub use memory::{InMemoryRepository, SequentialId};
pub use specification::{QuerySpecification, Specification};
pub use traits::{Repository, RepositoryResult};
