//! Request handlers
//!
//! - [`Handler`]: the single polymorphic `handle` contract
//! - [`GetOneHandler`], [`CreateHandler`], [`UpdateHandler`]: the three
//!   orchestrations, composed from injected functions
//! - [`HandlerRegistry`]: dispatch keyed by request type
//! - [`Mapper`]: entity to response mapping

mod create;
mod query;
mod registry;
mod traits;
mod update;

pub use create::{CreateHandler, CreateHandlerBuilder, GenerateFn};
pub use query::GetOneHandler;
pub use registry::HandlerRegistry;
pub use traits::{Handler, Mapper};
pub use update::{ApplyFn, UpdateHandler, UpdateHandlerBuilder};
