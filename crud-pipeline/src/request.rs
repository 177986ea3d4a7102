//! Typed requests
//!
//! A request declares at the type level what it returns and which entity it
//! concerns, so a handler is resolved from the request type alone.
//!
//! ```rust,ignore
//! pub struct GetTeamRequest { pub id: i64 }
//!
//! impl Request for GetTeamRequest {
//!     type Response = TeamResponse;
//!     const NAME: &'static str = "GetTeamRequest";
//! }
//!
//! impl PointQuery for GetTeamRequest {
//!     type Entity = Team;
//!     fn id(&self) -> &i64 { &self.id }
//! }
//! ```

use crate::entity::{Entity, IdOf};

/// Any query or command that can be dispatched
pub trait Request: Send + Sync + 'static {
    /// Success payload
    type Response: Send + 'static;

    /// Stable name used in logs
    const NAME: &'static str;
}

/// Fetch one entity by identity
pub trait PointQuery: Request {
    /// Entity being read
    type Entity: Entity;

    /// Requested identity
    fn id(&self) -> &IdOf<Self::Entity>;
}

/// Create one entity from field values. Carries no identity.
pub trait CreateCommand: Request {
    /// Entity being created
    type Entity: Entity;
}

/// Apply field values to an existing entity
pub trait UpdateCommand: Request {
    /// Entity being changed
    type Entity: Entity;

    /// Identity of the entity to change
    fn id(&self) -> &IdOf<Self::Entity>;
}
