//! Handler and mapping contracts

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};
use crate::request::Request;

/// Executes one request type end to end
///
/// Exactly one handler is registered per request type. The cancellation
/// token is forwarded into every repository call the handler makes.
#[async_trait]
pub trait Handler<Q: Request>: Send + Sync {
    /// Handle `request`, producing its response or a typed failure
    async fn handle(&self, request: Q, cancel: &CancellationToken) -> Result<Q::Response>;
}

/// Maps a persisted entity to a response shape
///
/// Any `Fn(&E) -> R` closure is a mapper. Implement the trait directly when
/// the mapping itself can fail, returning [`Error::Mapping`].
pub trait Mapper<E, R>: Send + Sync {
    /// Build the response for `entity`
    fn map(&self, entity: &E) -> Result<R>;
}

impl<E, R, F> Mapper<E, R> for F
where
    F: Fn(&E) -> R + Send + Sync,
{
    fn map(&self, entity: &E) -> Result<R> {
        Ok(self(entity))
    }
}

pub(crate) fn ensure_active(cancel: &CancellationToken) -> Result<()> {
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }
    Ok(())
}
