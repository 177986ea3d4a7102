//! Request dispatch
//!
//! The registry maps a request's [`TypeId`] to the single handler bound to
//! it. Dispatch is resolved from the static request type; there is no
//! runtime inspection of the request value.

use std::any::{Any, TypeId};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use super::traits::Handler;
use crate::error::{Error, Result};
use crate::ids::DispatchId;
use crate::request::Request;

/// One handler per request type
///
/// ```rust,ignore
/// let mut registry = HandlerRegistry::new();
/// registry.register::<GetTeamRequest>(GetOneHandler::new(teams.clone(), TeamResponse::from_team))?;
///
/// let team = registry.dispatch(GetTeamRequest { id: 1 }, &cancel).await?;
/// ```
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl HandlerRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handler` to request type `Q`
    ///
    /// # Errors
    ///
    /// [`Error::NotConfigured`] if `Q` already has a handler.
    pub fn register<Q: Request>(&mut self, handler: impl Handler<Q> + 'static) -> Result<()> {
        match self.handlers.entry(TypeId::of::<Q>()) {
            Entry::Occupied(_) => {
                tracing::error!(request = Q::NAME, "Handler registered twice");
                Err(Error::not_configured(format!(
                    "{} already has a handler",
                    Q::NAME
                )))
            }
            Entry::Vacant(slot) => {
                let handler: Arc<dyn Handler<Q>> = Arc::new(handler);
                slot.insert(Box::new(handler));
                tracing::debug!(request = Q::NAME, "Handler registered");
                Ok(())
            }
        }
    }

    /// Whether `Q` has a handler
    pub fn contains<Q: Request>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<Q>())
    }

    /// Number of bound request types
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    fn handler<Q: Request>(&self) -> Option<Arc<dyn Handler<Q>>> {
        self.handlers
            .get(&TypeId::of::<Q>())
            .and_then(|handler| handler.downcast_ref::<Arc<dyn Handler<Q>>>())
            .cloned()
    }

    /// Route `request` to its handler
    ///
    /// Runs inside a span carrying the request name and a fresh
    /// [`DispatchId`]. Expected failures log at `info`, everything else at
    /// `error`.
    ///
    /// # Errors
    ///
    /// Whatever the handler returns, or [`Error::NotConfigured`] when no
    /// handler is bound to `Q`.
    pub async fn dispatch<Q: Request>(
        &self,
        request: Q,
        cancel: &CancellationToken,
    ) -> Result<Q::Response> {
        let dispatch_id = DispatchId::new();
        let span = tracing::info_span!("dispatch", request = Q::NAME, dispatch_id = %dispatch_id);

        async move {
            let Some(handler) = self.handler::<Q>() else {
                tracing::error!("No handler registered for request");
                return Err(Error::not_configured(format!(
                    "no handler registered for {}",
                    Q::NAME
                )));
            };

            let outcome = handler.handle(request, cancel).await;
            match &outcome {
                Ok(_) => tracing::debug!("Request handled"),
                Err(err) if err.is_expected() => tracing::info!(error = %err, "Request rejected"),
                Err(Error::Cancelled) => tracing::warn!("Request cancelled"),
                Err(err) => tracing::error!(error = %err, "Request failed"),
            }
            outcome
        }
        .instrument(span)
        .await
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
