//! Update command handling

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::FutureExt;
use tokio_util::sync::CancellationToken;

use super::create::missing;
use super::traits::{ensure_active, Handler, Mapper};
use crate::entity::Entity;
use crate::error::{Error, Result};
use crate::repository::Repository;
use crate::request::UpdateCommand;
use crate::validation::{AllOf, ValidationFailure, Validator};

/// Applies a command to a loaded entity through its mutation operations
///
/// Runs after the entity is loaded, so rules that depend on stored state
/// (uniqueness against other entities) belong here rather than in the
/// command validator. Returns the mutated entity, unpersisted.
pub type ApplyFn<C, E> =
    Arc<dyn Fn(E, C, CancellationToken) -> BoxFuture<'static, Result<E>> + Send + Sync>;

/// Validates an update command, loads the entity, mutates, persists and maps
///
/// The command validator runs before the entity is loaded and should hold
/// only stateless shape rules. A command naming an identity that does not
/// exist fails with [`Error::NotFound`] before the mutation step runs.
pub struct UpdateHandler<C: UpdateCommand, R, M> {
    repository: Arc<R>,
    validator: Arc<dyn Validator<C>>,
    apply: ApplyFn<C, C::Entity>,
    mapper: M,
}

impl<C: UpdateCommand, R, M> UpdateHandler<C, R, M> {
    /// Start building a handler
    #[must_use]
    pub fn builder() -> UpdateHandlerBuilder<C, R, M> {
        UpdateHandlerBuilder {
            repository: None,
            validator: None,
            apply: None,
            mapper: None,
        }
    }
}

#[async_trait]
impl<C, R, M> Handler<C> for UpdateHandler<C, R, M>
where
    C: UpdateCommand,
    R: Repository<C::Entity> + 'static,
    M: Mapper<C::Entity, C::Response> + 'static,
{
    async fn handle(&self, command: C, cancel: &CancellationToken) -> Result<C::Response> {
        ensure_active(cancel)?;
        let violations = self.validator.validate(&command, cancel).await?;
        ValidationFailure::check(violations)?;

        let id = command.id().clone();
        let entity = self
            .repository
            .get_by_id(&id, cancel)
            .await?
            .ok_or_else(|| Error::not_found(<C::Entity as Entity>::TYPE_NAME, &id))?;

        let entity = (self.apply)(entity, command, cancel.clone()).await?;
        ensure_active(cancel)?;

        let persisted = self.repository.update(entity, cancel).await?;
        let entity_type = <C::Entity as Entity>::TYPE_NAME;
        tracing::debug!(entity = entity_type, id = %id, "Entity updated");
        self.mapper.map(&persisted)
    }
}

/// Builder for [`UpdateHandler`]
pub struct UpdateHandlerBuilder<C: UpdateCommand, R, M> {
    repository: Option<Arc<R>>,
    validator: Option<Arc<dyn Validator<C>>>,
    apply: Option<ApplyFn<C, C::Entity>>,
    mapper: Option<M>,
}

impl<C: UpdateCommand, R, M> UpdateHandlerBuilder<C, R, M> {
    /// Repository the entity is loaded from and saved to
    #[must_use]
    pub fn repository(mut self, repository: Arc<R>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Command validator. Defaults to accepting every command.
    #[must_use]
    pub fn validator(mut self, validator: impl Validator<C> + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Mutation step, calling the entity's named mutation operations
    #[must_use]
    pub fn apply<F, Fut>(mut self, apply: F) -> Self
    where
        F: Fn(C::Entity, C, CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<C::Entity>> + Send + 'static,
    {
        let apply: ApplyFn<C, C::Entity> =
            Arc::new(move |entity: C::Entity, command: C, cancel: CancellationToken| {
                apply(entity, command, cancel).boxed()
            });
        self.apply = Some(apply);
        self
    }

    /// Response mapper
    #[must_use]
    pub fn mapper(mut self, mapper: M) -> Self {
        self.mapper = Some(mapper);
        self
    }

    /// Finish the handler
    ///
    /// # Errors
    ///
    /// [`Error::NotConfigured`] naming the first missing piece.
    pub fn build(self) -> Result<UpdateHandler<C, R, M>> {
        let repository = self.repository.ok_or_else(|| missing::<C>("repository"))?;
        let apply = self.apply.ok_or_else(|| missing::<C>("mutation step"))?;
        let mapper = self.mapper.ok_or_else(|| missing::<C>("mapper"))?;
        let validator: Arc<dyn Validator<C>> = match self.validator {
            Some(validator) => validator,
            None => Arc::new(AllOf::<C>::new()),
        };

        Ok(UpdateHandler {
            repository,
            validator,
            apply,
            mapper,
        })
    }
}
