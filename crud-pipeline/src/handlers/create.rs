//! Create command handling

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::FutureExt;
use tokio_util::sync::CancellationToken;

use super::traits::{ensure_active, Handler, Mapper};
use crate::entity::Entity;
use crate::error::{Error, Result};
use crate::repository::Repository;
use crate::request::{CreateCommand, Request};
use crate::validation::{AllOf, ValidationFailure, Validator};

/// Builds a new entity from a command, usually through the entity's factory
///
/// The step may read the repository (uniqueness checks) and must return the
/// entity unpersisted. Violations it finds come back as [`Error::Validation`].
pub type GenerateFn<C, E> =
    Arc<dyn Fn(C, CancellationToken) -> BoxFuture<'static, Result<E>> + Send + Sync>;

/// Validates a create command, builds the entity, persists it and maps it
///
/// ```rust,ignore
/// let handler = CreateHandler::<CreateTeamCommand, _, _>::builder()
///     .repository(teams.clone())
///     .validator(create_team_rules())
///     .generate(move |cmd, cancel| generate_team(teams.clone(), cmd, cancel))
///     .mapper(TeamResponse::from_team)
///     .build()?;
/// ```
pub struct CreateHandler<C: CreateCommand, R, M> {
    repository: Arc<R>,
    validator: Arc<dyn Validator<C>>,
    generate: GenerateFn<C, C::Entity>,
    mapper: M,
}

impl<C: CreateCommand, R, M> CreateHandler<C, R, M> {
    /// Start building a handler
    #[must_use]
    pub fn builder() -> CreateHandlerBuilder<C, R, M> {
        CreateHandlerBuilder {
            repository: None,
            validator: None,
            generate: None,
            mapper: None,
        }
    }
}

#[async_trait]
impl<C, R, M> Handler<C> for CreateHandler<C, R, M>
where
    C: CreateCommand,
    R: Repository<C::Entity> + 'static,
    M: Mapper<C::Entity, C::Response> + 'static,
{
    async fn handle(&self, command: C, cancel: &CancellationToken) -> Result<C::Response> {
        ensure_active(cancel)?;
        let violations = self.validator.validate(&command, cancel).await?;
        ValidationFailure::check(violations)?;

        let entity = (self.generate)(command, cancel.clone()).await?;
        ensure_active(cancel)?;

        let persisted = self.repository.add(entity, cancel).await?;
        if let Some(id) = persisted.id() {
            let entity_type = <C::Entity as Entity>::TYPE_NAME;
            tracing::debug!(entity = entity_type, id = %id, "Entity created");
        }
        self.mapper.map(&persisted)
    }
}

/// Builder for [`CreateHandler`]
pub struct CreateHandlerBuilder<C: CreateCommand, R, M> {
    repository: Option<Arc<R>>,
    validator: Option<Arc<dyn Validator<C>>>,
    generate: Option<GenerateFn<C, C::Entity>>,
    mapper: Option<M>,
}

impl<C: CreateCommand, R, M> CreateHandlerBuilder<C, R, M> {
    /// Repository the entity is persisted to
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

    /// Entity construction step
    #[must_use]
    pub fn generate<F, Fut>(mut self, generate: F) -> Self
    where
        F: Fn(C, CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<C::Entity>> + Send + 'static,
    {
        let generate: GenerateFn<C, C::Entity> =
            Arc::new(move |command: C, cancel: CancellationToken| generate(command, cancel).boxed());
        self.generate = Some(generate);
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
    /// [`Error::NotConfigured`] naming the first missing piece. A missing
    /// construction step is a wiring defect and is logged at `error`.
    pub fn build(self) -> Result<CreateHandler<C, R, M>> {
        let repository = self.repository.ok_or_else(|| missing::<C>("repository"))?;
        let generate = self.generate.ok_or_else(|| missing::<C>("entity construction step"))?;
        let mapper = self.mapper.ok_or_else(|| missing::<C>("mapper"))?;
        let validator: Arc<dyn Validator<C>> = match self.validator {
            Some(validator) => validator,
            None => Arc::new(AllOf::<C>::new()),
        };

        Ok(CreateHandler {
            repository,
            validator,
            generate,
            mapper,
        })
    }
}

pub(super) fn missing<Q: Request>(part: &str) -> Error {
    tracing::error!(request = Q::NAME, part, "Handler is missing a required step");
    Error::not_configured(format!("{} handler has no {}", Q::NAME, part))
}
