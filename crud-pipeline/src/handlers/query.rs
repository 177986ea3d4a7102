//! Point query handling

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::traits::{ensure_active, Handler, Mapper};
use crate::entity::Entity;
use crate::error::{Error, Result};
use crate::repository::Repository;
use crate::request::PointQuery;

/// Reads one entity and maps it, or fails with [`Error::NotFound`]
pub struct GetOneHandler<Q, R, M> {
    repository: Arc<R>,
    mapper: M,
    _request: PhantomData<fn() -> Q>,
}

impl<Q, R, M> GetOneHandler<Q, R, M>
where
    Q: PointQuery,
    R: Repository<Q::Entity> + 'static,
    M: Mapper<Q::Entity, Q::Response> + 'static,
{
    /// Create a handler reading from `repository`
    pub fn new(repository: Arc<R>, mapper: M) -> Self {
        Self {
            repository,
            mapper,
            _request: PhantomData,
        }
    }
}

#[async_trait]
impl<Q, R, M> Handler<Q> for GetOneHandler<Q, R, M>
where
    Q: PointQuery,
    R: Repository<Q::Entity> + 'static,
    M: Mapper<Q::Entity, Q::Response> + 'static,
{
    async fn handle(&self, request: Q, cancel: &CancellationToken) -> Result<Q::Response> {
        ensure_active(cancel)?;
        let id = request.id();
        let entity = self
            .repository
            .get_by_id(id, cancel)
            .await?
            .ok_or_else(|| Error::not_found(<Q::Entity as Entity>::TYPE_NAME, id))?;
        self.mapper.map(&entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::testing::Widget;
    use crate::repository::InMemoryRepository;
    use crate::request::Request;

    struct GetWidget(i64);

    impl Request for GetWidget {
        type Response = String;
        const NAME: &'static str = "GetWidget";
    }

    impl PointQuery for GetWidget {
        type Entity = Widget;
        fn id(&self) -> &i64 {
            &self.0
        }
    }

    fn label(widget: &Widget) -> String {
        widget.label.clone()
    }

    #[tokio::test]
    async fn test_returns_mapped_entity() {
        let repo = Arc::new(InMemoryRepository::<Widget>::new());
        let cancel = CancellationToken::new();
        repo.add(Widget::new("gear"), &cancel).await.unwrap();

        let handler: GetOneHandler<GetWidget, _, _> = GetOneHandler::new(repo, label);
        let response = handler.handle(GetWidget(1), &cancel).await.unwrap();
        assert_eq!(response, "gear");
    }

    #[tokio::test]
    async fn test_missing_entity_is_not_found() {
        let repo = Arc::new(InMemoryRepository::<Widget>::new());
        let handler: GetOneHandler<GetWidget, _, _> = GetOneHandler::new(repo, label);

        let err = handler
            .handle(GetWidget(42), &CancellationToken::new())
            .await
            .unwrap_err();
        match err {
            Error::NotFound { entity_type, id } => {
                assert_eq!(entity_type, "Widget");
                assert_eq!(id, "42");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_mapping_failure_propagates() {
        struct Broken;
        impl Mapper<Widget, String> for Broken {
            fn map(&self, _entity: &Widget) -> Result<String> {
                Err(Error::Mapping("no profile for Widget".into()))
            }
        }

        let repo = Arc::new(InMemoryRepository::<Widget>::new());
        let cancel = CancellationToken::new();
        repo.add(Widget::new("gear"), &cancel).await.unwrap();

        let handler: GetOneHandler<GetWidget, _, _> = GetOneHandler::new(repo, Broken);
        let err = handler.handle(GetWidget(1), &cancel).await.unwrap_err();
        assert!(matches!(err, Error::Mapping(_)));
    }

    #[tokio::test]
    async fn test_cancelled_before_read() {
        let repo = Arc::new(InMemoryRepository::<Widget>::new());
        let handler: GetOneHandler<GetWidget, _, _> = GetOneHandler::new(repo, label);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = handler.handle(GetWidget(1), &cancel).await.unwrap_err();
        assert!(matches!(err, Error::Cancelled));
    }
}
