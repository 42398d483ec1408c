//! Container listing and search service

use std::sync::Arc;

use contented_client::ClientError;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{
    Container, ContainerSearch, Content, ContentSearch, PaginatedResponse, PaginationParams,
    Screen, Tag, TagQuery,
};

/// Container listing and search service
pub struct ContainerService {
    ctx: Arc<ServiceContext>,
}

impl ContainerService {
    /// Create a container service instance
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// List containers (paginated), as unloaded [`Container`]s.
    ///
    /// Summaries that embed a first batch of contents come back with those
    /// items already merged.
    pub async fn list_containers(
        &self,
        page: Option<usize>,
        page_size: Option<usize>,
    ) -> CoreResult<PaginatedResponse<Container>> {
        let params = PaginationParams {
            page: page.unwrap_or(1),
            per_page: page_size.unwrap_or_else(|| self.ctx.page_size()),
        }
        .validated(self.ctx.page_size());

        let response = self.ctx.api.list_containers(&params).await?;
        let containers = response.results.into_iter().map(Container::from).collect();
        Ok(PaginatedResponse::new(containers, response.total))
    }

    /// Fetch one container.
    pub async fn get_container(&self, container_id: &str) -> CoreResult<Container> {
        match self.ctx.api.get_container(container_id).await {
            Ok(summary) => Ok(Container::from(summary)),
            Err(ClientError::NotFound { .. }) => {
                Err(CoreError::ContainerNotFound(container_id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Fetch one content item.
    pub async fn get_content(&self, content_id: &str) -> CoreResult<Content> {
        match self.ctx.api.get_content(content_id).await {
            Ok(content) => Ok(content),
            Err(ClientError::NotFound { .. }) => {
                Err(CoreError::ContentNotFound(content_id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Screens captured for a video item.
    pub async fn list_screens(&self, content_id: &str) -> CoreResult<PaginatedResponse<Screen>> {
        match self.ctx.api.list_screens(content_id).await {
            Ok(screens) => Ok(screens),
            Err(ClientError::NotFound { .. }) => {
                Err(CoreError::ContentNotFound(content_id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Body of a text item.
    pub async fn get_text_content(&self, content_id: &str) -> CoreResult<String> {
        match self.ctx.api.get_text_content(content_id).await {
            Ok(text) => Ok(text),
            Err(ClientError::NotFound { .. }) => {
                Err(CoreError::ContentNotFound(content_id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn list_tags(&self, query: &TagQuery) -> CoreResult<PaginatedResponse<Tag>> {
        Ok(self.ctx.api.list_tags(query).await?)
    }

    /// Search containers by name or description.
    pub async fn search_containers(
        &self,
        query: &ContainerSearch,
    ) -> CoreResult<PaginatedResponse<Container>> {
        let response = self.ctx.api.search_containers(query).await?;
        let containers = response.results.into_iter().map(Container::from).collect();
        Ok(PaginatedResponse::new(containers, response.total))
    }

    /// Search content across containers.
    pub async fn search_contents(
        &self,
        query: &ContentSearch,
    ) -> CoreResult<PaginatedResponse<Content>> {
        if query.limit == Some(0) {
            return Err(CoreError::ValidationError(
                "search limit must be positive".to_string(),
            ));
        }
        Ok(self.ctx.api.search_contents(query).await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_context;
    use crate::types::LoadState;

    async fn setup() -> ContainerService {
        let (ctx, api) = create_test_context();
        api.add_container("1", "holiday", 12).await;
        api.add_container("2", "comics", 0).await;
        api.add_container("3", "holiday_extra", 4).await;
        ContainerService::new(ctx)
    }

    #[tokio::test]
    async fn list_containers_builds_unloaded_containers() {
        let service = setup().await;

        let page = service.list_containers(None, None).await.unwrap();

        assert_eq!(page.total, 3);
        let ids: Vec<&str> = page.results.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
        assert_eq!(page.results[0].total(), 12);
        assert_eq!(page.results[0].load_state(), LoadState::NotLoaded);
        // Nothing to load in an empty directory.
        assert!(page.results[1].is_complete());
    }

    #[tokio::test]
    async fn list_containers_pages() {
        let service = setup().await;

        let page = service.list_containers(Some(2), Some(2)).await.unwrap();

        assert_eq!(page.total, 3);
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].id, "3");
    }

    #[tokio::test]
    async fn get_container_not_found() {
        let service = setup().await;

        let err = service.get_container("404").await.unwrap_err();
        assert!(matches!(err, CoreError::ContainerNotFound(ref id) if id == "404"));
        assert!(err.is_expected());

        let found = service.get_container("3").await.unwrap();
        assert_eq!(found.name, "holiday_extra");
    }

    #[tokio::test]
    async fn get_content_by_id() {
        let service = setup().await;

        let content = service.get_content("1-5").await.unwrap();
        assert_eq!(content.idx, 5);
        assert_eq!(content.container_id, "1");

        let err = service.get_content("1-99").await.unwrap_err();
        assert!(matches!(err, CoreError::ContentNotFound(_)));
    }

    #[tokio::test]
    async fn search_containers_by_name() {
        let service = setup().await;

        let exact = service
            .search_containers(&ContainerSearch {
                name: Some("holiday".to_string()),
                ..ContainerSearch::default()
            })
            .await
            .unwrap();
        assert_eq!(exact.total, 1);

        let fuzzy = service
            .search_containers(&ContainerSearch {
                search: Some("holiday".to_string()),
                ..ContainerSearch::default()
            })
            .await
            .unwrap();
        assert_eq!(fuzzy.total, 2);
    }

    #[tokio::test]
    async fn search_contents_within_container() {
        let service = setup().await;

        let mut query = ContentSearch::text("item_1");
        query.container_id = Some("1".to_string());
        let result = service.search_contents(&query).await.unwrap();

        // item_1, item_10, item_11
        assert_eq!(result.total, 3);
        assert!(result.results.iter().all(|c| c.container_id == "1"));
    }

    #[tokio::test]
    async fn search_contents_rejects_zero_limit() {
        let service = setup().await;

        let query = ContentSearch {
            limit: Some(0),
            ..ContentSearch::default()
        };
        let err = service.search_contents(&query).await.unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[tokio::test]
    async fn list_screens_for_video() {
        let (ctx, api) = create_test_context();
        api.add_container("1", "clips", 3).await;
        api.add_screens("1-2", 4).await;
        let service = ContainerService::new(ctx);

        let screens = service.list_screens("1-2").await.unwrap();
        assert_eq!(screens.total, 4);
        assert_eq!(screens.results[3].src, "screen_3.webp");
        assert!(screens.results.iter().all(|s| s.content_id == "1-2"));

        assert!(service.list_screens("1-0").await.unwrap().results.is_empty());

        let err = service.list_screens("9-9").await.unwrap_err();
        assert!(matches!(err, CoreError::ContentNotFound(ref id) if id == "9-9"));
    }

    #[tokio::test]
    async fn get_text_content_body() {
        let (ctx, api) = create_test_context();
        api.set_text("1-0", "# notes").await;
        let service = ContainerService::new(ctx);

        assert_eq!(service.get_text_content("1-0").await.unwrap(), "# notes");
        let err = service.get_text_content("1-1").await.unwrap_err();
        assert!(matches!(err, CoreError::ContentNotFound(_)));
    }

    #[tokio::test]
    async fn list_tags_filters_by_type() {
        let (ctx, api) = create_test_context();
        api.add_tag("beach", "place").await;
        api.add_tag("cat", "animal").await;
        api.add_tag("forest", "place").await;
        let service = ContainerService::new(ctx);

        let all = service.list_tags(&TagQuery::default()).await.unwrap();
        assert_eq!(all.total, 3);

        let places = service
            .list_tags(&TagQuery {
                tag_type: Some("place".to_string()),
                ..TagQuery::default()
            })
            .await
            .unwrap();
        let ids: Vec<&str> = places.results.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["beach", "forest"]);
    }
}
