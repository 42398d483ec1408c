use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    Content, ContainerSearch, ContainerSummary, ContentSearch, PaginatedResponse,
    PaginationParams, Screen, Tag, TagQuery,
};

/// Read access to a Contented backend.
///
/// [`ContentedClient`](crate::ContentedClient) implements this over HTTP;
/// loaders and services only depend on the trait so tests can serve pages
/// from memory.
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// List containers (paginated).
    async fn list_containers(
        &self,
        params: &PaginationParams,
    ) -> Result<PaginatedResponse<ContainerSummary>>;

    /// Fetch one container summary.
    async fn get_container(&self, container_id: &str) -> Result<ContainerSummary>;

    /// One page of a container's contents, ordered by `idx`.
    async fn list_container_contents(
        &self,
        container_id: &str,
        params: &PaginationParams,
    ) -> Result<PaginatedResponse<Content>>;

    /// Fetch one content item.
    async fn get_content(&self, content_id: &str) -> Result<Content>;

    /// Search content across containers.
    async fn search_contents(&self, query: &ContentSearch) -> Result<PaginatedResponse<Content>>;

    /// Search containers.
    async fn search_containers(
        &self,
        query: &ContainerSearch,
    ) -> Result<PaginatedResponse<ContainerSummary>>;

    /// Preview frames captured for a video.
    async fn list_screens(&self, content_id: &str) -> Result<PaginatedResponse<Screen>>;

    /// Raw body of a text item.
    async fn get_text_content(&self, content_id: &str) -> Result<String>;

    /// List tags, optionally of one type.
    async fn list_tags(&self, query: &TagQuery) -> Result<PaginatedResponse<Tag>>;

    /// The page of a container that holds the item at `offset`.
    ///
    /// A zero `limit` uses the default page size.
    async fn fetch_page_at(
        &self,
        container_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<PaginatedResponse<Content>> {
        let params = PaginationParams::from_offset(offset, limit);
        self.list_container_contents(container_id, &params).await
    }
}
