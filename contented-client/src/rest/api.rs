//! `ContentApi` trait implementation

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::ContentApi;
use crate::types::{
    Content, ContainerSearch, ContainerSummary, ContentSearch, PaginatedResponse,
    PaginationParams, Screen, Tag, TagQuery,
};

use super::{ContentedClient, encode};

#[async_trait]
impl ContentApi for ContentedClient {
    async fn list_containers(
        &self,
        params: &PaginationParams,
    ) -> Result<PaginatedResponse<ContainerSummary>> {
        self.get_json("/containers", &params.to_query()).await
    }

    async fn get_container(&self, container_id: &str) -> Result<ContainerSummary> {
        self.get_json(&format!("/containers/{}", encode(container_id)), &[])
            .await
    }

    async fn list_container_contents(
        &self,
        container_id: &str,
        params: &PaginationParams,
    ) -> Result<PaginatedResponse<Content>> {
        let path = format!("/containers/{}/contents", encode(container_id));
        let page: PaginatedResponse<Content> = self.get_json(&path, &params.to_query()).await?;
        log::debug!(
            "Container {container_id} page {} returned {} of {} items",
            params.page,
            page.results.len(),
            page.total
        );
        Ok(page)
    }

    async fn get_content(&self, content_id: &str) -> Result<Content> {
        self.get_json(&content_path(content_id), &[]).await
    }

    async fn search_contents(&self, query: &ContentSearch) -> Result<PaginatedResponse<Content>> {
        self.get_json("/search/contents", &query.to_query()?).await
    }

    async fn search_containers(
        &self,
        query: &ContainerSearch,
    ) -> Result<PaginatedResponse<ContainerSummary>> {
        self.get_json("/search/containers", &query.to_query()?)
            .await
    }

    async fn list_screens(&self, content_id: &str) -> Result<PaginatedResponse<Screen>> {
        self.get_json(&screens_path(content_id), &[]).await
    }

    async fn get_text_content(&self, content_id: &str) -> Result<String> {
        self.get_text(&format!("/download/{}", encode(content_id)))
            .await
    }

    async fn list_tags(&self, query: &TagQuery) -> Result<PaginatedResponse<Tag>> {
        self.get_json("/tags", &query.to_query()).await
    }
}

pub(super) fn content_path(content_id: &str) -> String {
    format!("/contents/{}", encode(content_id))
}

pub(super) fn screens_path(content_id: &str) -> String {
    format!("/contents/{}/screens", encode(content_id))
}
