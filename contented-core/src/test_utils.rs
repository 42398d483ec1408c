//! Test helpers
//!
//! In-memory [`ContentApi`] and factories for service tests.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use contented_client::{
    ClientConfig, ClientError, ContentApi, ContainerSearch, ContainerSummary, Content,
    ContentSearch, PaginatedResponse, PaginationParams, Result, Screen, Tag, TagQuery,
};
use tokio::sync::RwLock;

use crate::services::ServiceContext;

/// One recorded `list_container_contents` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub container_id: String,
    pub page: usize,
    pub per_page: usize,
}

// ===== MockContentApi =====

/// Serves containers of generated items, `idx` equal to position.
pub struct MockContentApi {
    containers: RwLock<HashMap<String, ContainerSummary>>,
    /// Item count per container (contents are generated on demand).
    sizes: RwLock<HashMap<String, usize>>,
    /// Total reported in page responses, overriding the real size.
    reported_totals: RwLock<HashMap<String, usize>>,
    /// Pages that fail with a network error.
    failing_pages: RwLock<HashSet<usize>>,
    requests: RwLock<Vec<PageRequest>>,
    screens: RwLock<HashMap<String, usize>>,
    texts: RwLock<HashMap<String, String>>,
    tags: RwLock<Vec<Tag>>,
}

impl MockContentApi {
    pub fn new() -> Self {
        Self {
            containers: RwLock::new(HashMap::new()),
            sizes: RwLock::new(HashMap::new()),
            reported_totals: RwLock::new(HashMap::new()),
            failing_pages: RwLock::new(HashSet::new()),
            requests: RwLock::new(Vec::new()),
            screens: RwLock::new(HashMap::new()),
            texts: RwLock::new(HashMap::new()),
            tags: RwLock::new(Vec::new()),
        }
    }

    /// Register a container holding `size` items with ids `"{id}-{n}"`.
    pub async fn add_container(&self, id: &str, name: &str, size: usize) {
        self.containers.write().await.insert(
            id.to_string(),
            ContainerSummary {
                id: id.to_string(),
                name: name.to_string(),
                path: format!("/media/{name}"),
                total: size,
                ..ContainerSummary::default()
            },
        );
        self.sizes.write().await.insert(id.to_string(), size);
    }

    pub async fn set_reported_total(&self, id: &str, total: usize) {
        self.reported_totals
            .write()
            .await
            .insert(id.to_string(), total);
    }

    pub async fn fail_page(&self, page: usize) {
        self.failing_pages.write().await.insert(page);
    }

    /// Give content `content_id` `count` captured screens.
    pub async fn add_screens(&self, content_id: &str, count: usize) {
        self.screens
            .write()
            .await
            .insert(content_id.to_string(), count);
    }

    pub async fn set_text(&self, content_id: &str, text: &str) {
        self.texts
            .write()
            .await
            .insert(content_id.to_string(), text.to_string());
    }

    pub async fn add_tag(&self, id: &str, tag_type: &str) {
        self.tags.write().await.push(Tag {
            id: id.to_string(),
            tag_type: tag_type.to_string(),
            description: format!("{id} ({tag_type})"),
        });
    }

    pub async fn requests(&self) -> Vec<PageRequest> {
        self.requests.read().await.clone()
    }

    pub async fn requested_pages(&self) -> Vec<usize> {
        self.requests.read().await.iter().map(|r| r.page).collect()
    }

    fn not_found(path: &str) -> ClientError {
        ClientError::NotFound {
            url: path.to_string(),
            raw_message: None,
        }
    }
}

/// Generated item `n` of container `container_id`.
pub fn make_content(container_id: &str, n: usize) -> Content {
    let mut content = Content::new(format!("{container_id}-{n}"), n as u64);
    content.container_id = container_id.to_string();
    content.src = format!("item_{n}.jpg");
    content.content_type = "image/jpeg".to_string();
    content
}

/// Items `range` of container `container_id`.
pub fn make_contents(container_id: &str, range: std::ops::Range<usize>) -> Vec<Content> {
    range.map(|n| make_content(container_id, n)).collect()
}

#[async_trait]
impl ContentApi for MockContentApi {
    async fn list_containers(
        &self,
        params: &PaginationParams,
    ) -> Result<PaginatedResponse<ContainerSummary>> {
        let mut all: Vec<ContainerSummary> =
            self.containers.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        let total = all.len();
        let results = all
            .into_iter()
            .skip(params.offset())
            .take(params.per_page)
            .collect();
        Ok(PaginatedResponse::new(results, total))
    }

    async fn get_container(&self, container_id: &str) -> Result<ContainerSummary> {
        self.containers
            .read()
            .await
            .get(container_id)
            .cloned()
            .ok_or_else(|| Self::not_found(&format!("/containers/{container_id}")))
    }

    async fn list_container_contents(
        &self,
        container_id: &str,
        params: &PaginationParams,
    ) -> Result<PaginatedResponse<Content>> {
        self.requests.write().await.push(PageRequest {
            container_id: container_id.to_string(),
            page: params.page,
            per_page: params.per_page,
        });

        if self.failing_pages.read().await.contains(&params.page) {
            return Err(ClientError::NetworkError {
                url: format!("/containers/{container_id}/contents"),
                detail: format!("page {} unavailable", params.page),
            });
        }

        let size = *self
            .sizes
            .read()
            .await
            .get(container_id)
            .ok_or_else(|| Self::not_found(&format!("/containers/{container_id}/contents")))?;
        let total = self
            .reported_totals
            .read()
            .await
            .get(container_id)
            .copied()
            .unwrap_or(size);

        let start = params.offset().min(size);
        let end = (start + params.per_page).min(size);
        Ok(PaginatedResponse::new(
            make_contents(container_id, start..end),
            total,
        ))
    }

    async fn get_content(&self, content_id: &str) -> Result<Content> {
        let (container_id, n) = content_id
            .rsplit_once('-')
            .and_then(|(c, n)| Some((c, n.parse::<usize>().ok()?)))
            .ok_or_else(|| Self::not_found(&format!("/contents/{content_id}")))?;
        match self.sizes.read().await.get(container_id) {
            Some(&size) if n < size => Ok(make_content(container_id, n)),
            _ => Err(Self::not_found(&format!("/contents/{content_id}"))),
        }
    }

    async fn list_screens(&self, content_id: &str) -> Result<PaginatedResponse<Screen>> {
        self.get_content(content_id).await?;
        let count = self
            .screens
            .read()
            .await
            .get(content_id)
            .copied()
            .unwrap_or(0);
        let screens = (0..count)
            .map(|n| Screen {
                id: format!("{content_id}-s{n}"),
                content_id: content_id.to_string(),
                src: format!("screen_{n}.webp"),
                idx: n as u64,
                size: 1024,
            })
            .collect();
        Ok(PaginatedResponse::new(screens, count))
    }

    async fn get_text_content(&self, content_id: &str) -> Result<String> {
        self.texts
            .read()
            .await
            .get(content_id)
            .cloned()
            .ok_or_else(|| Self::not_found(&format!("/download/{content_id}")))
    }

    async fn list_tags(&self, query: &TagQuery) -> Result<PaginatedResponse<Tag>> {
        let matches: Vec<Tag> = self
            .tags
            .read()
            .await
            .iter()
            .filter(|t| {
                query
                    .tag_type
                    .as_deref()
                    .is_none_or(|kind| kind.is_empty() || t.tag_type == kind)
            })
            .cloned()
            .collect();
        let params = query.pagination();
        let total = matches.len();
        let results = matches
            .into_iter()
            .skip(params.offset())
            .take(params.per_page)
            .collect();
        Ok(PaginatedResponse::new(results, total))
    }

    async fn search_contents(&self, query: &ContentSearch) -> Result<PaginatedResponse<Content>> {
        let text = query.text.clone().unwrap_or_default();
        let sizes = self.sizes.read().await;
        let mut ids: Vec<&String> = sizes.keys().collect();
        ids.sort();

        let matches: Vec<Content> = ids
            .into_iter()
            .filter(|id| query.container_id.as_deref().is_none_or(|c| c == id.as_str()))
            .flat_map(|id| make_contents(id, 0..sizes[id]))
            .filter(|c| c.src.contains(&text) || c.id.contains(&text))
            .collect();

        let params = query.pagination();
        let total = matches.len();
        let results = matches
            .into_iter()
            .skip(params.offset())
            .take(params.per_page)
            .collect();
        Ok(PaginatedResponse::new(results, total))
    }

    async fn search_containers(
        &self,
        query: &ContainerSearch,
    ) -> Result<PaginatedResponse<ContainerSummary>> {
        let mut matches: Vec<ContainerSummary> = self
            .containers
            .read()
            .await
            .values()
            .filter(|c| query.name.as_deref().is_none_or(|name| c.name == name))
            .filter(|c| {
                query
                    .search
                    .as_deref()
                    .is_none_or(|text| c.name.contains(text) || c.description.contains(text))
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.id.cmp(&b.id));
        let total = matches.len();
        Ok(PaginatedResponse::new(matches, total))
    }
}

// ===== Factories =====

/// Service context over a fresh mock.
pub fn create_test_context() -> (Arc<ServiceContext>, Arc<MockContentApi>) {
    create_test_context_with_page_size(contented_client::DEFAULT_PAGE_SIZE)
}

pub fn create_test_context_with_page_size(
    page_size: usize,
) -> (Arc<ServiceContext>, Arc<MockContentApi>) {
    let api = Arc::new(MockContentApi::new());
    let config = ClientConfig {
        page_size,
        ..ClientConfig::default()
    };
    let ctx = Arc::new(ServiceContext::new(api.clone(), config));
    (ctx, api)
}
