//! Paginated container loading

use std::sync::Arc;

use futures::future::join_all;

use crate::error::{CoreError, CoreResult};
use crate::navigation::NavEvent;
use crate::services::ServiceContext;
use crate::types::{page_count, Container, LoadState, PaginationParams};

/// What a load did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Page requests issued.
    pub requests: usize,
    /// Items that were not loaded before.
    pub added: usize,
}

/// Fetches container contents page by page and merges them into a
/// [`Container`].
///
/// Requests are issued one at a time in increasing page order. Nothing is
/// retried: an error stops the load, keeps what was merged so far and is
/// returned to the caller. Dropping a load future stops it the same way.
pub struct LoaderService {
    ctx: Arc<ServiceContext>,
}

impl LoaderService {
    /// Create a loader service instance
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Fetch the first page of a container that has never been loaded.
    ///
    /// Does nothing unless the container is [`LoadState::NotLoaded`].
    pub async fn initial_load(&self, container: &mut Container) -> CoreResult<LoadReport> {
        if container.load_state() != LoadState::NotLoaded {
            return Ok(LoadReport::default());
        }
        let params = PaginationParams::from_offset(0, self.ctx.page_size());
        self.load_page(container, params).await
    }

    /// Load the first page of several containers concurrently.
    pub async fn initial_load_many(
        &self,
        containers: &mut [Container],
    ) -> Vec<CoreResult<LoadReport>> {
        join_all(containers.iter_mut().map(|c| self.initial_load(c))).await
    }

    /// Fetch the page after the last loaded item.
    pub async fn load_more(&self, container: &mut Container) -> CoreResult<LoadReport> {
        if !container.has_more() {
            return Ok(LoadReport::default());
        }
        self.ctx.nav.emit(NavEvent::LoadMore {
            container_id: container.id.clone(),
        });
        let params = PaginationParams::from_offset(container.count(), self.ctx.page_size());
        self.load_page(container, params).await
    }

    /// Load everything the container is still missing.
    ///
    /// Starts at the page holding item `count`, so data already loaded in
    /// whole pages is not fetched again, and never asks past
    /// `ceil(total / page_size)`. Stops when `count == total` or on a short
    /// page. A server total below the loaded count marks the container
    /// [`LoadState::Stale`] and ends the load with
    /// [`CoreError::StaleContainer`]; a container that is already stale
    /// fails the same way before any request.
    pub async fn full_load_dir(
        &self,
        container: &mut Container,
        page_size: Option<usize>,
    ) -> CoreResult<LoadReport> {
        let mut report = LoadReport::default();
        match container.load_state() {
            LoadState::Complete => return Ok(report),
            LoadState::Stale => return Err(stale(container).logged("Full load")),
            _ => {}
        }

        let page_size = page_size
            .filter(|&n| n > 0)
            .unwrap_or_else(|| self.ctx.page_size());
        let mut params = PaginationParams::from_offset(container.count(), page_size);
        log::info!(
            "Loading container {} from page {} ({} of {} loaded, {page_size} per page)",
            container.id,
            params.page,
            container.count(),
            container.total()
        );

        container.begin_loading();
        while params.page <= page_count(container.total(), page_size) {
            let before = container.count();
            let response = match self
                .ctx
                .api
                .list_container_contents(&container.id, &params)
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    container.end_loading();
                    return Err(CoreError::Client(e).logged(&format!(
                        "Loading page {} of container {}",
                        params.page, container.id
                    )));
                }
            };
            report.requests += 1;

            let short = response.is_short(&params);
            container.set_total(response.total);
            container.add_contents(response.results);
            report.added += container.count().saturating_sub(before);

            if container.load_state() == LoadState::Stale {
                return Err(stale(container).logged("Full load"));
            }
            if container.count() == container.total() || short {
                break;
            }
            params = params.next();
        }
        container.end_loading();

        log::info!(
            "Container {}: {} of {} loaded after {} requests",
            container.id,
            container.count(),
            container.total(),
            report.requests
        );
        Ok(report)
    }

    async fn load_page(
        &self,
        container: &mut Container,
        params: PaginationParams,
    ) -> CoreResult<LoadReport> {
        container.begin_loading();
        let response = match self
            .ctx
            .api
            .list_container_contents(&container.id, &params)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                container.end_loading();
                return Err(CoreError::from(e).logged(&format!(
                    "Loading page {} of container {}",
                    params.page, container.id
                )));
            }
        };

        let before = container.count();
        container.set_total(response.total);
        container.add_contents(response.results);
        container.end_loading();
        Ok(LoadReport {
            requests: 1,
            added: container.count().saturating_sub(before),
        })
    }
}

fn stale(container: &Container) -> CoreError {
    CoreError::StaleContainer {
        id: container.id.clone(),
        count: container.count(),
        total: container.total(),
    }
}
