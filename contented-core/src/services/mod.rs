//! Business logic service layer

mod container_service;
mod loader_service;

pub use container_service::ContainerService;
pub use loader_service::{LoadReport, LoaderService};

use std::sync::Arc;

use contented_client::{ClientConfig, ContentApi};

use crate::navigation::NavigationBus;

/// Service context - holds every dependency
///
/// The embedding layer builds this once and injects the API implementation
/// (the HTTP client in production, an in-memory mock in tests).
pub struct ServiceContext {
    /// Backend access
    pub api: Arc<dyn ContentApi>,
    /// Client settings; `page_size` drives the loaders
    pub config: ClientConfig,
    /// Navigation channel shared by everything built on this context
    pub nav: NavigationBus,
}

impl ServiceContext {
    /// Create a service context
    #[must_use]
    pub fn new(api: Arc<dyn ContentApi>, config: ClientConfig) -> Self {
        Self {
            api,
            config,
            nav: NavigationBus::default(),
        }
    }

    /// Page size used when a caller doesn't pass one.
    pub fn page_size(&self) -> usize {
        self.config.effective_page_size()
    }
}
