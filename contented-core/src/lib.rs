//! Contented Core Library
//!
//! Client-side model of a Contented media library:
//! - [`Container`](types::Container): a deduplicated, `idx`-ordered slice of
//!   one directory, with a cursor and a windowing query
//! - [`LoaderService`]: page-by-page loading of what a container is missing
//! - [`ContainerService`]: container listing and search
//! - [`BrowseState`] and [`NavigationBus`]: cross-container navigation
//!
//! The backend is reached only through the
//! [`ContentApi`](contented_client::ContentApi) trait held by
//! [`ServiceContext`], so every service runs against an in-memory API in tests.

pub mod browse;
pub mod error;
pub mod navigation;
pub mod services;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use browse::BrowseState;
pub use error::{CoreError, CoreResult};
pub use navigation::{NavEvent, NavigationBus};
pub use services::{ContainerService, LoadReport, LoaderService, ServiceContext};
