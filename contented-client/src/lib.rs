//! # contented-client
//!
//! A typed client for the Contented media server's REST API: container
//! listings, paginated container contents, content lookup, screens, tags and
//! search.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for cross-compilation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use contented_client::{ClientConfig, ContentApi, ContentedClient, PaginationParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ContentedClient::new(ClientConfig::with_base_url("http://localhost:3000"))?;
//!
//!     let containers = client.list_containers(&PaginationParams::default()).await?;
//!     for summary in &containers.results {
//!         println!("{} ({} items)", summary.name, summary.total);
//!     }
//!
//!     // Second page of 100 items of the first container
//!     let page = client
//!         .list_container_contents(&containers.results[0].id, &PaginationParams { page: 2, per_page: 100 })
//!         .await?;
//!     println!("{} of {}", page.results.len(), page.total);
//!     Ok(())
//! }
//! ```
//!
//! ## Pagination
//!
//! Pages are 1-based. [`PaginationParams::from_offset`] maps an item offset
//! onto the page that holds it, which is how loaders resume a partially
//! loaded container without re-requesting what they already have.
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ClientError>`](ClientError). The client
//! never retries; [`ClientError::is_transient`] tells the caller whether a
//! retry could help.

mod config;
mod error;
mod http_client;
mod rest;
mod traits;
mod types;
mod utils;

pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use rest::ContentedClient;
pub use traits::ContentApi;
pub use types::{
    Content, ContainerSearch, ContainerSummary, ContentSearch, DEFAULT_PAGE_SIZE,
    DEFAULT_TAG_PAGE_SIZE, PaginatedResponse, PaginationParams, Screen, Tag, TagQuery,
    VideoCodecInfo, VideoFormat, VideoStream, page_count,
};

pub use utils::datetime;
