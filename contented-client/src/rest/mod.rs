//! HTTP implementation of [`ContentApi`](crate::ContentApi).

mod api;
mod http;

use std::time::Duration;

use reqwest::Client;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::types::Content;

const API_PREFIX: &str = "/api";

/// Client for a Contented server.
///
/// Cheap to clone: the underlying `reqwest::Client` shares its connection pool.
#[derive(Clone)]
pub struct ContentedClient {
    pub(crate) client: Client,
    pub(crate) config: ClientConfig,
}

impl ContentedClient {
    /// Build a client with the timeouts from `config`.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ClientError::InvalidParameter {
                param: "config".to_string(),
                detail: format!("Failed to create HTTP client: {e}"),
            })?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute URL of the preview image for a content item.
    pub fn preview_url(&self, content: &Content) -> String {
        self.url(&format!("/preview/{}", encode(&content.id)))
    }

    /// Absolute URL that streams the full content item.
    pub fn view_url(&self, content: &Content) -> String {
        self.url(&format!("/view/{}", encode(&content.id)))
    }

    /// Absolute URL that downloads the content item as a file.
    pub fn download_url(&self, content: &Content) -> String {
        self.url(&format!("/download/{}", encode(&content.id)))
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{API_PREFIX}{path}", self.config.origin())
    }
}

/// Percent-encode one path segment.
pub(crate) fn encode(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}
