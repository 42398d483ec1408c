//! Client configuration.

use serde::{Deserialize, Serialize};

use crate::types::DEFAULT_PAGE_SIZE;

/// Default connect timeout (seconds)
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout (seconds)
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Settings for [`ContentedClient`](crate::ContentedClient) and the loaders
/// built on it.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Server origin, e.g. `http://localhost:3000`. A trailing slash is ignored.
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    /// Items requested per page when loading a container.
    pub page_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// `base_url` without trailing slashes.
    pub fn origin(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Page size, never zero.
    pub fn effective_page_size(&self) -> usize {
        if self.page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            self.page_size
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_keys() {
        let cfg: ClientConfig =
            serde_json::from_str(r#"{"base_url": "http://media.lan/"}"#).unwrap();
        assert_eq!(cfg.origin(), "http://media.lan");
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn zero_page_size_falls_back() {
        let cfg = ClientConfig {
            page_size: 0,
            ..ClientConfig::default()
        };
        assert_eq!(cfg.effective_page_size(), DEFAULT_PAGE_SIZE);
    }
}
