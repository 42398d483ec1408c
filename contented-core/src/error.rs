//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export the client error type
pub use contented_client::ClientError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Container not found
    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    /// Content not found
    #[error("Content not found: {0}")]
    ContentNotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A load finished on a container whose loaded count exceeds the server total
    #[error("Container {id} is stale: {count} loaded, server reports {total}")]
    StaleContainer {
        id: String,
        count: usize,
        total: usize,
    },

    /// API client error (converted from the client crate)
    #[error("{0}")]
    Client(#[from] ClientError),
}

impl CoreError {
    /// Whether this is expected behaviour (bad input, missing resource) rather
    /// than a fault. Used to pick the log level.
    ///
    /// Log at `warn` when `true`, at `error` when `false`.
    /// Keep this in sync when adding variants.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ContainerNotFound(_)
            | Self::ContentNotFound(_)
            | Self::ValidationError(_) => true,
            Self::Client(e) => e.is_expected(),
            Self::StaleContainer { .. } => false,
        }
    }

    /// Log at the level [`is_expected`](Self::is_expected) picks, then hand
    /// the error back.
    #[must_use]
    pub fn logged(self, context: &str) -> Self {
        if self.is_expected() {
            log::warn!("{context}: {self}");
        } else {
            log::error!("{context}: {self}");
        }
        self
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
