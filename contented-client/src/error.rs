use serde::{Deserialize, Serialize};

/// Unified error type for all Contented API operations.
///
/// Every variant records the `url` that was requested so callers can report
/// which page or resource failed. All variants are serializable for
/// structured error reporting.
///
/// # Transient Errors
///
/// The following variants represent transient failures that may succeed if the
/// caller repeats the request:
/// - [`NetworkError`](Self::NetworkError): network connectivity issues, 502/503/504
/// - [`Timeout`](Self::Timeout): request timed out
/// - [`RateLimited`](Self::RateLimited): HTTP 429
///
/// The client itself never retries; see [`is_transient`](Self::is_transient).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "code")]
pub enum ClientError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Requested URL.
        url: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Requested URL.
        url: String,
        /// Error details.
        detail: String,
    },

    /// The server rejected the request with HTTP 429.
    RateLimited {
        /// Requested URL.
        url: String,
        /// Suggested wait time in seconds, if the server sent `Retry-After`.
        retry_after: Option<u64>,
    },

    /// The requested container or content does not exist (HTTP 404).
    NotFound {
        /// Requested URL.
        url: String,
        /// Server supplied message, if any.
        raw_message: Option<String>,
    },

    /// Any other non-success HTTP status.
    Api {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// A request parameter is invalid before anything was sent.
    InvalidParameter {
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// Failed to parse the API response.
    ParseError {
        /// Requested URL.
        url: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request parameter.
    SerializationError {
        /// Details about the serialization failure.
        detail: String,
    },
}

impl ClientError {
    /// Whether the error is an expected outcome (missing resource, bad input),
    /// used to pick the log level.
    ///
    /// `true` logs at `warn`, `false` at `error`.
    /// **Keep this in sync when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::InvalidParameter { .. } | Self::RateLimited { .. }
        )
    }

    /// Whether repeating the same request could succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { url, detail } => {
                write!(f, "Network error calling {url}: {detail}")
            }
            Self::Timeout { url, detail } => {
                write!(f, "Request to {url} timed out: {detail}")
            }
            Self::RateLimited { url, retry_after } => {
                if let Some(secs) = retry_after {
                    write!(f, "Rate limited by {url} (retry after {secs}s)")
                } else {
                    write!(f, "Rate limited by {url}")
                }
            }
            Self::NotFound { url, raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "Not found: {url}: {msg}")
                } else {
                    write!(f, "Not found: {url}")
                }
            }
            Self::Api {
                url,
                status,
                message,
            } => {
                write!(f, "HTTP {status} from {url}: {message}")
            }
            Self::InvalidParameter { param, detail } => {
                write!(f, "Invalid parameter '{param}': {detail}")
            }
            Self::ParseError { url, detail } => {
                write!(f, "Failed to parse response from {url}: {detail}")
            }
            Self::SerializationError { detail } => {
                write!(f, "Serialization error: {detail}")
            }
        }
    }
}

impl std::error::Error for ClientError {}

/// Convenience type alias for `Result<T, ClientError>`.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn display_network_error() {
        let e = ClientError::NetworkError {
            url: "http://localhost/api".to_string(),
            detail: "connection refused".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "Network error calling http://localhost/api: connection refused"
        );
    }

    #[test]
    fn display_rate_limited_with_retry_after() {
        let e = ClientError::RateLimited {
            url: "/x".to_string(),
            retry_after: Some(5),
        };
        assert_eq!(e.to_string(), "Rate limited by /x (retry after 5s)");
    }

    #[test]
    fn display_not_found_without_message() {
        let e = ClientError::NotFound {
            url: "/api/contents/9".to_string(),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "Not found: /api/contents/9");
    }

    #[test]
    fn display_api_error() {
        let e = ClientError::Api {
            url: "/x".to_string(),
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(e.to_string(), "HTTP 500 from /x: boom");
    }

    #[test]
    fn expected_errors_are_classified() {
        assert!(
            ClientError::NotFound {
                url: String::new(),
                raw_message: None,
            }
            .is_expected()
        );
        assert!(
            !ClientError::ParseError {
                url: String::new(),
                detail: String::new(),
            }
            .is_expected()
        );
    }

    #[test]
    fn transient_errors_are_classified() {
        assert!(
            ClientError::Timeout {
                url: String::new(),
                detail: String::new(),
            }
            .is_transient()
        );
        assert!(
            !ClientError::Api {
                url: String::new(),
                status: 400,
                message: String::new(),
            }
            .is_transient()
        );
    }

    #[test]
    fn serializes_with_code_tag() {
        let e = ClientError::Api {
            url: "/x".to_string(),
            status: 418,
            message: "teapot".to_string(),
        };
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["code"], "Api");
        assert_eq!(json["status"], 418);
    }
}
