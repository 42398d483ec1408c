//! Generic HTTP request handling
//!
//! Every endpoint goes through the same flow: send, log, map the status code
//! onto [`ClientError`], read the body. Callers build the `RequestBuilder`
//! themselves and choose how to decode the body.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns the response body of a 2xx reply.
    ///
    /// # Arguments
    /// * `request_builder` - configured request (URL, query, headers)
    /// * `method_name` - HTTP method, for logs
    /// * `url` - request URL, for logs and error context
    ///
    /// # Errors
    /// * `Timeout` / `NetworkError` - the request could not be completed
    /// * `RateLimited` - HTTP 429
    /// * `NetworkError` - HTTP 502/503/504
    /// * `NotFound` - HTTP 404
    /// * `Api` - any other non-success status
    pub async fn execute_request(
        request_builder: RequestBuilder,
        method_name: &str,
        url: &str,
    ) -> Result<String, ClientError> {
        log::debug!("{method_name} {url}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout {
                    url: url.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ClientError::NetworkError {
                    url: url.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("Response Status: {status_code}");

        // Extract Retry-After header (before consuming response body)
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let body = response
            .text()
            .await
            .map_err(|e| ClientError::NetworkError {
                url: url.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!("Response Body: {}", truncate_for_log(&body));

        match status_code {
            200..=299 => Ok(body),
            429 => {
                log::warn!("Rate limited (HTTP 429) by {url}, retry_after={retry_after:?}");
                Err(ClientError::RateLimited {
                    url: url.to_string(),
                    retry_after,
                })
            }
            502..=504 => {
                log::warn!("Server unavailable (HTTP {status_code}) at {url}");
                Err(ClientError::NetworkError {
                    url: url.to_string(),
                    detail: format!("HTTP {status_code}: {}", truncate_for_log(&body)),
                })
            }
            404 => Err(ClientError::NotFound {
                url: url.to_string(),
                raw_message: extract_error_message(&body),
            }),
            _ => Err(ClientError::Api {
                url: url.to_string(),
                status: status_code,
                message: extract_error_message(&body)
                    .unwrap_or_else(|| fallback_message(&body).to_string()),
            }),
        }
    }

    /// Parse JSON response
    ///
    /// # Errors
    /// * `ParseError` - the body is not valid JSON for `T`
    pub fn parse_json<T>(response_text: &str, url: &str) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("JSON parse failed for {url}: {e}");
            log::error!("Raw response: {}", truncate_for_log(response_text));
            ClientError::ParseError {
                url: url.to_string(),
                detail: e.to_string(),
            }
        })
    }
}

/// Pull the human readable message out of an error body.
///
/// The API answers errors with `{"error": "..."}`; some proxies answer with
/// `{"message": "..."}`.
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|key| value.get(*key).and_then(serde_json::Value::as_str))
        .filter(|msg| !msg.is_empty())
        .map(str::to_string)
}

fn fallback_message(body: &str) -> &'static str {
    if body.trim().is_empty() {
        "Unhandled exception on the server."
    } else {
        "Exception, non json returned."
    }
}
