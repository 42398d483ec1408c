//! Log sanitization utilities
//!
//! A full page of contents can be megabytes of JSON; debug and error logs
//! only ever carry a bounded prefix of a response body.

/// Maximum number of bytes of a body included in log output.
const TRUNCATE_LIMIT: usize = 512;

/// Truncate a string for logging.
///
/// Returns the string unchanged when it fits, otherwise the longest prefix of
/// at most `TRUNCATE_LIMIT` bytes that ends on a character boundary, followed
/// by the original length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }
    let cut = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= TRUNCATE_LIMIT)
        .last()
        .unwrap_or(0);
    format!("{}... [truncated, total {} bytes]", &s[..cut], s.len())
}
