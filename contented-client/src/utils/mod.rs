//! Utility modules.

/// Date/time deserialization helpers for API timestamps.
pub mod datetime;

/// Log sanitization utilities that keep large response bodies out of logs.
pub mod log_sanitizer;

/// Lenient field decoders for loosely-typed API payloads.
pub mod serde_helpers;
