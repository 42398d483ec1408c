//! Field decoders for the loosely-typed JSON the API returns.
//!
//! The backend is not strict about types: ids arrive as strings or numbers,
//! optional fields arrive as `null`, and ffprobe reports numbers as strings.
//! Each helper maps those shapes onto one concrete Rust type instead of
//! failing the whole record.

use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// Treat `null` as the type's default value.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept an id given as a JSON string or integer; `null` becomes empty.
pub fn flexible_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Text(s)) => s,
        Some(RawId::Signed(n)) => n.to_string(),
        Some(RawId::Unsigned(n)) => n.to_string(),
        None => String::new(),
    })
}

/// Accept a number given as a JSON number or a numeric string.
///
/// Unparseable strings and `null` become `None`.
pub fn lenient_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText<N> {
        Number(N),
        Text(String),
    }

    Ok(match Option::<NumberOrText<T>>::deserialize(deserializer)? {
        Some(NumberOrText::Number(n)) => Some(n),
        Some(NumberOrText::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}
