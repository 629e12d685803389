// Serde helpers for values that may arrive as strings

use serde::{Deserialize, Deserializer, de::Error};
use std::fmt::Display;
use std::str::FromStr;

/// Deserialize a number given either natively or as a string.
///
/// Environment variables are always strings, so numeric settings loaded
/// from the environment need this.
///
/// ```
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Settings {
///     #[serde(deserialize_with = "beacon_config::de::number_or_string")]
///     timeout_secs: u64,
/// }
///
/// let a: Settings = serde_json::from_str(r#"{"timeout_secs": 5}"#).unwrap();
/// let b: Settings = serde_json::from_str(r#"{"timeout_secs": "5"}"#).unwrap();
/// assert_eq!(a.timeout_secs, b.timeout_secs);
/// ```
pub fn number_or_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Deserialize<'de>,
    T::Err: Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<T> {
        Number(T),
        Text(String),
    }

    match Raw::<T>::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text.trim().parse().map_err(D::Error::custom),
    }
}
