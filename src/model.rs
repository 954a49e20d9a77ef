/// Shared data types for the ViVa monitoring service.
///
/// `Station` and `Sample` mirror the records published by the ViVa
/// station API. Both are transient: decoded fresh on every request and
/// dropped once printed or copied into gauge values.

use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Reads a JSON `null` as the type's default value.
///
/// The API sends `null` for fields it has nothing to say about. Paired with
/// `#[serde(default)]`, a field may be absent, `null`, or set.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A named monitoring location.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Station {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Lat", default, deserialize_with = "null_as_default")]
    pub latitude: f64,
    #[serde(rename = "Lon", default, deserialize_with = "null_as_default")]
    pub longitude: f64,
    #[serde(rename = "Name", default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// A single sensor reading tied to a station.
///
/// `value` is kept as the published text. Numeric conversion happens at
/// the metrics boundary, where non-numeric readings (e.g. "-") matter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Sample {
    #[serde(rename = "StationID", default, deserialize_with = "null_as_default")]
    pub station_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quality: String,
    /// Timestamp as published by the API, e.g. "2024-05-01 12:00:00".
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub trend: String,

    // Wind and water level metadata; present on some sensor types only
    #[serde(default, deserialize_with = "null_as_default")]
    pub calm: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub heading: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub msg: String,
    #[serde(rename = "Type", default, deserialize_with = "null_as_default")]
    pub sample_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub water_level_offset: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub water_level_reference: String,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure talking to or decoding the ViVa API.
#[derive(Debug)]
pub enum VivaError {
    /// Transport failure or non-success HTTP status
    Http(String),
    /// Response body was not the expected JSON envelope
    Decode(String),
    /// Configuration file or environment could not be used
    Config(String),
    /// Writing console output or serving the endpoint failed
    Io(String),
}

impl std::fmt::Display for VivaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VivaError::Http(msg) => write!(f, "ViVa API request failed: {}", msg),
            VivaError::Decode(msg) => write!(f, "ViVa API response could not be decoded: {}", msg),
            VivaError::Config(msg) => write!(f, "Invalid configuration: {}", msg),
            VivaError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for VivaError {}

impl From<reqwest::Error> for VivaError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            VivaError::Decode(e.to_string())
        } else {
            VivaError::Http(e.to_string())
        }
    }
}

impl From<serde_json::Error> for VivaError {
    fn from(e: serde_json::Error) -> Self {
        VivaError::Decode(e.to_string())
    }
}

impl From<std::io::Error> for VivaError {
    fn from(e: std::io::Error) -> Self {
        VivaError::Io(e.to_string())
    }
}
