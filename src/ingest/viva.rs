/// ViVa station API client.
///
/// Handles URL construction and JSON response parsing for the Swedish
/// Maritime Administration's ViVa output service:
///   https://services.viva.sjofartsverket.se:8080/output/vivaoutputservice.svc/vivastation/
///
/// The bare endpoint lists every station; appending a station ID returns
/// that station's latest samples. See `fixtures.rs` for annotated examples
/// of both response shapes.

use crate::model::{null_as_default, Sample, Station, VivaError};
use serde::Deserialize;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Serde envelopes
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct StationsResponse {
    #[serde(rename = "GetStationsResult")]
    result: StationsResult,
}

#[derive(Deserialize)]
struct StationsResult {
    #[serde(rename = "Stations", default, deserialize_with = "null_as_default")]
    stations: Vec<Station>,
}

#[derive(Deserialize)]
struct SamplesResponse {
    #[serde(rename = "GetSingleStationResult")]
    result: SamplesResult,
}

#[derive(Deserialize)]
struct SamplesResult {
    #[serde(rename = "Samples", default, deserialize_with = "null_as_default")]
    samples: Vec<Sample>,
}

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

pub const DEFAULT_BASE_URL: &str =
    "https://services.viva.sjofartsverket.se:8080/output/vivaoutputservice.svc/vivastation/";

/// Default per-request timeout for the blocking client.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// URL of the station list. The listing lives at the base URL itself.
pub fn stations_url(base_url: &str) -> String {
    with_trailing_slash(base_url)
}

/// URL of a single station's samples: the base URL with the ID appended.
pub fn station_url(base_url: &str, station_id: i64) -> String {
    format!("{}{}", with_trailing_slash(base_url), station_id)
}

fn with_trailing_slash(base_url: &str) -> String {
    if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{}/", base_url)
    }
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Parses the station list envelope (`GetStationsResult.Stations`).
pub fn parse_stations_response(json: &str) -> Result<Vec<Station>, VivaError> {
    let response: StationsResponse = serde_json::from_str(json)
        .map_err(|e| VivaError::Decode(format!("station list: {}", e)))?;
    Ok(response.result.stations)
}

/// Parses a single-station envelope (`GetSingleStationResult.Samples`).
///
/// An empty sample list is not an error; the station simply has nothing
/// to report right now.
pub fn parse_samples_response(json: &str) -> Result<Vec<Sample>, VivaError> {
    let response: SamplesResponse = serde_json::from_str(json)
        .map_err(|e| VivaError::Decode(format!("station samples: {}", e)))?;
    Ok(response.result.samples)
}

// ---------------------------------------------------------------------------
// API client
// ---------------------------------------------------------------------------

/// Blocking client bound to one ViVa base URL.
pub struct VivaClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl VivaClient {
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, VivaError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VivaError::Http(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the full station list.
    pub fn fetch_stations(&self) -> Result<Vec<Station>, VivaError> {
        let body = self.get(&stations_url(&self.base_url))?;
        parse_stations_response(&body)
    }

    /// Fetch the latest samples for one station.
    pub fn fetch_samples(&self, station_id: i64) -> Result<Vec<Sample>, VivaError> {
        let body = self.get(&station_url(&self.base_url, station_id))?;
        parse_samples_response(&body)
    }

    fn get(&self, url: &str) -> Result<String, VivaError> {
        tracing::debug!(url, "fetching");

        let response = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .send()?;

        if !response.status().is_success() {
            return Err(VivaError::Http(format!("{} returned {}", url, response.status())));
        }

        Ok(response.text()?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
