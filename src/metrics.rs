/// Prometheus export of station samples (`serve` mode).
///
/// All readings land in one gauge vector:
///
/// ```text
/// viva_station_metrics{station="Göteborg - Torshamnen",name="Vattenstånd"} -12
/// viva_station_metrics{station="Göteborg - Torshamnen",name="Updated"} 1714564800
/// ```
///
/// Gauges live for the lifetime of the process and are overwritten in
/// place on every refresh. A reading that stops being numeric has its
/// gauge removed rather than left at the last good value, and a station
/// whose fetch fails loses all of its gauges.

use crate::ingest::viva::VivaClient;
use crate::model::{Sample, Station, VivaError};
use crate::stations::filter_stations;
use chrono::{DateTime, Utc};
use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};
use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

pub const NAMESPACE: &str = "viva";
pub const METRIC_NAME: &str = "station_metrics";
pub const LABEL_STATION: &str = "station";
pub const LABEL_NAME: &str = "name";

/// Sample name of the per-station refresh timestamp gauge.
pub const UPDATED_SAMPLE: &str = "Updated";

/// Parses a published sample value. `None` for anything non-numeric.
pub fn parse_sample_value(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}

/// Outcome of one refresh pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RefreshSummary {
    pub stations: usize,
    pub gauges_set: usize,
    pub gauges_removed: usize,
}

/// The gauge vector, its registry, and the label sets currently exported.
///
/// The label bookkeeping backs `clear_station`, which removes every gauge
/// for a station regardless of sample name.
pub struct StationMetrics {
    registry: Registry,
    gauges: GaugeVec,
    exported: Mutex<HashMap<String, BTreeSet<String>>>,
}

impl StationMetrics {
    pub fn new() -> Result<Self, VivaError> {
        let opts = Opts::new(METRIC_NAME, "Latest sample values reported by ViVa stations")
            .namespace(NAMESPACE);
        let gauges = GaugeVec::new(opts, &[LABEL_STATION, LABEL_NAME])
            .map_err(|e| VivaError::Config(format!("metrics definition: {}", e)))?;

        let registry = Registry::new();
        registry
            .register(Box::new(gauges.clone()))
            .map_err(|e| VivaError::Config(format!("metrics registration: {}", e)))?;

        Ok(Self {
            registry,
            gauges,
            exported: Mutex::new(HashMap::new()),
        })
    }

    /// Copies one station's samples into gauges and stamps it "Updated".
    pub fn record(
        &self,
        station: &Station,
        samples: &[Sample],
        now: DateTime<Utc>,
    ) -> RefreshSummary {
        let mut summary = RefreshSummary {
            stations: 1,
            ..RefreshSummary::default()
        };

        for sample in samples {
            match parse_sample_value(&sample.value) {
                Some(v) => {
                    self.set(&station.name, &sample.name, v);
                    summary.gauges_set += 1;
                }
                None => {
                    tracing::debug!(
                        station = %station.name,
                        sample = %sample.name,
                        value = %sample.value,
                        "non-numeric sample value"
                    );
                    if self.remove(&station.name, &sample.name) {
                        summary.gauges_removed += 1;
                    }
                }
            }
        }

        self.set(&station.name, UPDATED_SAMPLE, now.timestamp() as f64);
        summary.gauges_set += 1;
        summary
    }

    /// Removes every gauge labelled with this station. Returns how many.
    pub fn clear_station(&self, station: &str) -> usize {
        let names = self.lock().remove(station).unwrap_or_default();
        for name in &names {
            // Absent label sets are already gone; nothing to undo.
            let _ = self.gauges.remove_label_values(&[station, name.as_str()]);
        }
        names.len()
    }

    /// Fetches every station matching `patterns` and records its samples.
    ///
    /// On the first fetch or decode failure for a station, that station's
    /// gauges are cleared and the error is returned; later stations are
    /// not visited.
    pub fn refresh<S: AsRef<str>>(
        &self,
        client: &VivaClient,
        patterns: &[S],
        now: DateTime<Utc>,
    ) -> Result<RefreshSummary, VivaError> {
        let stations = filter_stations(client.fetch_stations()?, patterns);
        let mut total = RefreshSummary::default();

        for station in &stations {
            let samples = match client.fetch_samples(station.id) {
                Ok(samples) => samples,
                Err(e) => {
                    let cleared = self.clear_station(&station.name);
                    tracing::warn!(
                        station = %station.name,
                        cleared,
                        "clearing gauges after failed fetch"
                    );
                    return Err(e);
                }
            };

            let summary = self.record(station, &samples, now);
            total.stations += summary.stations;
            total.gauges_set += summary.gauges_set;
            total.gauges_removed += summary.gauges_removed;
        }

        Ok(total)
    }

    /// Current value of one gauge, if it is exported.
    pub fn gauge(&self, station: &str, name: &str) -> Option<f64> {
        let exported = self.lock().get(station)?.contains(name);
        if !exported {
            return None;
        }
        self.gauges
            .get_metric_with_label_values(&[station, name])
            .ok()
            .map(|g| g.get())
    }

    /// Number of stations with at least one exported gauge.
    pub fn station_count(&self) -> usize {
        self.lock().len()
    }

    /// Prometheus text exposition of the registry.
    pub fn render(&self) -> Result<String, VivaError> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder
            .encode(&self.registry.gather(), &mut buffer)
            .map_err(|e| VivaError::Io(format!("metrics encoding: {}", e)))?;
        String::from_utf8(buffer).map_err(|e| VivaError::Io(format!("metrics encoding: {}", e)))
    }

    pub fn content_type(&self) -> String {
        TextEncoder::new().format_type().to_string()
    }

    fn set(&self, station: &str, name: &str, value: f64) {
        self.gauges.with_label_values(&[station, name]).set(value);
        self.lock()
            .entry(station.to_string())
            .or_default()
            .insert(name.to_string());
    }

    fn remove(&self, station: &str, name: &str) -> bool {
        let mut exported = self.lock();
        let Some(names) = exported.get_mut(station) else {
            return false;
        };
        if !names.remove(name) {
            return false;
        }
        if names.is_empty() {
            exported.remove(station);
        }
        self.gauges.remove_label_values(&[station, name]).is_ok()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, BTreeSet<String>>> {
        self.exported.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
