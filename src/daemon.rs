/// Refresh loop for the metrics exporter
///
/// Polls the ViVa API on a fixed interval and copies the readings of the
/// selected stations into the shared gauges. A failed poll is logged and
/// the next one happens on schedule; the gauges of the station that failed
/// have already been cleared by `StationMetrics::refresh`.

use crate::ingest::viva::VivaClient;
use crate::metrics::{RefreshSummary, StationMetrics};
use crate::model::VivaError;
use chrono::Utc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

pub struct Daemon {
    client: VivaClient,
    metrics: Arc<StationMetrics>,
    patterns: Vec<String>,
    poll_interval: Duration,
}

impl Daemon {
    pub fn new(
        client: VivaClient,
        metrics: Arc<StationMetrics>,
        patterns: Vec<String>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            client,
            metrics,
            patterns,
            poll_interval,
        }
    }

    /// One refresh pass over the selected stations.
    pub fn poll_once(&self) -> Result<RefreshSummary, VivaError> {
        self.metrics.refresh(&self.client, &self.patterns, Utc::now())
    }

    /// Poll immediately, then every `poll_interval`, forever.
    pub fn run(&self) {
        tracing::info!(
            interval_secs = self.poll_interval.as_secs(),
            patterns = ?self.patterns,
            base_url = self.client.base_url(),
            "starting refresh loop"
        );

        loop {
            let started = Instant::now();

            match self.poll_once() {
                Ok(summary) => tracing::info!(
                    stations = summary.stations,
                    gauges_set = summary.gauges_set,
                    gauges_removed = summary.gauges_removed,
                    "refresh complete"
                ),
                Err(e) => tracing::error!(error = %e, "refresh failed"),
            }

            thread::sleep(self.poll_interval.saturating_sub(started.elapsed()));
        }
    }

    /// Run the loop on a background thread.
    pub fn spawn(self) -> thread::JoinHandle<()> {
        thread::spawn(move || self.run())
    }
}

/// Blocks until the refresh thread ends.
///
/// The loop never returns on its own, so any exit is a panic. That is
/// reported as an error so the process stops instead of serving gauges
/// that will never change again.
pub fn wait(refresher: thread::JoinHandle<()>) -> Result<(), VivaError> {
    match refresher.join() {
        Ok(()) => Err(VivaError::Io("refresh loop stopped".to_string())),
        Err(panic) => {
            let reason = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            tracing::error!(%reason, "refresh thread panicked");
            Err(VivaError::Io(format!("refresh thread panicked: {}", reason)))
        }
    }
}
