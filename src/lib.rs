/// viva_monitor: ViVa sea-level station reader and Prometheus exporter.
///
/// # Module structure
///
/// ```text
/// viva_monitor
/// ├── model     — shared data types (Station, Sample, VivaError)
/// ├── config    — service configuration loader (viva.toml + env)
/// ├── stations  — case-insensitive station name matching
/// ├── report    — console rendering for `show`
/// ├── metrics   — gauge vector export for `serve`
/// ├── daemon    — refresh loop (poll, record, sleep)
/// ├── endpoint  — /metrics and /health HTTP server
/// └── ingest
///     ├── viva  — ViVa station API: URL construction, JSON parsing, client
///     └── fixtures (test only) — representative API response payloads
/// ```

/// Public modules
pub mod config;
pub mod daemon;
pub mod endpoint;
pub mod ingest;
pub mod metrics;
pub mod model;
pub mod report;
pub mod stations;
