/// Console rendering of station readings (`show` mode).
///
/// Each matching station prints as a block:
///
/// ```text
/// Göteborg - Torshamnen
/// =====================
/// Vattenstånd: -12 cm
/// Medelvind: 7.4 m/s
///
/// ```

use crate::ingest::viva::VivaClient;
use crate::model::{Sample, Station, VivaError};
use crate::stations::filter_stations;
use std::io::Write;

/// Renders one station block, including the trailing blank line.
pub fn format_station(station: &Station, samples: &[Sample]) -> String {
    let mut out = String::new();
    out.push_str(&station.name);
    out.push('\n');
    out.push_str(&"=".repeat(station.name.chars().count()));
    out.push('\n');
    for sample in samples {
        out.push_str(&format!("{}: {} {}\n", sample.name, sample.value, sample.unit));
    }
    out.push('\n');
    out
}

/// Fetches every station matching `patterns` and writes its block to `out`.
///
/// Stations are written as they are fetched, so a failure part way through
/// leaves the earlier blocks in place. The first failure is returned as is.
/// Returns the number of stations printed.
pub fn run_show<S: AsRef<str>, W: Write>(
    client: &VivaClient,
    patterns: &[S],
    out: &mut W,
) -> Result<usize, VivaError> {
    let stations = filter_stations(client.fetch_stations()?, patterns);
    tracing::debug!(matched = stations.len(), "stations selected");

    for station in &stations {
        let samples = client.fetch_samples(station.id)?;
        out.write_all(format_station(station, &samples).as_bytes())?;
    }
    out.flush()?;

    Ok(stations.len())
}
