//! ViVa station monitor
//!
//! Looks up ViVa stations whose names contain any of the given patterns
//! (case-insensitive) and either:
//! 1. Prints their latest readings to stdout (`show`), or
//! 2. Exports them as Prometheus gauges on /metrics (`serve`)
//!
//! Usage:
//!   cargo run --release -- show göteborg malmö
//!   cargo run --release -- serve --listen 0.0.0.0:9798 göteborg
//!
//! Environment:
//!   RUST_LOG      - log filter (default: info)
//!   VIVA_BASE_URL - override the ViVa API base URL
//!   VIVA_LISTEN   - override the /metrics listen address

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use tracing_subscriber::EnvFilter;
use viva_monitor::config::{self, ServiceConfig};
use viva_monitor::daemon::{self, Daemon};
use viva_monitor::endpoint;
use viva_monitor::ingest::viva::VivaClient;
use viva_monitor::metrics::StationMetrics;
use viva_monitor::model::VivaError;
use viva_monitor::report;

#[derive(Debug, Parser)]
#[command(version, about = "Read and export ViVa sea-level station samples")]
struct Cli {
    /// Configuration file; defaults apply when it does not exist
    #[arg(long, global = true, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the latest samples of every matching station
    Show {
        /// Station name fragments, matched case-insensitively
        patterns: Vec<String>,
    },
    /// Export matching stations as gauges on /metrics
    Serve {
        /// Listen address for the metrics endpoint
        #[arg(long)]
        listen: Option<String>,

        /// Seconds between refreshes
        #[arg(long)]
        interval: Option<u64>,

        /// Station name fragments, matched case-insensitively
        patterns: Vec<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), VivaError> {
    let mut config = config::load_config(&cli.config)?;

    match cli.command {
        Command::Show { patterns } => {
            let patterns = choose_patterns(patterns, &config)?;
            let client = client_for(&config)?;
            let stdout = std::io::stdout();
            let count = report::run_show(&client, &patterns, &mut stdout.lock())?;
            if count == 0 {
                tracing::warn!(?patterns, "no station matched");
            }
            Ok(())
        }
        Command::Serve {
            listen,
            interval,
            patterns,
        } => {
            if let Some(listen) = listen {
                config.listen = listen;
            }
            if let Some(secs) = interval {
                if secs == 0 {
                    return Err(VivaError::Config("--interval must be at least 1".to_string()));
                }
                config.poll_interval_secs = secs;
            }
            let patterns = choose_patterns(patterns, &config)?;
            serve(config, patterns)
        }
    }
}

fn serve(config: ServiceConfig, patterns: Vec<String>) -> Result<(), VivaError> {
    let metrics = Arc::new(StationMetrics::new()?);
    let server = endpoint::bind(&config.listen)?;

    let daemon = Daemon::new(
        client_for(&config)?,
        Arc::clone(&metrics),
        patterns,
        config.poll_interval(),
    );
    let refresher = daemon.spawn();

    tracing::info!(listen = %config.listen, "metrics endpoint listening");
    let scraped = Arc::clone(&metrics);
    thread::spawn(move || endpoint::serve(&server, &scraped));

    daemon::wait(refresher)
}

fn client_for(config: &ServiceConfig) -> Result<VivaClient, VivaError> {
    VivaClient::with_base_url(&config.base_url, config.request_timeout())
}

/// Command line patterns win over configured ones; one source must have some.
fn choose_patterns(cli: Vec<String>, config: &ServiceConfig) -> Result<Vec<String>, VivaError> {
    let patterns = if cli.is_empty() { config.patterns.clone() } else { cli };
    if patterns.is_empty() {
        return Err(VivaError::Config(
            "no station patterns given on the command line or in the config file".to_string(),
        ));
    }
    Ok(patterns)
}
