//! Batch geocoder.
//!
//! Reads one address per line, resolves each against a geocoding endpoint and
//! prints the results as a JSON array in input order.
//!
//! # Architecture Overview
//!
//! ```text
//!   address file ──▶ io::input ──▶ Vec<WorkItem>
//!                                      │
//!                                      ▼
//!                          ┌───────────────────────┐
//!                          │   executor::fan_out   │  semaphore, N slots
//!                          └───────────┬───────────┘
//!                      ┌───────────────┼───────────────┐
//!                      ▼               ▼               ▼
//!               geocoding::client  (one retry loop per address)
//!                      │   resilience::{retries, backoff}
//!                      ▼
//!               geocoding::transport ──▶ HTTP endpoint
//!                                      │
//!                                      ▼
//!   stdout ◀── io::output ◀── Vec<CallResult> (input order)
//! ```

use std::io::{stdin, stdout};
use std::net::SocketAddr;
use std::path::PathBuf;

use batch_geocoder::config::{load_config, GeocoderConfig};
use batch_geocoder::executor::FanOutExecutor;
use batch_geocoder::io::{prompt_for_path, read_addresses, render_json};
use batch_geocoder::observability::{logging, metrics};
use clap::Parser;

#[derive(Parser)]
#[command(name = "batch-geocoder")]
#[command(about = "Resolve a file of addresses into coordinates", long_about = None)]
struct Cli {
    /// File with one address per line (prompted for when omitted)
    input: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Expose Prometheus metrics on the configured address
    #[arg(long)]
    metrics: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GeocoderConfig::default(),
    };
    if cli.metrics {
        config.observability.metrics_enabled = true;
    }

    logging::init(&config.observability.log_level);

    tracing::info!("batch-geocoder v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        endpoint = %config.endpoint.base_url,
        max_concurrency = config.executor.max_concurrency,
        max_attempts = config.retries.max_attempts,
        connect_timeout_secs = config.timeouts.connect_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    // Fails on a malformed endpoint before any address is read.
    let executor = FanOutExecutor::from_config(&config)?;

    let input = match cli.input {
        Some(path) => path,
        None => prompt_for_path(stdin().lock(), stdout())?,
    };
    let items = read_addresses(&input)?;
    tracing::info!(path = %input.display(), addresses = items.len(), "Addresses loaded");

    let results = executor.run(items).await?;
    println!("{}", render_json(&results, cli.pretty)?);

    Ok(())
}
