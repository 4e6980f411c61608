//! Gateway status service.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                STATUS GATEWAY                │
//!                        │                                              │
//!   GET /status          │  ┌────────┐    ┌──────────┐    ┌───────────┐ │
//!   ─────────────────────┼─▶│  http  │───▶│ snapshot │───▶│aggregator │ │
//!                        │  │ server │    │  cache   │    └─────┬─────┘ │
//!   ◀────────────────────┼──│        │◀───│          │          │       │
//!    200 / 503 + JSON    │  └────────┘    └──────────┘    ┌─────┴─────┐ │
//!                        │                                │   node    │ │
//!   GET /whoami          │                                │ directory │ │
//!   ─────────────────────┼─▶ echo caller                  └───────────┘ │
//!                        │                                ┌───────────┐ │     Media
//!                        │                                │  probes   │─┼──▶  servers
//!                        │                                └───────────┘ │
//!                        └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use gateway_status::config::{load_config, GatewayConfig};
use gateway_status::lifecycle::{signals, Shutdown};
use gateway_status::observability::{logging, metrics};
use gateway_status::HttpServer;

#[derive(Parser)]
#[command(name = "gateway-status")]
#[command(about = "Aggregated health status for the gateway", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    logging::init_logging(&config.observability);

    tracing::info!("gateway-status v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        nodes = config.nodes.len(),
        media_servers = config.status.media_servers.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(&shutdown);

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
