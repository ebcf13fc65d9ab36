//! envgate — environment-namespace gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!                     │                   ENVGATE                     │
//!                     │                                               │
//!   Client Request    │  ┌─────────┐    ┌──────────────┐             │
//!   ──────────────────┼─▶│  http   │───▶│   routing    │             │
//!                     │  │ server  │    │    table     │             │
//!                     │  └─────────┘    └──────┬───────┘             │
//!                     │                        │                     │
//!                     │        ┌───────────────┼───────────────┐     │
//!                     │        ▼               ▼               ▼     │
//!   Client Response   │  ┌──────────┐   ┌────────────┐  ┌─────────┐ │
//!   ◀─────────────────┼──│  views   │   │  302 strip │  │  fixed  │ │
//!                     │  │ (render) │   │  redirect  │  │ response│ │
//!                     │  └──────────┘   └────────────┘  └─────────┘ │
//!                     │                                               │
//!                     │  ┌─────────────────────────────────────────┐ │
//!                     │  │          Cross-Cutting Concerns          │ │
//!                     │  │  ┌────────┐ ┌───────────┐ ┌───────────┐ │ │
//!                     │  │  │ config │ │ observa-  │ │ lifecycle │ │ │
//!                     │  │  │ reload │ │ bility    │ │ shutdown  │ │ │
//!                     │  │  └────────┘ └───────────┘ └───────────┘ │ │
//!                     │  └─────────────────────────────────────────┘ │
//!                     └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use envgate::config::{load_config, ConfigWatcher, GatewayConfig};
use envgate::http::HttpServer;
use envgate::lifecycle::{signals, Shutdown};
use envgate::observability::{logging, metrics};

/// Environment-namespace gateway: welcome pages, prefix-strip redirects and
/// a health endpoint.
#[derive(Debug, Parser)]
#[command(name = "envgate", version)]
struct Cli {
    /// Path to the TOML configuration file. Built-in defaults (the
    /// production route table) apply when omitted.
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

    logging::init_logging(&config.observability.log_level);

    tracing::info!("envgate v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        rules = config.routes.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Hot reload only makes sense with a config file to watch. The watcher
    // handle must outlive the server.
    let (config_updates, _watcher) = match &cli.config {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            let handle = watcher.run()?;
            (updates, Some(handle))
        }
        None => {
            let (_tx, updates) = mpsc::unbounded_channel();
            (updates, None)
        }
    };

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(signals::shutdown_on_signal(shutdown));

    let server = HttpServer::new(config)?;
    server.run(listener, config_updates, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
