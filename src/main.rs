//! URL shortener (v1)
//!
//! Serves permanent redirects for a fixed set of paths and hands everything
//! else to a fallback handler.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ───────────────▶ axum Router ──▶ file table ──miss──▶ inline table ──miss──▶ fallback mux
//!                       (trace, id,        │                     │                    │
//!                        timeout)         hit                   hit            any path → works
//!                                          ▼                     ▼
//!                                  308 + Location        308 + Location
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use urlshort::config::{load_config, validation::validate_config, ConfigError, ShortenerConfig};
use urlshort::http::HttpServer;
use urlshort::lifecycle::{build_entry_handler, Shutdown};
use urlshort::observability::init_logging;

#[derive(Parser)]
#[command(name = "urlshort")]
#[command(about = "Redirect request paths to configured URLs", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// YAML or JSON redirect definition (overrides `redirects.file`).
    #[arg(short, long)]
    redirects: Option<PathBuf>,

    /// Bind address (overrides `listener.bind_address`).
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ShortenerConfig::default(),
    };
    if let Some(redirects) = cli.redirects {
        config.redirects.file = Some(redirects);
    }
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    init_logging(&config.observability.log_level)?;

    tracing::info!("urlshort v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let entry = build_entry_handler(&config.redirects)?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, entry);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
