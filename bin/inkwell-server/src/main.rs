//! Inkwell - markdown posts over HTTP
//!
//! This binary serves the post pages over the storage backend chosen in
//! the configuration.

mod settings;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use clap::Parser;
use inkwell_common::config::{LogFormat, StorageBackend};
use settings::Overrides;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Largest accepted request body; content is capped far below this by validation
const MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Parser, Debug)]
#[command(name = "inkwell-server")]
#[command(about = "Inkwell markdown post server")]
#[command(version)]
struct Args {
    /// Configuration file path (TOML)
    #[arg(short, long, env = "INKWELL_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address
    #[arg(short, long)]
    listen: Option<SocketAddr>,

    /// Storage backend: memory, files or redb
    #[arg(long)]
    backend: Option<StorageBackend>,

    /// Directory for post files or the redb database
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = settings::load(
        args.config.as_deref(),
        Overrides {
            listen: args.listen,
            backend: args.backend,
            data_dir: args.data_dir,
            log_level: args.log_level,
        },
    )?;

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    match config.log_format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }

    info!("Starting Inkwell");
    if config.storage.backend == StorageBackend::Memory {
        warn!("Using the in-memory backend; posts are lost on shutdown");
    }

    let store = inkwell_store::open_store(&config.storage)?;

    let app = inkwell_web::router(store)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http());

    info!("Listening on http://{}", config.listen);
    let listener = TcpListener::bind(config.listen).await?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutting down...");
        })
        .await?;

    info!("Server shut down gracefully");

    Ok(())
}
