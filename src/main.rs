//! Linkharvest main entry point
//!
//! Starts the domain submission endpoint and the crawl worker pool, then
//! runs until interrupted.

use clap::Parser;
use linkharvest::config::load_config_with_hash;
use linkharvest::crawler::{Dispatcher, PageFetcher};
use linkharvest::queue::DomainQueue;
use linkharvest::server::{self, AppState};
use linkharvest::storage::{JsonStore, LinkStore};
use linkharvest::{Config, InMemoryQueue};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

/// Linkharvest: a domain-stream link harvester
///
/// Linkharvest accepts batches of domain names over HTTP, crawls each
/// domain's page while respecting robots.txt, and persists the outbound
/// links it discovers grouped by source domain.
#[derive(Parser, Debug)]
#[command(name = "linkharvest")]
#[command(version = "0.1.0")]
#[command(about = "A domain-stream link harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    run(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("linkharvest=info,warn"),
            1 => EnvFilter::new("linkharvest=debug,info"),
            2 => EnvFilter::new("linkharvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Wires the components together and runs until interrupted
///
/// Startup resource acquisition (HTTP client construction, listener bind)
/// is fatal on failure; once running, per-item crawl errors never bring
/// the process down.
async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let queue = Arc::new(InMemoryQueue::new(config.queue.capacity));
    let store: Arc<dyn LinkStore> = Arc::new(JsonStore::new(&config.output.store_path));
    let fetcher = Arc::new(PageFetcher::new(&config.crawler)?);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let dispatcher = Dispatcher::new(
        queue.clone() as Arc<dyn DomainQueue>,
        fetcher,
        store,
        config.crawler.workers,
    );
    let dispatcher_handle = tokio::spawn(dispatcher.run(shutdown_rx.clone()));

    let app = server::router(AppState {
        queue: queue.clone() as Arc<dyn DomainQueue>,
    });
    let listener = TcpListener::bind(("0.0.0.0", config.server.port)).await?;
    tracing::info!(
        "Submission endpoint listening on port {}",
        config.server.port
    );

    let mut server_shutdown = shutdown_rx.clone();
    let server_handle = tokio::spawn(async move {
        let result = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = server_shutdown.changed().await;
            })
            .await;
        if let Err(e) = result {
            tracing::error!("Submission endpoint error: {}", e);
        }
    });

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received, draining workers");

    let _ = shutdown_tx.send(true);
    queue.close();

    dispatcher_handle.await?;
    server_handle.await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
