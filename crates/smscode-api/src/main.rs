//! smscode entry point.
//!
//! Binary name: `smscode`
//!
//! Loads the configuration, checks that the message store is readable, then
//! serves the codes page until Ctrl+C or SIGTERM.

mod cli;
mod http;
mod state;

use anyhow::Context;
use clap::Parser;

use smscode_core::service::listing::ListingService;
use smscode_infra::config::{load_app_config, resolve_store_path};
use smscode_infra::sqlite::store::SqliteMessageStore;
use smscode_observe::tracing_setup::{TracingOptions, init_tracing, shutdown_tracing};
use smscode_types::error::ConfigError;

use cli::Cli;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&TracingOptions {
        default_filter: cli.log_filter().to_string(),
        enable_otel: cli.otel,
        json: cli.json_logs,
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    if let Err(err) = &result {
        tracing::error!(error = %format!("{err:#}"), "smscode stopped");
    }

    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.ok_or(ConfigError::NotSpecified)?;
    let mut config = load_app_config(&config_path).await?;
    if let Some(port) = cli.port {
        config.port = port;
    }

    let store_path = resolve_store_path(&config)?;
    tracing::info!(path = %store_path.display(), "Using message store");

    // An unreadable store is fatal at startup.
    let listing = ListingService::new(SqliteMessageStore::open(&store_path));
    let preload = listing
        .preload(config.debug)
        .await
        .context("cannot load messages")?;
    tracing::info!(
        scanned = preload.scanned,
        reported = preload.reported,
        "Message store is readable"
    );

    let state = AppState::new(&config, listing);
    let router = http::router::build_router(state);

    let addr = format!("{}:{}", cli.host, config.effective_port());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("cannot listen on {addr}"))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        users = config.users.len(),
        "smscode listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
