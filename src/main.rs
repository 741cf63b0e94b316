//! Application entry point and server initialization
//!
//! This module contains the main function that:
//! - Loads environment configuration
//! - Builds the in-memory repository
//! - Starts the HTTP server with graceful shutdown support

use std::sync::Arc;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use url_shortener::config::{Config, DEFAULT_LOG_FILTER};
use url_shortener::repository::{AppState, UrlRepository};
use url_shortener::route::create_app;

/// Application entry point
///
/// 1. Loads environment variables from `.env` if present
/// 2. Initializes logging (`RUST_LOG` overrides the default filter)
/// 3. Reads configuration and builds the repository
/// 4. Serves until SIGINT/SIGTERM, then drops all state
///
/// Records are held in memory only and are gone once the process exits.
#[tokio::main]
async fn main() {
    // Load environment variables from .env file if it exists
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Config::from_env();

    let mut state = AppState::new(Arc::new(UrlRepository::new()));
    if let Some(base_url) = &config.base_url {
        state = state.with_base_url(base_url.clone());
    }

    let app = create_app(state).layer(TraceLayer::new_for_http());

    let addr = config.bind_addr();
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(%addr, %err, "failed to bind listener");
            std::process::exit(1);
        }
    };

    info!("🚀 Server running at http://{}", addr);
    if let Some(base_url) = &config.base_url {
        info!("🔗 Short links use base URL {}", base_url);
    }

    // Start the server with graceful shutdown support
    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(%err, "server error");
        std::process::exit(1);
    }

    info!("Server stopped, in-memory records discarded.");
}

/// Resolves when the process receives SIGINT (Ctrl+C) or, on Unix, SIGTERM
///
/// Returning lets axum stop accepting connections and finish in-flight
/// requests before `main` returns and the repository is dropped.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(%err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!(%err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    // On non-Unix systems (Windows), only handle Ctrl+C
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Shutdown signal received, stopping server.");
}
