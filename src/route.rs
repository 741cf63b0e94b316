//! Route definitions for the URL shortener API
//!
//! This module maps every HTTP route to its handler and attaches the
//! application state.

use axum::routing::{get, post};
use axum::Router;

use crate::handler::{api_health, redirect_short_code, root, shorten_url, stats};
use crate::repository::AppState;

/// Creates and configures the Axum application router with all routes
///
/// # Route Definitions
///
/// - `GET /` - Service health check
/// - `GET /{code}` - Redirects to the original URL and counts the click
/// - `GET /api/health` - Health check for monitoring
/// - `POST /api/shorten` - Creates a new short code
/// - `GET /api/stats/{code}` - Click statistics for a short code
///
/// # Example Usage
///
/// ```no_run
/// # use std::sync::Arc;
/// # use url_shortener::repository::{AppState, UrlRepository};
/// # use url_shortener::route::create_app;
/// let state = AppState::new(Arc::new(UrlRepository::new()));
/// let app = create_app(state);
/// // axum::serve(listener, app).await.unwrap();
/// ```
pub fn create_app(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(api_health))
        .route("/shorten", post(shorten_url))
        .route("/stats/{code}", get(stats));

    Router::new()
        .route("/", get(root))
        // Public redirect endpoint
        .route("/{code}", get(redirect_short_code))
        .nest("/api", api_routes)
        .with_state(state)
}
