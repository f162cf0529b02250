//! Health check endpoint
//!
//! Liveness only: never touches storage, so it answers even when the
//! database is down.

use axum::{routing::get, Router};

/// GET /health
async fn health() -> &'static str {
    "OK"
}

/// Health routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}
