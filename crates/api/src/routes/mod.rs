pub mod health;
pub mod optimizations;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /optimizations                        list, create (GET, POST)
/// /optimizations/solve                  enqueue a solve (POST)
/// /optimizations/{id}                   get, update, delete
/// /optimizations/{id}/status            lifecycle status (GET)
/// /optimizations/{id}/reset-status      force back to Pending (POST)
/// /optimizations/{id}/assignments       persisted solve result (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Tour schedule optimization jobs and their async solve lifecycle.
        .nest("/optimizations", optimizations::router())
}
