use std::sync::Arc;

use rosterd_engine::queue::JobQueue;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: rosterd_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Optimization job queue (in-process by default; any [`JobQueue`] works).
    pub queue: Arc<dyn JobQueue>,
}
