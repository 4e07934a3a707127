//! Route definitions for the `/optimizations` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::optimizations;
use crate::state::AppState;

/// Routes mounted at `/optimizations`.
///
/// ```text
/// GET    /                     -> list_optimizations
/// POST   /                     -> create_optimization
/// POST   /solve                -> solve_optimization
/// GET    /{id}                 -> get_optimization
/// PUT    /{id}                 -> update_optimization
/// DELETE /{id}                 -> delete_optimization
/// GET    /{id}/status          -> get_status
/// POST   /{id}/reset-status    -> reset_status
/// GET    /{id}/assignments     -> list_assignments
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(optimizations::list_optimizations).post(optimizations::create_optimization),
        )
        .route("/solve", post(optimizations::solve_optimization))
        .route(
            "/{id}",
            get(optimizations::get_optimization)
                .put(optimizations::update_optimization)
                .delete(optimizations::delete_optimization),
        )
        .route("/{id}/status", get(optimizations::get_status))
        .route("/{id}/reset-status", post(optimizations::reset_status))
        .route("/{id}/assignments", get(optimizations::list_assignments))
}
