//! Axum router construction for the Observer API.
//!
//! Assembles all routes into a single [`Router`] with CORS middleware
//! enabled for cross-origin map clients.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the Observer server.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /api/map` -- annotated department boundaries
/// - `GET /api/lines` -- high-speed line overlay
/// - `GET /api/summary` -- population by coverage category
/// - `GET /api/regions` -- departments by population
/// - `GET /api/regions/{code}` -- single department
/// - `GET /api/coverage` -- stored coverage flags
/// - `PUT /api/coverage` -- submit coverage edits
///
/// CORS is configured to allow any origin.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // Map layers
        .route("/api/map", get(handlers::get_map))
        .route("/api/lines", get(handlers::get_lines))
        // Statistics
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/regions", get(handlers::list_regions))
        .route("/api/regions/{code}", get(handlers::get_region))
        // Editing
        .route(
            "/api/coverage",
            get(handlers::get_coverage).put(handlers::put_coverage),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
