//! Axum router wiring.
//!
//! Exposes the graphs page at the configured path plus the ops endpoints.

use axum::{routing::get, Router};

use crate::{app_state::AppState, graphs, ops};

pub fn build_router(state: AppState) -> Router {
    let graphs_path = state.cfg().server.graphs_path.clone();
    Router::new()
        .route(
            &graphs_path,
            get(graphs::handler::graphs_get).post(graphs::handler::graphs_post),
        )
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .with_state(state)
}
