//! perfwatch gateway
//!
//! - Graphs page: GET/POST <graphs_path>?graphName=...&refreshRate=...
//! - Collectors from config register themselves at startup and are torn
//!   down on shutdown
//! - The graphs endpoint times itself through the collecting backend

use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};

use perfwatch_gateway::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "perfwatch.yaml".into());
    let cfg = config::load_from_file(&path).expect("config load failed");
    let listen: SocketAddr = cfg
        .server
        .listen
        .parse()
        .expect("server.listen must be a valid SocketAddr");

    let state = app_state::AppState::new(cfg).expect("app state init failed");
    let app = router::build_router(state.clone());

    tracing::info!(
        %listen,
        channel = state.backend().inner().channel(),
        collectors = state.collectors().len(),
        "perfwatch-gateway starting"
    );
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state.clone()))
        .await
        .expect("server failed");

    tracing::info!("perfwatch-gateway stopped");
}

async fn shutdown_signal(state: app_state::AppState) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down gracefully");
    state.shutdown();
}
