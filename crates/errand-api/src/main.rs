//! Errand Stack API server — standalone entry point.
//!
//! Serves the errand lifecycle API over HTTP. Storage is selected at
//! startup: set `ERRAND_STORE` to a JSON snapshot path for file-backed
//! persistence, otherwise records live in memory and are lost on restart.

use std::net::SocketAddr;
use std::sync::Arc;

use errand_api::state::AppState;
use errand_store::JsonFileStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port: u16 = std::env::var("ERRAND_API_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);

    let state = match std::env::var("ERRAND_STORE") {
        Ok(path) => {
            tracing::info!(%path, "using JSON file store");
            AppState::new(Arc::new(JsonFileStore::open(path)))
        }
        Err(_) => AppState::in_memory(),
    };
    let app = errand_api::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("errand-api listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");
    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}
