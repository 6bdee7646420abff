//! Axum router configuration with middleware.

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the router with the WebSocket endpoint and health check.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ws", get(handlers::ws::ws_handler))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "connections": state.connections.len(),
    }))
}
