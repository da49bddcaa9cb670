//! REST API routes configuration

use crate::api::handlers::{self, ApiState};
use crate::api::websocket::ws_handler;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

/// Create the API router with all routes
pub fn create_router(state: ApiState) -> Router {
    // Configure CORS for browser access
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // WebSocket for committed events
        .route("/ws", get(ws_handler))
        // Ledger
        .route("/api/token", get(handlers::get_token))
        .route("/api/balances/{address}", get(handlers::get_balance))
        .route(
            "/api/allowances/{owner}/{spender}",
            get(handlers::get_allowance),
        )
        // Registry
        .route("/api/operators", get(handlers::list_operators))
        .route("/api/operators/{index}", get(handlers::get_operator))
        .route(
            "/api/operators/check/{address}",
            get(handlers::check_operator),
        )
        // Events and calls
        .route("/api/events", get(handlers::list_events))
        .route("/api/calls", post(handlers::execute_call))
        .with_state(state)
        .layer(cors)
}
