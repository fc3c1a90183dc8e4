//! # API Module
//!
//! HTTP handlers for the counter relay.
//!
//! ## Available Endpoints
//!
//! - `GET /` - Liveness message
//! - `GET /health` - Health check
//! - `GET /get-count` - Read and decode the contract counter
//! - `POST /chat` - Turn free text into a contract command

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

pub mod chat;
pub mod counter;
pub mod health;

/// Builds the application router with tracing and permissive CORS.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/get-count", get(counter::get_count_handler))
        .route("/chat", post(chat::chat_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
