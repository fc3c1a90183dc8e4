// src/api/counter.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::{error, info};

use crate::{blockchain::models::CountResponse, AppState};

// The handler function for the GET /get-count endpoint.
pub async fn get_count_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.stacks_client.read_count().await {
        Ok(outcome) => {
            info!(
                count = %outcome.count,
                encoding = %outcome.encoding,
                "Counter read"
            );
            (StatusCode::OK, Json(CountResponse::from(outcome))).into_response()
        }
        Err(e) => {
            error!("Failed to read counter: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
