// src/api/chat.rs

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::{debug, error};
use validator::Validate;

use crate::{
    assistant::{command, Command},
    AppState,
};

#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub message: String,
}

/// Interprets a user command with the chat model and replies with JSON.
pub async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> impl IntoResponse {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            error!("Rejected chat request body: {}", rejection);
            return (
                rejection.status(),
                Json(Command::none(format!("Error: {}", rejection.body_text()))),
            )
                .into_response();
        }
    };

    if req.validate().is_err() {
        return (
            StatusCode::BAD_REQUEST,
            Json(Command::none("No message was sent.")),
        )
            .into_response();
    }

    match state.chat_client.complete(&req.message).await {
        Ok(response) => {
            let reply = command::shape_reply(&req.message, &response);
            debug!(reply = %reply, "Chat reply");
            (StatusCode::OK, Json(reply)).into_response()
        }
        Err(e) => {
            error!("Chat relay failed: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(Command::none(format!("Error: {}", e))),
            )
                .into_response()
        }
    }
}
