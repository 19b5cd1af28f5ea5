//! HTTP request handlers

use super::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Search request body
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Search query
    #[serde(default)]
    pub query: Option<String>,
}

/// Successful answer payload
#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub answer: String,
}

/// Error payload for client errors and cascade exhaustion
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Search handler: validates the query, then runs the cascade
pub async fn search(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Response {
    // Client errors are rejected before any provider is contacted
    let Ok(Json(request)) = payload else {
        return error_response(StatusCode::BAD_REQUEST, "invalid request body");
    };

    let query = request.query.unwrap_or_default();
    if query.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "query is required");
    }

    match state.resolver.resolve(&query).await {
        Ok(answer) => (StatusCode::OK, Json(AnswerResponse { answer })).into_response(),
        Err(err) => {
            tracing::error!("cascade exhausted: {err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    }
}

/// Preflight probe handler; answered before any provider is contacted
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}
