//! HTTP routes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use mystery_animal_shared::{ErrorResponse, TurnRequest, TurnResponse};

use crate::app::App;
use crate::use_cases::turn::TurnError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/turn", post(play_turn))
}

async fn health() -> &'static str {
    "OK"
}

async fn play_turn(
    State(app): State<Arc<App>>,
    Json(request): Json<TurnRequest>,
) -> Result<Json<TurnResponse>, ApiError> {
    let response = app.use_cases.turn.play_turn.execute(request).await?;
    Ok(Json(response))
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Turn failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal error".to_string(),
                )
            }
        };
        let body = ErrorResponse {
            code: code.to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

impl From<TurnError> for ApiError {
    fn from(e: TurnError) -> Self {
        match e {
            TurnError::MissingSessionId => ApiError::BadRequest(e.to_string()),
            TurnError::Domain(_) => ApiError::Internal(e.to_string()),
        }
    }
}
