use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use validator::ValidationErrors;

/// Errors surfaced by the HTTP layer
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Malformed request body: {0}")]
    MalformedBody(#[from] JsonRejection),
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("Persistence failure: {0:#}")]
    Persistence(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedBody(rejection) => rejection.status(),
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            ApiError::MalformedBody(rejection) => json!({
                "error": rejection.body_text()
            }),
            ApiError::Validation(errors) => json!({
                "error": "Validation failed",
                "details": errors
            }),
            ApiError::Persistence(e) => {
                tracing::error!("Request failed in the persistence layer: {:#}", e);
                json!({
                    "error": "Internal server error"
                })
            }
        };

        (status, Json(body)).into_response()
    }
}
