use axum::{ http::StatusCode, response::{ IntoResponse, Response } };
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("unknown widget '{0}'")]
    UnknownWidget(String),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0} not found")]
    NotFound(String),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: u16,
    pub timestamp: String,
}

impl IntoResponse for StorefrontError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            StorefrontError::UnknownWidget(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            StorefrontError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR"),
        };

        let body = ErrorResponse {
            error: error.to_string(),
            message: self.to_string(),
            code: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, axum::Json(body)).into_response()
    }
}
