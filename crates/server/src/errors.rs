use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use service::errors::StoreError;

/// Everything the dispatcher can fail with. All variants collapse to a
/// single generic 500; the distinction lives only in the message text.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unsupported method")]
    UnsupportedMethod,
    #[error("{0}")]
    MalformedInput(serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0}")]
    Serialization(serde_json::Error),
    #[error("request timed out")]
    Timeout,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let msg = self.to_string();
        error!(error = %msg, "request failed");
        // Failures go out as plain text, unlike JSON success bodies.
        (StatusCode::INTERNAL_SERVER_ERROR, msg).into_response()
    }
}
