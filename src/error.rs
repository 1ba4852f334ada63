//! Error type returned by every handler.
//!
//! Each variant renders as the failure envelope `{"Status": "Failed", "Error": ...}`
//! with the matching HTTP status code.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use crate::meetings::dto::ErrorResponse;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("meeting request {0} not found")]
    NotFound(i32),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Internal(e) => error!(error = ?e, "request failed"),
            other => warn!(%status, error = %other, "request rejected"),
        }
        (status, Json(ErrorResponse::failed(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn read_error_body(resp: Response) -> (StatusCode, serde_json::Value) {
        let status = resp.status();
        let bytes = resp
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn bad_request_produces_400_envelope() {
        let (status, body) =
            read_error_body(AppError::bad_request("user_id is required").into_response()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["Status"], "Failed");
        assert_eq!(body["Error"], "user_id is required");
        assert!(body.get("Data").is_none());
    }

    #[tokio::test]
    async fn not_found_produces_404() {
        let (status, body) = read_error_body(AppError::NotFound(12).into_response()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["Error"], "meeting request 12 not found");
    }

    #[tokio::test]
    async fn internal_carries_the_error_message() {
        let err: AppError = anyhow::anyhow!("connection reset").into();
        let (status, body) = read_error_body(err.into_response()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["Status"], "Failed");
        assert_eq!(body["Error"], "connection reset");
    }
}
