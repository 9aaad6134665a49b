//! Mapping of failures onto HTTP responses

use axum::Json;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::workbook::WorkbookError;

#[derive(Debug)]
pub enum ApiError {
    Workbook(WorkbookError),
    /// Request body was not valid JSON
    MalformedRequest(String),
    /// Request body exceeded the configured limit
    PayloadTooLarge(String),
    /// No route for this path
    NotFound(String),
    /// Blocking read task panicked or was cancelled
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Workbook(WorkbookError::FileAccess { .. }) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Workbook(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Workbook(err) => err.code(),
            ApiError::MalformedRequest(_) => "malformed_request",
            ApiError::PayloadTooLarge(_) => "payload_too_large",
            ApiError::NotFound(_) => "not_found",
            ApiError::Internal(_) => "internal",
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Workbook(err) => write!(f, "{}", err),
            ApiError::MalformedRequest(reason) => write!(f, "Malformed JSON body: {}", reason),
            ApiError::PayloadTooLarge(reason) => write!(f, "Request body too large: {}", reason),
            ApiError::NotFound(path) => write!(f, "No route for {}", path),
            ApiError::Internal(reason) => write!(f, "Internal error: {}", reason),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<WorkbookError> for ApiError {
    fn from(err: WorkbookError) -> Self {
        ApiError::Workbook(err)
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(rejection.body_text())
        } else {
            ApiError::MalformedRequest(rejection.body_text())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{} ({})", self, self.code());
        } else {
            log::warn!("{} ({})", self, self.code());
        }
        let body = json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        });
        (status, Json(body)).into_response()
    }
}
