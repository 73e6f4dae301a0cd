use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use folio_core::DocumentError;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Main application error type that all gateway handlers return
#[derive(Debug, Error)]
pub enum AppError {
    /// The content API answered with a non-success status.
    #[error("Upstream returned {status}: {body}")]
    UpstreamStatus { status: StatusCode, body: String },

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(#[source] reqwest::Error),

    #[error("Upstream timed out: {0}")]
    UpstreamTimeout(#[source] reqwest::Error),

    #[error("Malformed upstream payload: {0}")]
    MalformedPayload(String),

    #[error("Malformed document: {0}")]
    MalformedDocument(#[source] DocumentError),

    #[error("Invalid frontmatter: {0}")]
    InvalidFrontmatter(#[source] DocumentError),
}

/// Structured error response format for API consistency
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: ErrorDetail,
    request_id: String,
}

/// Error detail structure with machine-readable codes
#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl From<DocumentError> for AppError {
    fn from(err: DocumentError) -> Self {
        match err {
            _ if err.is_malformed_payload() => AppError::MalformedPayload(err.to_string()),
            DocumentError::MissingDelimiter => AppError::MalformedDocument(err),
            _ => AppError::InvalidFrontmatter(err),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::UpstreamTimeout(err)
        } else if err.is_decode() {
            AppError::MalformedPayload(err.to_string())
        } else {
            AppError::UpstreamUnavailable(err)
        }
    }
}

impl AppError {
    /// Convert AppError to appropriate HTTP status code and error code
    pub fn to_status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::UpstreamStatus { status, .. } => (*status, "UPSTREAM_ERROR"),
            AppError::UpstreamUnavailable(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_UNAVAILABLE"),
            AppError::UpstreamTimeout(_) => (StatusCode::GATEWAY_TIMEOUT, "UPSTREAM_TIMEOUT"),
            AppError::MalformedPayload(_) => {
                (StatusCode::BAD_GATEWAY, "MALFORMED_UPSTREAM_PAYLOAD")
            }
            AppError::MalformedDocument(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "MALFORMED_DOCUMENT")
            }
            AppError::InvalidFrontmatter(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_FRONTMATTER")
            }
        }
    }

    /// Get user-friendly error message (sanitized for external consumption)
    pub fn to_user_message(&self) -> String {
        match self {
            AppError::UpstreamStatus { body, .. } => body.clone(),
            AppError::UpstreamUnavailable(_) => "The content server could not be reached".to_string(),
            AppError::UpstreamTimeout(_) => "The content server did not respond in time".to_string(),
            AppError::MalformedPayload(msg) => format!("The content server sent an invalid entry: {}", msg),
            AppError::MalformedDocument(err) | AppError::InvalidFrontmatter(err) => err.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        let (status_code, error_code) = self.to_status_and_code();

        match &self {
            // The upstream's own error text goes back to the caller as-is
            AppError::UpstreamStatus { status, body } => {
                info!(
                    request_id = %request_id,
                    status = %status,
                    "Upstream returned an error"
                );
                return (*status, Json(json!({ "error": body }))).into_response();
            }
            AppError::UpstreamUnavailable(err) | AppError::UpstreamTimeout(err) => {
                error!(
                    request_id = %request_id,
                    error_code = %error_code,
                    error = %err,
                    "Upstream request failed"
                );
            }
            _ => {
                warn!(
                    request_id = %request_id,
                    error_code = %error_code,
                    error = %self,
                    "Upstream content rejected"
                );
            }
        }

        let error_response = ErrorResponse {
            success: false,
            error: ErrorDetail {
                code: error_code.to_string(),
                message: self.to_user_message(),
            },
            request_id,
        };

        let mut response = Json(error_response).into_response();
        *response.status_mut() = status_code;
        response
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, AppError>;

/// Helper functions for common error scenarios
impl AppError {
    pub fn upstream_status(status: StatusCode, body: impl Into<String>) -> Self {
        Self::UpstreamStatus {
            status,
            body: body.into(),
        }
    }

    pub fn malformed_payload(msg: impl Into<String>) -> Self {
        Self::MalformedPayload(msg.into())
    }
}
