use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::io;
use thiserror::Error;
use tracing::{error, info};

/// Errors returned by the content API.
///
/// Every variant renders as a JSON string body carrying the message, which
/// is the error contract gateways read back as text.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("{0} not found")]
    SiteNotFound(String),

    #[error("section not found")]
    SectionNotFound,

    #[error("{0} not found")]
    PathNotFound(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("invalid site config: {0}")]
    SiteConfig(#[from] serde_yaml::Error),

    #[error("invalid site metadata: {0}")]
    SiteMetadata(#[from] toml::de::Error),

    #[error("invalid section pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("failed to read matched path: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ContentError {
    pub fn status(&self) -> StatusCode {
        match self {
            ContentError::SiteNotFound(_)
            | ContentError::SectionNotFound
            | ContentError::PathNotFound(_) => StatusCode::NOT_FOUND,
            ContentError::InvalidPath(_) => StatusCode::BAD_REQUEST,
            ContentError::Io(err) if err.kind() == io::ErrorKind::NotFound => {
                StatusCode::NOT_FOUND
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ContentError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            error!(error = %message, "Content request failed");
        } else {
            info!(status = %status, error = %message, "Content request rejected");
        }

        (status, Json(message)).into_response()
    }
}

pub type ContentResult<T> = Result<T, ContentError>;
