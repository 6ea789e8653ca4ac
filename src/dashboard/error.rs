use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::error::IngestionError;

/// Errors surfaced by dashboard handlers.
#[derive(Debug, Error)]
pub enum PreviewError {
    /// The requested key is not one of the listed files.
    #[error("unknown file '{0}'")]
    UnknownFile(String),

    /// Nothing to preview: no curated snapshots and no source files.
    #[error("no data found")]
    NoData,

    /// Listing or loading failed.
    #[error(transparent)]
    Ingestion(#[from] IngestionError),

    #[error("template error: {0}")]
    Render(#[from] askama::Error),

    /// The blocking load task panicked or was cancelled.
    #[error("preview task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl PreviewError {
    pub fn status(&self) -> StatusCode {
        match self {
            PreviewError::UnknownFile(_) | PreviewError::NoData => StatusCode::NOT_FOUND,
            PreviewError::Ingestion(_) | PreviewError::Render(_) | PreviewError::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for PreviewError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "preview request failed");
        }
        (status, self.to_string()).into_response()
    }
}
