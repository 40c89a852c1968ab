use axum::{
    extract::Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

pub const METHOD_NOT_ALLOWED: &str = "Method Not Allowed";
pub const NO_FILES: &str = "Tidak ada file PDF yang diunggah";
pub const FORM_FAILED: &str = "Gagal memproses form data";
pub const COMPRESSION_FAILED: &str = "Terjadi kesalahan saat kompresi file";

/// Standard error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message describing what went wrong
    pub error: String,
}

/// Application-specific error types for the API
///
/// Only the fixed client message leaves the server; the cause is logged.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("no PDF file uploaded")]
    NoFiles,

    #[error("failed to process form data: {0}")]
    Form(String),

    #[error("compression failed: {0}")]
    Compression(#[from] pdfpress::PressError),

    #[error("compression task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::NoFiles => StatusCode::BAD_REQUEST,
            AppError::Form(_) | AppError::Compression(_) | AppError::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AppError::MethodNotAllowed => METHOD_NOT_ALLOWED,
            AppError::NoFiles => NO_FILES,
            AppError::Form(_) => FORM_FAILED,
            AppError::Compression(_) | AppError::Task(_) => COMPRESSION_FAILED,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        let error_response = ErrorResponse {
            error: self.message().to_string(),
        };

        (status, Json(error_response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(AppError::NoFiles.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::Form("boundary".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_compression_error_hides_cause() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "/tmp/secret.pdf");
        let app_error = AppError::from(pdfpress::PressError::from(io_error));

        assert_eq!(app_error.message(), COMPRESSION_FAILED);
        assert!(app_error.to_string().contains("/tmp/secret.pdf"));
    }

    #[test]
    fn test_error_response_serialization() {
        let error = ErrorResponse {
            error: NO_FILES.to_string(),
        };

        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Tidak ada file PDF yang diunggah" }));
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::Form("bad".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
