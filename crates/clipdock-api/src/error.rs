//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`. Domain
//! errors convert into `HttpAppError` via the `From` impls below so they
//! render consistently (status, body, logging) without handlers picking
//! status codes by hand.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use clipdock_core::{AppError, ErrorMetadata, LogLevel};
use clipdock_processing::{IngestError, ProcessingError, StagingError, ValidationError};
use clipdock_storage::StorageError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (a clipdock-core type).
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        // Trusted-client deployment: full message (tool stderr included)
        // is returned outside production; production redacts it.
        let body = if is_production_env() {
            Json(ErrorResponse {
                error: app_error.client_message(),
                details: None,
                error_type: None,
                code: app_error.error_code().to_string(),
            })
        } else {
            Json(ErrorResponse {
                error: app_error.client_message(),
                details: Some(app_error.to_string()),
                error_type: Some(app_error.error_type().to_string()),
                code: app_error.error_code().to_string(),
            })
        };

        (status, body).into_response()
    }
}

// Convert domain errors to HttpAppError (avoids orphan rule: we impl for
// local HttpAppError)

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            StorageError::NotFound(msg) => AppError::NotFound(msg),
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            StorageError::UploadFailed(msg)
            | StorageError::DeleteFailed(msg)
            | StorageError::BackendError(msg) => AppError::Storage(msg),
            StorageError::IoError(err) => AppError::Internal(format!("IO error: {}", err)),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
        };
        HttpAppError(app)
    }
}

impl From<ValidationError> for HttpAppError {
    fn from(err: ValidationError) -> Self {
        let app = match err {
            ValidationError::MissingContentType => AppError::BadRequest(err.to_string()),
            ValidationError::UnsupportedMediaType { .. } => {
                AppError::UnsupportedMediaType(err.to_string())
            }
            ValidationError::FileTooLarge { .. } => AppError::PayloadTooLarge(err.to_string()),
            ValidationError::EmptyFile => AppError::BadRequest(err.to_string()),
        };
        HttpAppError(app)
    }
}

impl From<StagingError> for HttpAppError {
    fn from(err: StagingError) -> Self {
        let app = match err {
            StagingError::TooLarge { .. } => AppError::PayloadTooLarge(err.to_string()),
            StagingError::Io(e) => AppError::Internal(format!("staging failed: {}", e)),
        };
        HttpAppError(app)
    }
}

impl From<ProcessingError> for HttpAppError {
    fn from(err: ProcessingError) -> Self {
        HttpAppError(AppError::Processing(err.to_string()))
    }
}

impl From<IngestError> for HttpAppError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Processing(e) => e.into(),
            IngestError::Storage(e) => e.into(),
            // the object is committed but the record is not; surfaced as
            // a storage failure per the pipeline contract
            IngestError::Metadata(e) => HttpAppError(AppError::Storage(e.to_string())),
        }
    }
}

impl From<clipdock_core::store::StoreError> for HttpAppError {
    fn from(err: clipdock_core::store::StoreError) -> Self {
        let app = match err {
            clipdock_core::store::StoreError::NotFound(_) => {
                AppError::NotFound("Video not found".to_string())
            }
            clipdock_core::store::StoreError::Backend(msg) => AppError::Storage(msg),
        };
        HttpAppError(app)
    }
}

impl From<axum::extract::multipart::MultipartError> for HttpAppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        HttpAppError(AppError::BadRequest(format!(
            "Invalid multipart form: {}",
            err
        )))
    }
}
