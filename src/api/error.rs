//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::pipeline::ingest::IngestError;
use crate::pipeline::processor::AnalysisError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Rate limit exceeded")]
    RateLimited { retry_after: u64 },
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("Upload too large: {0}")]
    Oversize(String),
    #[error("Malicious content: {0}")]
    MaliciousContent(String),
    #[error("Corrupt document: {0}")]
    CorruptDocument(String),
    #[error("No extractable text")]
    ExtractionEmpty,
    #[error("Budget exceeded: {0}")]
    BudgetExceeded(String),
    #[error("Analysis cancelled")]
    Cancelled,
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::RateLimited { retry_after } => (
                StatusCode::TOO_MANY_REQUESTS,
                "RATE_LIMITED",
                format!("Too many uploads. Retry after {retry_after}s"),
            ),
            ApiError::InvalidFormat(detail) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "INVALID_FORMAT",
                detail.clone(),
            ),
            ApiError::Oversize(detail) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "OVERSIZE",
                detail.clone(),
            ),
            ApiError::MaliciousContent(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "MALICIOUS_CONTENT",
                detail.clone(),
            ),
            ApiError::CorruptDocument(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "CORRUPT_DOCUMENT",
                detail.clone(),
            ),
            ApiError::ExtractionEmpty => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_EMPTY",
                "No text could be extracted from the document".to_string(),
            ),
            ApiError::BudgetExceeded(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "BUDGET_EXCEEDED",
                detail.clone(),
            ),
            ApiError::Cancelled => (
                StatusCode::CONFLICT,
                "CANCELLED",
                "Analysis was cancelled".to_string(),
            ),
            ApiError::BadRequest(detail) => (
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
                detail.clone(),
            ),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };

        let mut response = (status, Json(body)).into_response();
        if let ApiError::RateLimited { retry_after } = &self {
            if let Ok(val) = axum::http::HeaderValue::from_str(&retry_after.to_string()) {
                response.headers_mut().insert("Retry-After", val);
            }
        }
        response
    }
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::RateLimitExceeded { retry_after } => ApiError::RateLimited { retry_after },
            e @ IngestError::InvalidFormat { .. } => ApiError::InvalidFormat(e.to_string()),
            e @ IngestError::OversizeError { .. } => ApiError::Oversize(e.to_string()),
            IngestError::MaliciousContentDetected(reason) => ApiError::MaliciousContent(reason),
            IngestError::CorruptDocument(detail) => ApiError::CorruptDocument(detail),
            e @ (IngestError::Staging(_) | IngestError::LockPoisoned) => {
                ApiError::Internal(e.to_string())
            }
        }
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::Ingest(e) => e.into(),
            AnalysisError::CorruptDocument(detail) => ApiError::CorruptDocument(detail),
            AnalysisError::ExtractionEmpty => ApiError::ExtractionEmpty,
            AnalysisError::Cancelled => ApiError::Cancelled,
            AnalysisError::BudgetExceeded(detail) => ApiError::BudgetExceeded(detail),
            AnalysisError::Segmentation(e) => ApiError::BadRequest(e.to_string()),
            AnalysisError::Internal(detail) => ApiError::Internal(detail),
        }
    }
}
