//! API error types.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use vreview_annotations::AnnotationError;
use vreview_models::ModelError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Annotation(#[from] AnnotationError),

    #[error("Storage error: {0}")]
    Storage(#[from] vreview_storage::StorageError),
}

impl ApiError {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Annotation(AnnotationError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Annotation(AnnotationError::InvalidVideoId(_)) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) | ApiError::Annotation(_) | ApiError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// Detail shown in place of internal errors in production.
pub const INTERNAL_ERROR_DETAIL: &str = "An internal error occurred";

/// Response extension marking a body that carries internal error details.
#[derive(Debug, Clone, Copy)]
pub struct InternalErrorDetail;

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

/// `{"detail": ...}` response with the given status.
pub(crate) fn detail_response(status: StatusCode, detail: impl Into<String>) -> Response {
    (status, Json(ErrorResponse { detail: detail.into() })).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if !status.is_server_error() {
            return detail_response(status, self.to_string());
        }

        tracing::error!(error = %self, "Request failed");
        let mut response = detail_response(status, self.to_string());
        response.extensions_mut().insert(InternalErrorDetail);
        response
    }
}
