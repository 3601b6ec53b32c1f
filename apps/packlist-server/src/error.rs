//! Handler errors and their HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use packlist_api::{ErrorBody, ValidationError};
use packlist_storage::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    NotFound(String),

    #[error("Unauthorized")]
    Unauthorized,

    /// The request body could not be read (too large, aborted).
    #[error("{message}")]
    Body { status: StatusCode, message: String },

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Map a store failure for an operation on `entity` (e.g. `"Trip"`).
    ///
    /// Absence becomes `"<entity> not found"`; a dangling parent reference
    /// becomes a 404 naming the parent.
    pub fn store(entity: &'static str) -> impl FnOnce(StoreError) -> ApiError {
        move |e| match e {
            StoreError::NotFound => ApiError::NotFound(format!("{entity} not found")),
            StoreError::InvalidReference(what) => {
                ApiError::NotFound(format!("Referenced {what} not found"))
            }
            StoreError::Backend(msg) => ApiError::Internal(msg),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Body { status, .. } => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(e) => {
                tracing::debug!(field = ?e.field, message = %e.message, "rejected request body");
                ErrorBody::from(e)
            }
            ApiError::Internal(cause) => {
                tracing::error!(%cause, "request failed");
                ErrorBody::new("Internal Server Error")
            }
            other => ErrorBody::new(other.to_string()),
        };
        (status, Json(body)).into_response()
    }
}
