//! Error taxonomy for the auth endpoints.
//!
//! Every failure the auth service can produce is one of the [`ApiError`]
//! variants. Each maps to a fixed HTTP status and renders as the standard
//! failure envelope, so nothing reaches the transport layer unmapped.

use thiserror::Error;

/// Message returned for any unexpected server-side failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Missing or malformed input. `errors` holds per-field messages when known.
    #[error("{message}")]
    Validation { message: String, errors: Vec<String> },
    /// A unique key (email or username) is already taken.
    #[error("{0}")]
    Conflict(String),
    /// Credentials did not match.
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn internal() -> Self {
        ApiError::Internal(INTERNAL_ERROR_MESSAGE.to_string())
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Validation { .. } | ApiError::Conflict(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::NotFound(_) => 404,
            ApiError::Internal(_) => 500,
        }
    }

    pub fn field_errors(&self) -> &[String] {
        match self {
            ApiError::Validation { errors, .. } => errors,
            _ => &[],
        }
    }
}

#[cfg(feature = "server")]
mod server {
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::Json;

    use super::ApiError;
    use crate::db::{StoreError, UniqueField};
    use crate::models::ApiResponse;

    impl IntoResponse for ApiError {
        fn into_response(self) -> Response {
            let status = StatusCode::from_u16(self.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let body = ApiResponse::failure(self.to_string(), self.field_errors().to_vec());
            (status, Json(body)).into_response()
        }
    }

    impl From<StoreError> for ApiError {
        fn from(err: StoreError) -> Self {
            match err {
                StoreError::Duplicate(UniqueField::Email) => {
                    ApiError::Conflict(crate::auth::EMAIL_TAKEN.to_string())
                }
                StoreError::Duplicate(UniqueField::Username) => {
                    ApiError::Conflict(crate::auth::USERNAME_TAKEN.to_string())
                }
                StoreError::Backend(message) => {
                    tracing::error!(error = %message, "user store failure");
                    ApiError::internal()
                }
            }
        }
    }
}
