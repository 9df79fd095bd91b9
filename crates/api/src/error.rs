//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::DomainError;
use storefront::{AuthError, StorefrontError};
use thiserror::Error;

/// API-level error type that maps to HTTP responses.
///
/// All handlers funnel failures through this enum, so the status mapping
/// lives here and nowhere else. Responses carry an `{"error": "..."}`
/// JSON body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or unusable credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated, but the identity lacks the required role.
    #[error("{0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// Bad request from the client.
    #[error("{0}")]
    BadRequest(String),

    /// Domain logic error.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Authentication collaborator error.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Application service error.
    #[error(transparent)]
    Storefront(#[from] StorefrontError),

    /// Internal server error.
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Domain(err) => domain_error_to_response(err),
            ApiError::Auth(err) => auth_error_to_response(err),
            ApiError::Storefront(err) => storefront_error_to_response(err),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn domain_error_to_response(err: DomainError) -> (StatusCode, String) {
    match &err {
        DomainError::MedicineNotFound { .. }
        | DomainError::LineNotFound { .. }
        | DomainError::OrderNotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        DomainError::MedicineAlreadyExists { .. }
        | DomainError::InvalidStatusTransition { .. } => (StatusCode::CONFLICT, err.to_string()),
        DomainError::InvalidQuantity { .. }
        | DomainError::InvalidMedicine { .. }
        | DomainError::InvalidAddress { .. }
        | DomainError::EmptyCart => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
    }
}

fn auth_error_to_response(err: AuthError) -> (StatusCode, String) {
    match &err {
        AuthError::EmailTaken { .. } => (StatusCode::CONFLICT, err.to_string()),
        AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, err.to_string()),
    }
}

fn storefront_error_to_response(err: StorefrontError) -> (StatusCode, String) {
    match err {
        StorefrontError::Domain(domain_err) => domain_error_to_response(domain_err),
        StorefrontError::Store(store_err) => {
            tracing::error!(error = %store_err, "state store failure");
            (StatusCode::INTERNAL_SERVER_ERROR, store_err.to_string())
        }
        StorefrontError::OrderIdSpaceExhausted => {
            tracing::error!("order number allocation exhausted");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}
