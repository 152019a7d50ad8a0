use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use thiserror::Error;

use crate::htmx::HX_RESWAP;
use crate::views::fragments;

/// Shown whenever the backend or the session store fails.
pub const GENERIC_FAILURE: &str = "Something went wrong while talking to the server. Please try again.";

/// The application's error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// User input failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Credentials were rejected by the identity service.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// No valid session for a protected operation.
    #[error("Not authenticated")]
    Unauthenticated,

    /// A mutating request without a matching CSRF token.
    #[error("CSRF check failed: {0}")]
    Csrf(String),

    /// A resource not found error.
    #[error("Resource not found")]
    NotFound,

    /// The backend answered with a non-success status.
    #[error("Backend error {status} ({kind}): {message}")]
    Backend {
        status: u16,
        kind: String,
        message: String,
    },

    /// The backend could not be reached.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A Redis error.
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// A payload could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] sonic_rs::Error),

    /// An internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Response extension marking a redirect caused by a missing or rejected
/// session, so `require_auth` can turn it into an htmx-aware redirect.
#[derive(Debug, Clone, Copy)]
pub struct SessionRejected;

/// A `Result` type that uses `AppError` as the error type.
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// The status code this error is rendered with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AppError::Unauthenticated => StatusCode::SEE_OTHER,
            AppError::Csrf(_) => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Backend { status: 409, .. } => StatusCode::CONFLICT,
            AppError::Backend { .. } | AppError::Http(_) => StatusCode::BAD_GATEWAY,
            AppError::Redis(_) | AppError::Json(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The message a full-page form (login, register) shows inline.
    ///
    /// Client-side backend rejections carry a message worth showing, such as
    /// a duplicate account; anything else collapses to the generic text.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) | AppError::Authentication(msg) => msg.clone(),
            AppError::Backend { status, message, .. } if (400..500).contains(status) => {
                message.clone()
            }
            AppError::NotFound => "Resource not found".to_string(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }

    fn log(&self) {
        match self {
            AppError::Validation(msg) => tracing::debug!("Validation error: {}", msg),
            AppError::Authentication(msg) => tracing::warn!("Authentication failed: {}", msg),
            AppError::Unauthenticated => tracing::debug!("Unauthenticated request"),
            AppError::Csrf(msg) => tracing::warn!("CSRF check failed: {}", msg),
            AppError::NotFound => tracing::debug!("Resource not found"),
            AppError::Backend { status, kind, message } => {
                tracing::error!("Backend error {} ({}): {}", status, kind, message)
            }
            AppError::Http(e) => tracing::error!("Backend unreachable: {}", e),
            AppError::Redis(e) => tracing::error!("Redis error: {}", e),
            AppError::Json(e) => tracing::error!("JSON error: {}", e),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();

        let status = self.status();
        let body = match self {
            AppError::Unauthenticated => {
                let mut response = Redirect::to("/login").into_response();
                response.extensions_mut().insert(SessionRejected);
                return response;
            }
            AppError::Validation(ref msg) | AppError::Authentication(ref msg) => {
                fragments::field_error(msg)
            }
            AppError::Csrf(_) => {
                fragments::error_banner("Your form expired. Reload the page and try again.")
            }
            AppError::NotFound => fragments::error_banner("That item no longer exists."),
            _ => fragments::error_banner(GENERIC_FAILURE),
        };

        (status, [(HX_RESWAP, "innerHTML")], Html(body)).into_response()
    }
}
