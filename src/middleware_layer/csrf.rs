use axum::{
    Extension,
    body::Body,
    extract::Request,
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{csrf::tokens_match, error::AppError, models::session::Session};

/// Header mutating requests carry the session's CSRF token in.
pub const CSRF_HEADER: &str = "x-csrf-token";

/// A middleware that verifies the CSRF token.
///
/// Must run inside `require_auth`, which provides the session.
///
/// # Arguments
///
/// * `session` - The user's session.
/// * `req` - The incoming request.
/// * `next` - The next middleware in the chain.
pub async fn verify_csrf(
    Extension(session): Extension<Session>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if req.method() == Method::GET
        || req.method() == Method::HEAD
        || req.method() == Method::OPTIONS
    {
        return next.run(req).await;
    }

    let provided = match req.headers().get(CSRF_HEADER) {
        Some(token) => match token.to_str() {
            Ok(t) => t,
            Err(_) => {
                return AppError::Csrf("Invalid CSRF token format".to_string()).into_response();
            }
        },
        None => {
            return AppError::Csrf("Missing CSRF token header".to_string()).into_response();
        }
    };

    if !tokens_match(&session.csrf_token, provided) {
        return AppError::Csrf(format!("Token mismatch for user: {}", session.user_id))
            .into_response();
    }

    tracing::debug!("✅ CSRF token valid");
    next.run(req).await
}
