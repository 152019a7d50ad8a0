use axum::{
    Extension,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tower_cookies::cookie::time::Duration;
use tower_cookies::{Cookie, Cookies};
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    extract::FormOrJson,
    htmx::{self, HxRequest},
    middleware_layer::auth::{
        SESSION_COOKIE, clear_session_cookie, current_session, extract_session_token,
    },
    models::session::Session,
    services::auth as auth_service,
    state::AppState,
    validation::auth::*,
    views::pages,
};

/// The request payload for user registration.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// The request payload for user login.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Creates the session cookie for a freshly stored session.
fn create_session_cookie(session_id: Uuid, session: &Session, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, session_id.to_string());

    cookie.set_http_only(true);
    cookie.set_secure(secure);
    cookie.set_same_site(tower_cookies::cookie::SameSite::Lax);
    cookie.set_max_age(Duration::seconds(session.remaining_seconds() as i64));
    cookie.set_path("/");

    cookie
}

/// Shows the registration form.
pub async fn register_page(State(state): State<AppState>, cookies: Cookies) -> Result<Response> {
    if current_session(&state, &cookies).await?.is_some() {
        return Ok(htmx::redirect(false, "/"));
    }

    Ok(Html(pages::register_page("", "", None)).into_response())
}

/// Handles user registration.
///
/// Failures re-render the form with the submitted name and email kept.
pub async fn register(
    State(state): State<AppState>,
    HxRequest(is_htmx): HxRequest,
    cookies: Cookies,
    FormOrJson(payload): FormOrJson<RegisterRequest>,
) -> Response {
    let name = payload.name.trim();
    let email = payload.email.trim();
    tracing::info!("📝 Register attempt for: {}", email);

    let result: Result<(Uuid, Session)> = async {
        validate_name(name)?;
        validate_email(email)?;
        validate_password(&payload.password)?;
        auth_service::register(&state, name, email, &payload.password).await
    }
    .await;

    match result {
        Ok((session_id, session)) => {
            cookies.add(create_session_cookie(session_id, &session, state.config.production));
            tracing::info!("✅ User registered: {}", session.user_id);
            htmx::redirect(is_htmx, "/")
        }
        Err(e) => render_form_error(&e, |message| {
            pages::register_page(name, email, Some(message))
        }),
    }
}

/// Shows the login form.
pub async fn login_page(State(state): State<AppState>, cookies: Cookies) -> Result<Response> {
    if current_session(&state, &cookies).await?.is_some() {
        return Ok(htmx::redirect(false, "/"));
    }

    Ok(Html(pages::login_page("", None)).into_response())
}

/// Handles user login.
pub async fn login(
    State(state): State<AppState>,
    HxRequest(is_htmx): HxRequest,
    cookies: Cookies,
    FormOrJson(payload): FormOrJson<LoginRequest>,
) -> Response {
    let email = payload.email.trim();
    tracing::info!("🔐 Login attempt for: {}", email);

    let result: Result<(Uuid, Session)> = async {
        validate_email(email)?;
        if payload.password.is_empty() {
            return Err(AppError::Validation("Password is required".to_string()));
        }
        auth_service::login(&state, email, &payload.password).await
    }
    .await;

    match result {
        Ok((session_id, session)) => {
            cookies.add(create_session_cookie(session_id, &session, state.config.production));
            tracing::info!("✅ Session cookie added for user: {}", session.user_id);
            htmx::redirect(is_htmx, "/")
        }
        Err(e) => render_form_error(&e, |message| pages::login_page(email, Some(message))),
    }
}

/// Handles user logout.
pub async fn logout(
    State(state): State<AppState>,
    HxRequest(is_htmx): HxRequest,
    Extension(session): Extension<Session>,
    cookies: Cookies,
) -> Result<Response> {
    tracing::info!("👋 Logout for user: {}", session.user_id);

    let session_id = extract_session_token(&cookies).ok_or(AppError::Unauthenticated)?;

    auth_service::logout(&state, session_id, &session).await?;
    clear_session_cookie(&cookies);

    Ok(htmx::redirect(is_htmx, "/login"))
}

/// Re-renders a full-page form with the error inline.
fn render_form_error<F>(error: &AppError, render: F) -> Response
where
    F: FnOnce(&str) -> String,
{
    match error {
        AppError::Validation(msg) => tracing::debug!("Validation error: {}", msg),
        AppError::Authentication(msg) => tracing::warn!("Authentication failed: {}", msg),
        other => tracing::error!("❌ {}", other),
    }

    let status = match error {
        AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
        other => other.status(),
    };

    let page = render(&error.user_message());
    (status, Html(page)).into_response()
}
