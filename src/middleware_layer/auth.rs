use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_cookies::cookie::time::Duration;
use tower_cookies::{Cookie, Cookies};
use uuid::Uuid;

use crate::{
    error::{Result, SessionRejected},
    htmx,
    models::session::Session,
    state::AppState,
};

/// Name of the cookie holding the session id.
pub const SESSION_COOKIE: &str = "session_id";

/// Extracts the session token from the request cookies.
///
/// # Arguments
///
/// * `cookies` - The request cookies.
///
/// # Returns
///
/// An `Option` containing the session ID if found.
pub fn extract_session_token(cookies: &Cookies) -> Option<Uuid> {
    cookies
        .get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

/// Tells the browser to drop the session cookie.
pub fn clear_session_cookie(cookies: &Cookies) {
    let mut session_cookie = Cookie::new(SESSION_COOKIE, "");
    session_cookie.set_max_age(Duration::seconds(0));
    session_cookie.set_path("/");
    cookies.remove(session_cookie);
}

/// Resolves the session cookie to a live session.
///
/// A cookie pointing at no live session is cleared on the way out.
pub async fn current_session(
    state: &AppState,
    cookies: &Cookies,
) -> Result<Option<(Uuid, Session)>> {
    let Some(session_id) = extract_session_token(cookies) else {
        if cookies.get(SESSION_COOKIE).is_some() {
            clear_session_cookie(cookies);
        }
        return Ok(None);
    };

    match state.sessions.load(session_id).await? {
        Some(session) => Ok(Some((session_id, session))),
        None => {
            tracing::debug!("No live session for session_id: {}", session_id);
            clear_session_cookie(cookies);
            Ok(None)
        }
    }
}

/// A middleware that requires a valid session to be present.
///
/// Without one, the browser is sent to the login page. The session is made
/// available to handlers as an `Extension<Session>`. When a handler finds the
/// backend no longer honours the session, the local record is dropped too.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `cookies` - The request cookies.
/// * `request` - The incoming request.
/// * `next` - The next middleware in the chain.
pub async fn require_auth(
    State(state): State<AppState>,
    cookies: Cookies,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let is_htmx = htmx::is_htmx(request.headers());

    let (session_id, session) = match current_session(&state, &cookies).await {
        Ok(Some(found)) => found,
        Ok(None) => {
            tracing::debug!("🔒 No valid session, redirecting to login");
            return htmx::redirect(is_htmx, "/login");
        }
        Err(e) => return e.into_response(),
    };

    tracing::debug!("✅ User authenticated: {}", session.user_id);
    request.extensions_mut().insert(session);

    let response = next.run(request).await;

    if response.extensions().get::<SessionRejected>().is_some() {
        tracing::warn!("❌ Backend rejected session: {}", session_id);
        if let Err(e) = state.sessions.delete(session_id).await {
            tracing::error!("❌ Failed to drop rejected session: {}", e);
        }
        clear_session_cookie(&cookies);
        return htmx::redirect(is_htmx, "/login");
    }

    response
}
