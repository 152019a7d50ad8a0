use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::{
    csrf::generate_csrf_token,
    error::{AppError, Result},
    models::session::Session,
    repositories::account as account_repo,
    state::AppState,
};

/// Creates a user, then logs them in.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `name` - The user's display name.
/// * `email` - The user's email address.
/// * `password` - The user's password.
///
/// # Returns
///
/// A `Result` containing the new session id and `Session`.
pub async fn register(
    state: &AppState,
    name: &str,
    email: &str,
    password: &str,
) -> Result<(Uuid, Session)> {
    tracing::debug!("📝 Creating user: {}", email);

    let account = account_repo::create_user(&state.backend, name, email, password).await?;
    tracing::info!("✅ User created with ID: {}", account.id);

    login(state, email, password).await
}

/// Exchanges credentials for a backend session and stores it locally.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `email` - The user's email address.
/// * `password` - The user's password.
///
/// # Returns
///
/// A `Result` containing the new session id and `Session`.
pub async fn login(state: &AppState, email: &str, password: &str) -> Result<(Uuid, Session)> {
    tracing::debug!("🔐 Authenticating user: {}", email);

    let backend_session = account_repo::create_email_session(&state.backend, email, password)
        .await
        .map_err(|e| match e {
            AppError::Backend { status: 401, .. } => {
                AppError::Authentication("Invalid email or password".to_string())
            }
            other => other,
        })?;

    if backend_session.secret.is_empty() {
        return Err(AppError::Internal(
            "Backend session carries no secret; the API key needs the sessions.write scope"
                .to_string(),
        ));
    }

    let account = account_repo::get_account(&state.backend, &backend_session.secret).await?;

    let now = Utc::now();
    let local_limit = now + Duration::days(state.config.session_duration_days);

    let session = Session {
        user_id: backend_session.user_id,
        name: account.name,
        email: account.email,
        backend_session_id: backend_session.id,
        secret: backend_session.secret,
        csrf_token: generate_csrf_token(),
        created_at: now,
        expires_at: backend_session.expire.min(local_limit),
    };

    let session_id = Uuid::new_v4();
    state.sessions.save(session_id, &session).await?;

    tracing::info!("✅ User authenticated: {}", session.user_id);
    Ok((session_id, session))
}

/// Ends a session on the backend and locally.
///
/// The local record is removed even when the backend call fails, so the
/// browser is logged out either way.
pub async fn logout(state: &AppState, session_id: Uuid, session: &Session) -> Result<()> {
    match account_repo::delete_current_session(&state.backend, &session.secret).await {
        Ok(()) => tracing::debug!("✅ Backend session deleted: {}", session.backend_session_id),
        Err(AppError::Unauthenticated | AppError::NotFound) => {
            tracing::debug!("Backend session already gone: {}", session.backend_session_id)
        }
        Err(e) => tracing::warn!("⚠️ Failed to delete backend session: {}", e),
    }

    state.sessions.delete(session_id).await?;

    tracing::info!("✅ User logged out: {}", session.user_id);
    Ok(())
}
