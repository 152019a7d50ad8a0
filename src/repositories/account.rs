use reqwest::Method;

use crate::{
    backend::{BackendClient, Credentials, UNIQUE_ID},
    error::Result,
    models::account::{Account, BackendSession, CreateUser, EmailSessionRequest},
};

/// Creates a new user in the identity service.
///
/// # Arguments
///
/// * `backend` - The backend client.
/// * `name` - The user's display name.
/// * `email` - The user's email address.
/// * `password` - The user's password.
///
/// # Returns
///
/// A `Result` containing the created `Account`.
pub async fn create_user(
    backend: &BackendClient,
    name: &str,
    email: &str,
    password: &str,
) -> Result<Account> {
    let body = CreateUser {
        user_id: UNIQUE_ID,
        email,
        password,
        name,
    };

    backend
        .call(Method::POST, "/users", Credentials::ApiKey, Some(&body))
        .await
}

/// Creates an email/password session.
///
/// Made with the API key so the response carries the session secret.
pub async fn create_email_session(
    backend: &BackendClient,
    email: &str,
    password: &str,
) -> Result<BackendSession> {
    let body = EmailSessionRequest { email, password };

    backend
        .call(
            Method::POST,
            "/account/sessions/email",
            Credentials::ApiKey,
            Some(&body),
        )
        .await
}

/// Fetches the account a session secret belongs to.
pub async fn get_account(backend: &BackendClient, secret: &str) -> Result<Account> {
    backend
        .call::<_, ()>(Method::GET, "/account", Credentials::Session(secret), None)
        .await
}

/// Deletes the session a secret belongs to.
pub async fn delete_current_session(backend: &BackendClient, secret: &str) -> Result<()> {
    backend
        .call_empty(
            Method::DELETE,
            "/account/sessions/current",
            Credentials::Session(secret),
        )
        .await
}
