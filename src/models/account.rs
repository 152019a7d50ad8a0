use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user account held by the identity service.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// A session issued by the identity service.
///
/// `secret` is only populated when the session is created with an API key.
#[derive(Clone, Deserialize)]
pub struct BackendSession {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub expire: DateTime<Utc>,
    #[serde(default)]
    pub secret: String,
}

/// Body of a user create call.
#[derive(Serialize)]
pub struct CreateUser<'a> {
    #[serde(rename = "userId")]
    pub user_id: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub name: &'a str,
}

/// Body of an email/password session create call.
#[derive(Serialize)]
pub struct EmailSessionRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}
