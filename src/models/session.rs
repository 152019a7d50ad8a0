use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a user session.
///
/// The browser only ever sees the random id this record is stored under.
/// `secret` is the backend's session secret and authorizes every document
/// call made on the user's behalf, so it must never reach a log line.
#[derive(Clone, Serialize, Deserialize)]
pub struct Session {
    /// The backend id of the user this session belongs to.
    pub user_id: String,
    /// Display name.
    pub name: String,
    /// The user's email address.
    pub email: String,
    /// The backend's id for its own session, used on logout.
    pub backend_session_id: String,
    /// The backend session secret.
    pub secret: String,
    /// Token mutating requests must echo in the `x-csrf-token` header.
    pub csrf_token: String,
    /// The timestamp when the session was created.
    pub created_at: DateTime<Utc>,
    /// The timestamp when the session expires.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session is past its expiry.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Seconds left before expiry, zero when already expired.
    pub fn remaining_seconds(&self) -> u64 {
        (self.expires_at - Utc::now()).num_seconds().max(0) as u64
    }

    /// The name shown in the page header.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("backend_session_id", &self.backend_session_id)
            .field("secret", &"<redacted>")
            .field("csrf_token", &"<redacted>")
            .field("created_at", &self.created_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
