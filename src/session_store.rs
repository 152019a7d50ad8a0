use std::collections::HashMap;
use std::sync::Arc;

use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::Result;
use crate::models::session::Session;

/// Server-side session records, keyed by the id held in the session cookie.
#[derive(Clone)]
pub enum SessionStore {
    /// Process-local map. Sessions do not survive a restart.
    Memory(Arc<RwLock<HashMap<Uuid, Session>>>),
    /// `session:{id}` keys holding JSON, expired by Redis.
    Redis(ConnectionManager),
}

fn redis_key(session_id: Uuid) -> String {
    format!("session:{}", session_id)
}

impl SessionStore {
    /// Creates an empty in-memory store.
    pub fn memory() -> Self {
        SessionStore::Memory(Arc::new(RwLock::new(HashMap::new())))
    }

    /// Connects to Redis.
    pub async fn redis(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let manager = ConnectionManager::new(client).await?;
        Ok(SessionStore::Redis(manager))
    }

    /// Stores a session until its `expires_at`.
    ///
    /// The in-memory store prunes every expired record on each save, since
    /// nothing else evicts sessions that are never loaded again.
    pub async fn save(&self, session_id: Uuid, session: &Session) -> Result<()> {
        match self {
            SessionStore::Memory(map) => {
                let mut map = map.write().await;
                map.retain(|_, s| !s.is_expired());
                map.insert(session_id, session.clone());
            }
            SessionStore::Redis(manager) => {
                let session_json = sonic_rs::to_string(session)?;
                let ttl = session.remaining_seconds().max(1);
                let _: () = manager
                    .clone()
                    .set_ex(redis_key(session_id), session_json, ttl)
                    .await?;
            }
        }

        tracing::debug!("💾 Session stored: session:{}", session_id);
        Ok(())
    }

    /// Loads a live session. Expired records are dropped and reported as absent.
    pub async fn load(&self, session_id: Uuid) -> Result<Option<Session>> {
        let session = match self {
            SessionStore::Memory(map) => map.read().await.get(&session_id).cloned(),
            SessionStore::Redis(manager) => {
                let session_json: Option<String> =
                    manager.clone().get(redis_key(session_id)).await?;
                match session_json {
                    Some(json) => Some(sonic_rs::from_str::<Session>(&json)?),
                    None => None,
                }
            }
        };

        match session {
            Some(session) if session.is_expired() => {
                tracing::debug!("⌛ Session expired for user: {}", session.user_id);
                self.delete(session_id).await?;
                Ok(None)
            }
            other => Ok(other),
        }
    }

    /// Removes a session. Removing an unknown id is not an error.
    pub async fn delete(&self, session_id: Uuid) -> Result<()> {
        match self {
            SessionStore::Memory(map) => {
                map.write().await.remove(&session_id);
            }
            SessionStore::Redis(manager) => {
                let _: () = manager.clone().del(redis_key(session_id)).await?;
            }
        }

        tracing::debug!("🗑️  Session deleted: session:{}", session_id);
        Ok(())
    }
}
