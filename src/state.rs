use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::backend::BackendClient;
use crate::config::Config;
use crate::error::Result;
use crate::session_store::SessionStore;

/// The application's state.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Config,
    /// The backend REST client.
    pub backend: BackendClient,
    /// Server-side session records.
    pub sessions: SessionStore,
    /// Set once the collection is known to have a `content` attribute.
    pub content_attribute: Arc<OnceCell<()>>,
}

impl AppState {
    /// Creates a new `AppState`.
    ///
    /// # Arguments
    ///
    /// * `config` - The application's configuration.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `AppState`.
    pub async fn new(config: &Config) -> Result<Self> {
        let backend = BackendClient::new(config)?;
        tracing::info!("✅ Backend client initialized for {}", config.endpoint);

        let sessions = match config.redis_url.as_deref() {
            Some(url) => {
                let store = SessionStore::redis(url).await?;
                tracing::info!("✅ Redis session store initialized");
                store
            }
            None => {
                tracing::info!("✅ In-memory session store initialized (REDIS_URL not set)");
                SessionStore::memory()
            }
        };

        Ok(AppState {
            config: config.clone(),
            backend,
            sessions,
            content_attribute: Arc::new(OnceCell::new()),
        })
    }
}
