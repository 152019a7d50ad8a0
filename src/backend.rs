use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, header};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use zeroize::Zeroizing;

use crate::config::Config;
use crate::error::{AppError, Result};

/// Document id the backend replaces with a freshly generated one.
pub const UNIQUE_ID: &str = "unique()";

/// How a backend call is authorized.
#[derive(Clone, Copy)]
pub enum Credentials<'a> {
    /// The server API key. Bypasses per-document permissions.
    ApiKey,
    /// A user's session secret. Document permissions apply.
    Session(&'a str),
}

/// Error body returned by the backend on non-success statuses.
#[derive(Debug, Default, Deserialize)]
struct BackendErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default, rename = "type")]
    kind: String,
}

/// HTTP client for the backend-as-a-service REST API.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    endpoint: String,
    project_id: String,
    api_key: Arc<Zeroizing<String>>,
    database_id: String,
    collection_id: String,
}

impl BackendClient {
    /// Creates a new `BackendClient`.
    ///
    /// # Arguments
    ///
    /// * `config` - The application's configuration.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `BackendClient`.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            project_id: config.project_id.clone(),
            api_key: Arc::new(config.api_key.clone()),
            database_id: config.database_id.clone(),
            collection_id: config.collection_id.clone(),
        })
    }

    /// Path of the todo collection, relative to the endpoint.
    pub fn collection_path(&self) -> String {
        format!(
            "/databases/{}/collections/{}",
            self.database_id, self.collection_id
        )
    }

    /// Sends a request and decodes a JSON response body.
    pub async fn call<T, B>(
        &self,
        method: Method,
        path: &str,
        credentials: Credentials<'_>,
        body: Option<&B>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let bytes = self.send(method, path, credentials, body).await?;
        Ok(sonic_rs::from_slice(&bytes)?)
    }

    /// Sends a request whose response body is irrelevant.
    pub async fn call_empty(
        &self,
        method: Method,
        path: &str,
        credentials: Credentials<'_>,
    ) -> Result<()> {
        self.send::<()>(method, path, credentials, None).await?;
        Ok(())
    }

    async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        credentials: Credentials<'_>,
        body: Option<&B>,
    ) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.endpoint, path);
        tracing::debug!("➡️  {} {}", method, url);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header("X-Appwrite-Project", &self.project_id)
            .header(header::ACCEPT, "application/json");

        request = match credentials {
            Credentials::ApiKey => request.header("X-Appwrite-Key", self.api_key.as_str()),
            Credentials::Session(secret) => request.header("X-Appwrite-Session", secret),
        };

        if let Some(body) = body {
            request = request
                .header(header::CONTENT_TYPE, "application/json")
                .body(sonic_rs::to_string(body)?);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?.to_vec();

        tracing::debug!("⬅️  {} {} -> {}", method, url, status);

        if status.is_success() {
            return Ok(bytes);
        }

        let error: BackendErrorBody = sonic_rs::from_slice(&bytes).unwrap_or_default();

        match (status.as_u16(), credentials) {
            (401, Credentials::Session(_)) => Err(AppError::Unauthenticated),
            (404, _) => Err(AppError::NotFound),
            (code, _) => Err(AppError::Backend {
                status: code,
                kind: error.kind,
                message: if error.message.is_empty() {
                    status.to_string()
                } else {
                    error.message
                },
            }),
        }
    }
}
