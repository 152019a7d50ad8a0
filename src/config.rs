use std::env;
use std::net::SocketAddr;
use anyhow::{Context, Result};
use zeroize::Zeroizing;

/// Default Appwrite Cloud endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://cloud.appwrite.io/v1";

/// Variables that have no sensible default.
const REQUIRED_VARS: [&str; 4] = [
    "APPWRITE_PROJECT_ID",
    "APPWRITE_API_KEY",
    "DATABASE_ID",
    "COLLECTION_ID",
];

/// The application's configuration.
#[derive(Clone)]
pub struct Config {
    /// Base URL of the backend REST API, without a trailing slash.
    pub endpoint: String,
    /// The backend project identifier.
    pub project_id: String,
    /// Server API key, used for admin calls only.
    pub api_key: Zeroizing<String>,
    /// Database holding the todo collection.
    pub database_id: String,
    /// Collection holding one document per todo item.
    pub collection_id: String,
    /// Verbose logging.
    pub debug: bool,
    /// Marks cookies `Secure`.
    pub production: bool,
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Redis URL for session records. In-memory sessions when unset.
    pub redis_url: Option<String>,
    /// Upper bound for a local session's lifetime, in days.
    pub session_duration_days: i64,
}

impl Config {
    /// Creates a new `Config` from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Creates a new `Config` from an arbitrary variable lookup.
    ///
    /// Every missing required variable is reported in a single error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let missing: Vec<&str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|key| get(*key).is_none())
            .collect();

        if !missing.is_empty() {
            anyhow::bail!(
                "Missing required environment variables: {}",
                missing.join(", ")
            );
        }

        let endpoint = get("APPWRITE_ENDPOINT")
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
            .trim_end_matches('/')
            .to_string();

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:5000".to_string())
            .parse()
            .context("Invalid BIND_ADDR")?;

        let session_duration_days: i64 = get("SESSION_DURATION_DAYS")
            .unwrap_or_else(|| "7".to_string())
            .parse()
            .context("Invalid SESSION_DURATION_DAYS")?;

        if session_duration_days <= 0 {
            anyhow::bail!("SESSION_DURATION_DAYS must be positive");
        }

        Ok(Self {
            endpoint,
            project_id: get("APPWRITE_PROJECT_ID").context("APPWRITE_PROJECT_ID must be set")?,
            api_key: Zeroizing::new(
                get("APPWRITE_API_KEY").context("APPWRITE_API_KEY must be set")?,
            ),
            database_id: get("DATABASE_ID").context("DATABASE_ID must be set")?,
            collection_id: get("COLLECTION_ID").context("COLLECTION_ID must be set")?,
            debug: get("APP_DEBUG").is_some_and(|v| parse_flag(&v)),
            production: get("APP_ENV").is_some_and(|v| v == "production"),
            bind_addr,
            redis_url: get("REDIS_URL"),
            session_duration_days,
        })
    }

    /// The tracing filter used when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug {
            "tasklane=debug,tower_http=debug,info"
        } else {
            "info"
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
