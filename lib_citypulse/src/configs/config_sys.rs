//! Runtime configuration, read once from the process environment at startup.
//! There is no runtime reconfiguration: construct a [`RuntimeConfig`] early
//! and hand it to the clients that need it.

use std::env;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_HTTP_RETRIES: u32 = 3;

const ENV_API_URL: &str = "CITYPULSE_API_URL";
const ENV_API_TOKEN: &str = "CITYPULSE_API_TOKEN";
const ENV_HTTP_TIMEOUT_SECS: &str = "CITYPULSE_HTTP_TIMEOUT_SECS";
const ENV_HTTP_RETRIES: &str = "CITYPULSE_HTTP_RETRIES";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid API base URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("cannot derive a websocket URL from {0:?}")]
    UnsupportedScheme(String),

    #[error("environment variable {0} is not valid unicode")]
    MalformedEnvVar(String),

    #[error("environment variable {name} is not a valid number: {value:?}")]
    MalformedNumber { name: String, value: String },
}

/// Resolved process configuration for the data layer.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Base URL of the feedback REST API.
    pub api_base_url: Url,
    /// Push-channel URL, derived from the base URL (scheme swapped to
    /// ws/wss, `/ws` appended).
    pub ws_url: Url,
    /// Optional bearer token for the REST API.
    pub api_token: Option<String>,
    /// Defensive per-request timeout.
    pub http_timeout: Duration,
    /// Transient-failure retries performed by the HTTP client middleware.
    pub http_retries: u32,
}

impl RuntimeConfig {
    /// Loads configuration from the environment, after sourcing an optional
    /// `.env` file. Unset variables fall back to defaults; the default API
    /// endpoint is a local development server.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let raw_url = env_var(ENV_API_URL)?.unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_base_url = Url::parse(&raw_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: raw_url.clone(),
            source,
        })?;
        let ws_url = websocket_url_for(&api_base_url)?;

        Ok(Self {
            ws_url,
            api_base_url,
            api_token: env_var(ENV_API_TOKEN)?,
            http_timeout: Duration::from_secs(
                env_number(ENV_HTTP_TIMEOUT_SECS)?.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
            ),
            http_retries: env_number(ENV_HTTP_RETRIES)?.unwrap_or(u64::from(DEFAULT_HTTP_RETRIES))
                as u32,
        })
    }

    /// A configuration pointing at an explicit base URL, with defaults for
    /// everything else. Used by the integration runners.
    pub fn for_endpoint(api_base_url: Url) -> Result<Self, ConfigError> {
        let ws_url = websocket_url_for(&api_base_url)?;
        Ok(Self {
            ws_url,
            api_base_url,
            api_token: None,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            http_retries: DEFAULT_HTTP_RETRIES,
        })
    }
}

/// Derives the push-channel URL from the REST base URL: `http` becomes `ws`
/// (`https` becomes `wss`) and `/ws` is appended to the path.
pub fn websocket_url_for(base: &Url) -> Result<Url, ConfigError> {
    let scheme = match base.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        _ => return Err(ConfigError::UnsupportedScheme(base.to_string())),
    };

    let mut ws = base.clone();
    ws.set_scheme(scheme)
        .map_err(|_| ConfigError::UnsupportedScheme(base.to_string()))?;
    let path = format!("{}/ws", base.path().trim_end_matches('/'));
    ws.set_path(&path);
    Ok(ws)
}

fn env_var(name: &str) -> Result<Option<String>, ConfigError> {
    match env::var(name) {
        Ok(value) if value.is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::MalformedEnvVar(name.to_string())),
    }
}

fn env_number(name: &str) -> Result<Option<u64>, ConfigError> {
    match env_var(name)? {
        Some(value) => value
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::MalformedNumber {
                name: name.to_string(),
                value,
            }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_ws_url_from_http_base() {
        let base = Url::parse("http://localhost:8000").unwrap();
        let ws = websocket_url_for(&base).unwrap();
        assert_eq!(ws.as_str(), "ws://localhost:8000/ws");
    }

    #[test]
    fn derives_wss_url_from_https_base() {
        let base = Url::parse("https://feedback.example.org/api/").unwrap();
        let ws = websocket_url_for(&base).unwrap();
        assert_eq!(ws.as_str(), "wss://feedback.example.org/api/ws");
    }

    #[test]
    fn rejects_non_http_schemes() {
        let base = Url::parse("ftp://feedback.example.org").unwrap();
        assert!(matches!(
            websocket_url_for(&base),
            Err(ConfigError::UnsupportedScheme(_))
        ));
    }
}
