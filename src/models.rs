//! Data models and structures
//!
//! Defines the request/response payloads exchanged with the lyric-generation
//! API and the client configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://poetry-generator-ku0q.onrender.com";
pub const DEFAULT_TOP_K: u32 = 5;
pub const MAX_TOP_K: u32 = 20;

/// Request body for `POST /generate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateRequest {
    pub query: String,
    pub top_k: u32,
}

/// Successful response body for `POST /generate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateResponse {
    pub lyrics: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    pub context: String,
    /// Full prompt the backend handed to its model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

impl GenerateResponse {
    /// Reasoning trace, treating an empty string as absent.
    pub fn reasoning(&self) -> Option<&str> {
        self.reasoning.as_deref().filter(|r| !r.is_empty())
    }
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    pub detail: Option<String>,
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub top_k: u32,
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            top_k: DEFAULT_TOP_K,
            timeout: None,
        }
    }
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base = lookup("LYRICS_API_BASE")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let top_k = match lookup("LYRICS_TOP_K") {
            Some(raw) => parse_top_k(&raw).map_err(crate::Error::Config)?,
            None => DEFAULT_TOP_K,
        };

        let timeout = match lookup("LYRICS_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    crate::Error::Config(format!("LYRICS_TIMEOUT_SECS '{}' is not a number", raw))
                })?;
                if secs == 0 {
                    return Err(crate::Error::Config(
                        "LYRICS_TIMEOUT_SECS must be at least 1".to_string(),
                    ));
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            api_base,
            top_k,
            timeout,
        })
    }
}

/// Parse a result count, accepting 1..=MAX_TOP_K.
pub fn parse_top_k(input: &str) -> std::result::Result<u32, String> {
    let value: u32 = input
        .trim()
        .parse()
        .map_err(|_| format!("Invalid result count '{}'", input))?;
    if value == 0 || value > MAX_TOP_K {
        return Err(format!(
            "Result count must be between 1 and {}, got {}",
            MAX_TOP_K, value
        ));
    }
    Ok(value)
}
