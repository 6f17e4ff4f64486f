//! Probe configuration with environment overrides.

use std::time::Duration;

use reqwest::Url;

use crate::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://humansa.youwo.ai";
pub const DEFAULT_USER_ID: &str = "test-user-001";
pub const DEFAULT_CONVERSATION_ID: &str = "test-conv-001";
pub const DEFAULT_PACING: Duration = Duration::from_secs(1);

const ENV_BASE_URL: &str = "HUMANSA_BASE_URL";
const ENV_USER_ID: &str = "HUMANSA_USER_ID";
const ENV_CONVERSATION_ID: &str = "HUMANSA_CONVERSATION_ID";
const ENV_PACING_MS: &str = "HUMANSA_PACING_MS";

/// Everything a run needs to know about its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Target host, e.g. `https://humansa.youwo.ai`.
    pub base_url: String,
    /// Synthetic user identifier placed in request payloads.
    pub user_id: String,
    /// Synthetic conversation identifier placed in request payloads.
    pub conversation_id: String,
    /// Pause between consecutive checks.
    pub pacing: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            conversation_id: DEFAULT_CONVERSATION_ID.to_string(),
            pacing: DEFAULT_PACING,
        }
    }
}

impl ProbeConfig {
    /// Creates a config for the given base URL with default identifiers and no pacing.
    pub fn for_base_url(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = validate_base_url(base_url.into())?;
        Ok(Self {
            base_url,
            pacing: Duration::ZERO,
            ..Self::default()
        })
    }

    /// Builds a config from `HUMANSA_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let base_url = lookup(ENV_BASE_URL).unwrap_or(defaults.base_url);
        let base_url = validate_base_url(base_url)?;

        let pacing = match lookup(ENV_PACING_MS) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidValue {
                    key: ENV_PACING_MS.to_string(),
                    value: raw,
                })?,
            None => defaults.pacing,
        };

        Ok(Self {
            base_url,
            user_id: lookup(ENV_USER_ID).unwrap_or(defaults.user_id),
            conversation_id: lookup(ENV_CONVERSATION_ID).unwrap_or(defaults.conversation_id),
            pacing,
        })
    }

    /// Joins an endpoint path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Checks the scheme and strips any trailing slash.
fn validate_base_url(raw: String) -> Result<String, ConfigError> {
    let parsed = Url::parse(&raw).map_err(|e| ConfigError::InvalidBaseUrl {
        url: raw.clone(),
        reason: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl {
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
            url: raw,
        });
    }

    Ok(raw.trim_end_matches('/').to_string())
}
