//! Client configuration.

use crate::error::{Result, SolverError};
use serde::Deserialize;
use std::time::Duration;

/// Default submit endpoint.
pub const DEFAULT_SUBMIT_URL: &str = "http://rucaptcha.com/in.php";

/// Default poll/balance/report endpoint.
pub const DEFAULT_POLL_URL: &str = "http://rucaptcha.com/res.php";

/// Default delay between polls.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_millis(3000);

/// Settings a [`Solver`](crate::Solver) is built from.
///
/// Field names follow the JSON settings object accepted by [`SolverConfig::from_json`]:
///
/// ```json
/// { "apiKey": "1abc...", "retryInterval": 3000, "timeout": 120000 }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolverConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    /// Milliseconds between polls; missing or zero means 3000
    #[serde(default)]
    pub retry_interval: Option<u64>,
    /// Overall poll timeout in milliseconds; none by default
    #[serde(default)]
    pub timeout: Option<u64>,
    #[serde(default)]
    pub submit_url: Option<String>,
    #[serde(default)]
    pub poll_url: Option<String>,
}

impl SolverConfig {
    /// Config holding only an API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            retry_interval: None,
            timeout: None,
            submit_url: None,
            poll_url: None,
        }
    }

    /// Parse a JSON settings object.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Build from an already parsed settings value. Anything other than an
    /// object is rejected.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        if !value.is_object() {
            return Err(SolverError::Configuration(
                "No settings found for solver".into(),
            ));
        }
        serde_json::from_value(value).map_err(|e| SolverError::Configuration(e.to_string()))
    }

    /// Read `RUCAPTCHA_API_KEY`, `RUCAPTCHA_RETRY_INTERVAL_MS` and `RUCAPTCHA_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_key: std::env::var("RUCAPTCHA_API_KEY").ok(),
            retry_interval: env_millis("RUCAPTCHA_RETRY_INTERVAL_MS")?,
            timeout: env_millis("RUCAPTCHA_TIMEOUT_MS")?,
            submit_url: None,
            poll_url: None,
        })
    }

    /// The API key, rejecting a missing or blank one.
    pub fn require_api_key(&self) -> Result<&str> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(SolverError::Configuration("Can't find api key".into())),
        }
    }

    pub fn retry_interval(&self) -> Duration {
        match self.retry_interval {
            Some(ms) if ms > 0 => Duration::from_millis(ms),
            _ => DEFAULT_RETRY_INTERVAL,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.filter(|ms| *ms > 0).map(Duration::from_millis)
    }
}

fn env_millis(name: &str) -> Result<Option<u64>> {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse::<u64>().map(Some).map_err(|_| {
            SolverError::Configuration(format!("{} must be a whole number of milliseconds", name))
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_reads_camel_case() {
        let config =
            SolverConfig::from_json(r#"{"apiKey":"abc","retryInterval":300,"timeout":5000}"#)
                .unwrap();
        assert_eq!(config.require_api_key().unwrap(), "abc");
        assert_eq!(config.retry_interval(), Duration::from_millis(300));
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_null_settings_rejected() {
        assert!(matches!(
            SolverConfig::from_json("null"),
            Err(SolverError::Configuration(_))
        ));
        assert!(matches!(
            SolverConfig::from_value(serde_json::json!("key")),
            Err(SolverError::Configuration(_))
        ));
    }

    #[test]
    fn test_missing_or_blank_key_rejected() {
        let config = SolverConfig::from_json("{}").unwrap();
        assert!(matches!(
            config.require_api_key(),
            Err(SolverError::Configuration(_))
        ));
        assert!(SolverConfig::new("  ").require_api_key().is_err());
    }

    #[test]
    fn test_zero_interval_uses_default() {
        let config = SolverConfig::from_json(r#"{"apiKey":"k","retryInterval":0}"#).unwrap();
        assert_eq!(config.retry_interval(), DEFAULT_RETRY_INTERVAL);
        assert_eq!(SolverConfig::new("k").retry_interval(), DEFAULT_RETRY_INTERVAL);
        assert_eq!(config.timeout(), None);
    }
}
