//! Client configuration

use crate::{ClientError, ClientResult};
use std::time::Duration;

/// Base URL used when `ALLOC_API_BASE_URL` is not set
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api";

/// Request timeout used when `ALLOC_API_TIMEOUT_SECS` is not set
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_BASE_URL: &str = "ALLOC_API_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "ALLOC_API_TIMEOUT_SECS";

/// Client configuration for connecting to the allocation backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL (e.g., "http://localhost:3001/api")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Optional User-Agent header
    pub user_agent: Option<String>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }

    /// Read `ALLOC_API_BASE_URL` and `ALLOC_API_TIMEOUT_SECS`, falling back
    /// to the defaults for unset variables
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ClientResult<Self> {
        let base_url = lookup(ENV_BASE_URL)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = match lookup(ENV_TIMEOUT_SECS) {
            None => DEFAULT_TIMEOUT_SECS,
            Some(raw) => raw.trim().parse().map_err(|_| {
                ClientError::InvalidConfig(format!("{ENV_TIMEOUT_SECS} must be whole seconds, got {raw:?}"))
            })?,
        };

        let config = Self::new(base_url).with_timeout(timeout);
        config.validate()?;
        Ok(config)
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the User-Agent header
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Reject configurations no request could succeed with
    pub fn validate(&self) -> ClientResult<()> {
        let url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidConfig(format!("base URL {:?}: {e}", self.base_url)))?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidConfig(format!(
                "base URL {:?} is not an http(s) URL",
                self.base_url
            )));
        }
        if self.timeout == 0 {
            return Err(ClientError::InvalidConfig("timeout must be positive".into()));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.base_url, "http://localhost:3001/api");
        assert_eq!(config.timeout_duration(), Duration::from_secs(30));
    }

    #[test]
    fn test_env_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "https://alloc.example.com/api"),
            (ENV_TIMEOUT_SECS, " 5 "),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://alloc.example.com/api");
        assert_eq!(config.timeout, 5);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let bad_timeout = ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "soon")]));
        assert!(matches!(bad_timeout, Err(ClientError::InvalidConfig(_))));

        let zero = ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "0")]));
        assert!(matches!(zero, Err(ClientError::InvalidConfig(_))));

        let bad_url = ClientConfig::from_lookup(lookup(&[(ENV_BASE_URL, "localhost:3001")]));
        assert!(matches!(bad_url, Err(ClientError::InvalidConfig(_))));
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("http://127.0.0.1:9000/api")
            .with_timeout(3)
            .with_user_agent("alloc-dashboard/0.1");
        assert_eq!(config.user_agent.as_deref(), Some("alloc-dashboard/0.1"));
        assert!(config.validate().is_ok());
    }
}
