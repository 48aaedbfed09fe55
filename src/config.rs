//! Bridge connection settings.

use std::net::Ipv6Addr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::Error;

type Result<T> = std::result::Result<T, Error>;

/// Connection settings for a single bridge.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use hue_bridge_rs::BridgeConfig;
///
/// let config = BridgeConfig::new("192.168.1.2")
///     .unwrap()
///     .with_username("83b7780291a6ceffbe0bd049104df")
///     .with_timeout(Duration::from_secs(3));
/// assert_eq!(config.host(), "192.168.1.2");
/// assert_eq!(config.timeout(), Some(Duration::from_secs(3)));
/// ```
#[serde_with::skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BridgeConfig {
    host: String,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    timeout_ms: Option<u64>,
}

impl BridgeConfig {
    /// Create settings for the bridge at `host` (name or IP, optionally with `:port`).
    pub fn new(host: &str) -> Result<Self> {
        let host = Self::validate_host(host)?;
        Ok(BridgeConfig {
            host,
            username: None,
            timeout_ms: None,
        })
    }

    /// Load settings from a JSON document such as
    /// `{"host": "10.0.0.2", "username": "abc", "timeoutMs": 2000}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: BridgeConfig = serde_json::from_str(json).map_err(Error::JsonLoad)?;
        config.host = Self::validate_host(&config.host)?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(Error::JsonDump)
    }

    pub fn with_username(mut self, username: &str) -> Self {
        self.username = Some(username.to_string());
        self
    }

    /// Timeout applied by the default adapter to each request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    pub(crate) fn set_username(&mut self, username: Option<String>) {
        self.username = username;
    }

    // Bare IPv6 literals are bracketed so they can be placed in a URL authority.
    fn validate_host(host: &str) -> Result<String> {
        let host = host.trim();
        if host.is_empty() || host.contains('/') || host.contains(char::is_whitespace) {
            return Err(Error::InvalidHost(host.to_string()));
        }
        if host.parse::<Ipv6Addr>().is_ok() {
            return Ok(format!("[{}]", host));
        }
        if host.matches(':').count() > 1 && !host.starts_with('[') {
            return Err(Error::InvalidHost(host.to_string()));
        }
        Ok(host.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_host() {
        assert!(matches!(BridgeConfig::new(""), Err(Error::InvalidHost(_))));
        assert!(matches!(
            BridgeConfig::new("http://10.0.0.2"),
            Err(Error::InvalidHost(_))
        ));
        assert_eq!(BridgeConfig::new(" 10.0.0.2 ").unwrap().host(), "10.0.0.2");
    }

    #[test]
    fn test_ipv6_host() {
        assert_eq!(BridgeConfig::new("::1").unwrap().host(), "[::1]");
        assert_eq!(BridgeConfig::new("fe80::1").unwrap().host(), "[fe80::1]");
        assert_eq!(BridgeConfig::new("[::1]:8080").unwrap().host(), "[::1]:8080");
        assert!(matches!(
            BridgeConfig::new("fe80::1::zz"),
            Err(Error::InvalidHost(_))
        ));
    }

    #[test]
    fn test_from_json() {
        let config =
            BridgeConfig::from_json(r#"{"host": "10.0.0.2:8080", "timeoutMs": 2000}"#).unwrap();
        assert_eq!(config.host(), "10.0.0.2:8080");
        assert_eq!(config.username(), None);
        assert_eq!(config.timeout(), Some(Duration::from_millis(2000)));

        assert!(matches!(
            BridgeConfig::from_json(r#"{"username": "abc"}"#),
            Err(Error::JsonLoad(_))
        ));
        assert!(matches!(
            BridgeConfig::from_json(r#"{"host": ""}"#),
            Err(Error::InvalidHost(_))
        ));
    }

    #[test]
    fn test_to_json_skips_unset() {
        let config = BridgeConfig::new("bridge.local").unwrap();
        assert_eq!(config.to_json().unwrap(), r#"{"host":"bridge.local"}"#);
    }
}
