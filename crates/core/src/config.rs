//! Startup configuration for the relay and the widget
//!
//! Values come from the process environment. Loading goes through a lookup
//! function so callers can supply any source.

use crate::{Error, Result};
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_LINE_API_BASE: &str = "https://api.line.me";
pub const DEFAULT_BACKEND_BASE_URL: &str = "http://localhost:3001";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Server-side relay configuration
#[derive(Clone)]
pub struct RelayConfig {
    /// Channel access token used as the bearer credential upstream
    pub channel_access_token: String,
    pub line_api_base: String,
    pub listen_addr: SocketAddr,
    pub http_timeout: Duration,
}

// The token must never reach logs
impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("channel_access_token", &"<redacted>")
            .field("line_api_base", &self.line_api_base)
            .field("listen_addr", &self.listen_addr)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

impl RelayConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup. Fails when the token is absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let channel_access_token = required(&lookup, "LINE_CHANNEL_ACCESS_TOKEN")?;

        let line_api_base = lookup("LINE_API_BASE")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LINE_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        let listen_addr = lookup("RELAY_LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen_addr
            .parse::<SocketAddr>()
            .map_err(|_| Error::Config(format!("RELAY_LISTEN_ADDR is not a socket address: {}", listen_addr)))?;

        Ok(Self {
            channel_access_token,
            line_api_base,
            listen_addr,
            http_timeout: timeout(&lookup)?,
        })
    }
}

/// Client-side widget configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Public LIFF app identifier passed to the SDK's `init`
    pub liff_id: String,
    pub backend_base_url: String,
    pub http_timeout: Duration,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Accepts `NEXT_PUBLIC_LIFF_ID` or `LIFF_ID`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let liff_id = match required(&lookup, "NEXT_PUBLIC_LIFF_ID") {
            Ok(id) => id,
            Err(_) => required(&lookup, "LIFF_ID")?,
        };

        let backend_base_url = lookup("BACKEND_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            liff_id,
            backend_base_url,
            http_timeout: timeout(&lookup)?,
        })
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(Error::Config(format!("{} is required", key))),
    }
}

fn timeout<F>(lookup: &F) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup("HTTP_TIMEOUT_SECS") {
        None => Ok(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS)),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .ok_or_else(|| Error::Config(format!("HTTP_TIMEOUT_SECS must be a positive integer, got {:?}", raw))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_relay_requires_token() {
        let err = RelayConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = RelayConfig::from_lookup(lookup_from(&[("LINE_CHANNEL_ACCESS_TOKEN", "  ")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_relay_defaults() {
        let config =
            RelayConfig::from_lookup(lookup_from(&[("LINE_CHANNEL_ACCESS_TOKEN", "secret")]))
                .unwrap();
        assert_eq!(config.channel_access_token, "secret");
        assert_eq!(config.line_api_base, DEFAULT_LINE_API_BASE);
        assert_eq!(config.listen_addr.port(), 3000);
        assert_eq!(config.http_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_relay_debug_redacts_token() {
        let config =
            RelayConfig::from_lookup(lookup_from(&[("LINE_CHANNEL_ACCESS_TOKEN", "secret")]))
                .unwrap();
        assert!(!format!("{:?}", config).contains("secret"));
    }

    #[test]
    fn test_client_config_fallbacks() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("LIFF_ID", "1650000000-abc"),
            ("BACKEND_BASE_URL", "https://points.example.com/"),
        ]))
        .unwrap();
        assert_eq!(config.liff_id, "1650000000-abc");
        assert_eq!(config.backend_base_url, "https://points.example.com");

        let config =
            ClientConfig::from_lookup(lookup_from(&[("NEXT_PUBLIC_LIFF_ID", "x")])).unwrap();
        assert_eq!(config.backend_base_url, DEFAULT_BACKEND_BASE_URL);
    }

    #[test]
    fn test_bad_timeout_rejected() {
        let result = ClientConfig::from_lookup(lookup_from(&[
            ("LIFF_ID", "x"),
            ("HTTP_TIMEOUT_SECS", "0"),
        ]));
        assert!(result.is_err());
    }
}
