//! Simulator Configuration Settings
//!
//! # Environment Variables
//!
//! - `API_URL`: Private endpoint (default: `http://localhost:8080/update`)
//! - `PUBLISH_URL`: Public endpoint (default: `http://localhost:8080/publish`)
//! - `TIME_TOKEN_SECRET`: Shared HMAC secret (default: `your-time-token-secret`)
//! - `TIME_WINDOW_SECONDS`: Token window (default: 3600)
//! - `SIMULATOR_REQUEST_TIMEOUT_MS`: Per-request timeout (default: 5000)
//! - `SIMULATOR_ORDER_DELAY_MS`: Pause between batch orders (default: 500)

use std::time::Duration;

use relay_core::env::{parse_or, string_or};
use relay_core::{DEFAULT_TIME_WINDOW_SECS, TimeTokenSigner, TokenError};

/// Default private endpoint.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/update";

/// Default public endpoint.
pub const DEFAULT_PUBLISH_URL: &str = "http://localhost:8080/publish";

/// Placeholder secret matching the relay's development default.
pub const DEFAULT_TIME_TOKEN_SECRET: &str = "your-time-token-secret";

/// Characters of the secret shown in the banner.
const SECRET_PREVIEW_CHARS: usize = 10;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(5000);
const DEFAULT_ORDER_DELAY: Duration = Duration::from_millis(500);

/// Shared secret for time-window tokens.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenSecret(String);

impl TokenSecret {
    /// Wrap a secret.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Raw secret bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Whether the secret is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First ten characters followed by `...`.
    #[must_use]
    pub fn preview(&self) -> String {
        let head: String = self.0.chars().take(SECRET_PREVIEW_CHARS).collect();
        format!("{head}...")
    }
}

impl std::fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TokenSecret([REDACTED])")
    }
}

/// Complete simulator configuration.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Private endpoint (`/update`).
    pub api_url: String,
    /// Public endpoint (`/publish`).
    pub publish_url: String,
    /// Shared token secret.
    pub time_token_secret: TokenSecret,
    /// Token window in seconds.
    pub time_window_secs: i64,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Pause after each order of a batch.
    pub order_delay: Duration,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            publish_url: DEFAULT_PUBLISH_URL.to_string(),
            time_token_secret: TokenSecret::new(DEFAULT_TIME_TOKEN_SECRET),
            time_window_secs: DEFAULT_TIME_WINDOW_SECS,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            order_delay: DEFAULT_ORDER_DELAY,
        }
    }
}

impl SimulatorConfig {
    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `TIME_WINDOW_SECONDS` is negative.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if `TIME_WINDOW_SECONDS` is negative.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        // TIME_TOKEN_SECRET may be deliberately set to an empty string.
        let time_token_secret = lookup("TIME_TOKEN_SECRET")
            .map_or(defaults.time_token_secret, TokenSecret::new);
        if time_token_secret.is_empty() {
            tracing::warn!("TIME_TOKEN_SECRET is set but empty; tokens are signed with an empty key");
        }

        let time_window_secs = parse_time_window(lookup("TIME_WINDOW_SECONDS"))?;

        Ok(Self {
            api_url: string_or(&lookup, "API_URL", DEFAULT_API_URL),
            publish_url: string_or(&lookup, "PUBLISH_URL", DEFAULT_PUBLISH_URL),
            time_token_secret,
            time_window_secs,
            request_timeout: Duration::from_millis(parse_or(
                &lookup,
                "SIMULATOR_REQUEST_TIMEOUT_MS",
                millis(defaults.request_timeout),
            )),
            order_delay: Duration::from_millis(parse_or(
                &lookup,
                "SIMULATOR_ORDER_DELAY_MS",
                millis(defaults.order_delay),
            )),
        })
    }

    /// Token signer for this secret and window.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidConfiguration`] if the window is not positive.
    pub fn signer(&self) -> Result<TimeTokenSigner, TokenError> {
        TimeTokenSigner::new(self.time_token_secret.as_bytes(), self.time_window_secs)
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Environment variable has an unusable value.
    #[error("invalid value for {key}: {value}")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// Offending value.
        value: String,
    },
}

/// Unset, unparseable, or zero falls back to the default; negative is rejected.
fn parse_time_window(raw: Option<String>) -> Result<i64, ConfigError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_TIME_WINDOW_SECS);
    };

    match raw.trim().parse::<i64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        Ok(0) => Ok(DEFAULT_TIME_WINDOW_SECS),
        Ok(_) => Err(ConfigError::InvalidValue {
            key: "TIME_WINDOW_SECONDS".to_string(),
            value: raw,
        }),
        Err(_) => {
            tracing::warn!(value = %raw, "TIME_WINDOW_SECONDS is not an integer, using default");
            Ok(DEFAULT_TIME_WINDOW_SECS)
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = SimulatorConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.publish_url, DEFAULT_PUBLISH_URL);
        assert_eq!(config.time_token_secret.as_bytes(), b"your-time-token-secret");
        assert_eq!(config.time_window_secs, 3600);
        assert_eq!(config.request_timeout, Duration::from_millis(5000));
        assert_eq!(config.order_delay, Duration::from_millis(500));
    }

    #[test]
    fn overrides_from_lookup() {
        let config = SimulatorConfig::from_lookup(lookup(&[
            ("API_URL", "http://relay:9000/update"),
            ("PUBLISH_URL", "http://relay:9000/publish"),
            ("TIME_TOKEN_SECRET", "s3cret"),
            ("TIME_WINDOW_SECONDS", "60"),
            ("SIMULATOR_REQUEST_TIMEOUT_MS", "250"),
            ("SIMULATOR_ORDER_DELAY_MS", "0"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "http://relay:9000/update");
        assert_eq!(config.publish_url, "http://relay:9000/publish");
        assert_eq!(config.time_token_secret.as_bytes(), b"s3cret");
        assert_eq!(config.time_window_secs, 60);
        assert_eq!(config.request_timeout, Duration::from_millis(250));
        assert_eq!(config.order_delay, Duration::ZERO);
    }

    #[test]
    fn zero_or_garbage_window_uses_default() {
        for raw in ["0", "abc", "", "1.5"] {
            let config =
                SimulatorConfig::from_lookup(lookup(&[("TIME_WINDOW_SECONDS", raw)])).unwrap();
            assert_eq!(config.time_window_secs, DEFAULT_TIME_WINDOW_SECS, "{raw}");
        }
    }

    #[test]
    fn negative_window_is_rejected() {
        let err =
            SimulatorConfig::from_lookup(lookup(&[("TIME_WINDOW_SECONDS", "-5")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref key, ref value } if key == "TIME_WINDOW_SECONDS" && value == "-5"
        ));
    }

    #[test]
    fn empty_secret_is_kept() {
        let config =
            SimulatorConfig::from_lookup(lookup(&[("TIME_TOKEN_SECRET", "")])).unwrap();
        assert!(config.time_token_secret.is_empty());
        assert!(config.signer().unwrap().has_empty_secret());
    }

    #[test]
    fn secret_preview_truncates() {
        assert_eq!(
            TokenSecret::new("your-time-token-secret").preview(),
            "your-time-..."
        );
        assert_eq!(TokenSecret::new("short").preview(), "short...");
    }

    #[test]
    fn secret_redacted_debug() {
        let config = SimulatorConfig::default();
        let debug = format!("{config:?}");
        assert!(!debug.contains("your-time-token-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
