//! Viewer Configuration Settings
//!
//! # Environment Variables
//!
//! - `WS_URL`: Private feed endpoint (default: `ws://localhost:8080/ws`)
//! - `JWT_SECRET`: HS256 signing secret (default: `your-jwt-secret`)
//! - `USER_ID`: `sub` claim (default: `demo-user-123`)
//! - `USER_NAME`: `name` claim (default: `Demo User`)
//! - `JWT_TTL_SECS`: Token lifetime (default: 3600)

use relay_core::env::{parse_or, process_env, string_or};
use relay_core::jwt::{self, Claims, DEFAULT_TTL_SECS, JwtError};

/// Default private feed endpoint.
pub const DEFAULT_WS_URL: &str = "ws://localhost:8080/ws";

/// Placeholder secret matching the relay's development default.
pub const DEFAULT_JWT_SECRET: &str = "your-jwt-secret";

const DEFAULT_USER_ID: &str = "demo-user-123";
const DEFAULT_USER_NAME: &str = "Demo User";

/// Secret used to sign feed tokens.
#[derive(Clone, PartialEq, Eq)]
pub struct JwtSecret(String);

impl JwtSecret {
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
}

impl std::fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("JwtSecret([REDACTED])")
    }
}

/// Complete viewer configuration.
#[derive(Debug, Clone)]
pub struct FrontendConfig {
    /// Private feed endpoint; the public one is derived from it.
    pub ws_url: String,
    /// Token signing secret.
    pub jwt_secret: JwtSecret,
    /// `sub` claim.
    pub user_id: String,
    /// `name` claim.
    pub user_name: String,
    /// Token lifetime in seconds.
    pub jwt_ttl_secs: i64,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            ws_url: DEFAULT_WS_URL.to_string(),
            jwt_secret: JwtSecret::new(DEFAULT_JWT_SECRET),
            user_id: DEFAULT_USER_ID.to_string(),
            user_name: DEFAULT_USER_NAME.to_string(),
            jwt_ttl_secs: DEFAULT_TTL_SECS,
        }
    }
}

impl FrontendConfig {
    /// Create configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(process_env)
    }

    /// Create configuration from an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_ttl_secs = match parse_or(&lookup, "JWT_TTL_SECS", DEFAULT_TTL_SECS) {
            ttl if ttl > 0 => ttl,
            ttl => {
                tracing::warn!(ttl, "JWT_TTL_SECS must be positive, using default");
                DEFAULT_TTL_SECS
            }
        };

        Self {
            ws_url: string_or(&lookup, "WS_URL", DEFAULT_WS_URL),
            jwt_secret: JwtSecret::new(string_or(&lookup, "JWT_SECRET", DEFAULT_JWT_SECRET)),
            user_id: string_or(&lookup, "USER_ID", DEFAULT_USER_ID),
            user_name: string_or(&lookup, "USER_NAME", DEFAULT_USER_NAME),
            jwt_ttl_secs,
        }
    }

    /// Claims issued at `now_secs`.
    #[must_use]
    pub fn claims_at(&self, now_secs: i64) -> Claims {
        Claims::new(&self.user_id, &self.user_name, now_secs, self.jwt_ttl_secs)
    }

    /// Signed feed token issued at `now_secs`.
    pub fn sign_token(&self, now_secs: i64) -> Result<String, JwtError> {
        jwt::sign(&self.claims_at(now_secs), self.jwt_secret.as_bytes())
    }
}
