//! Time-Window Tokens
//!
//! Short-lived, URL-safe tokens proving possession of the shared secret.
//! The backend accepts them on the `X-API-Token` header of the publish
//! endpoints.
//!
//! # Generation
//!
//! 1. `window_index = floor(now / window_seconds)`
//! 2. `mac = HMAC-SHA256(secret, decimal(window_index))`
//! 3. `inner = decimal(window_index) + ":" + base64url_no_pad(mac)`
//! 4. `token = base64url_no_pad(inner)`
//!
//! Two calls inside the same window with the same secret produce identical
//! tokens. Nothing is stored; validity is implied by recomputation on the
//! receiving side.
//!
//! # Verification
//!
//! [`verify_token`] implements the backend's acceptance rule: the embedded
//! window index must lie within `allowed_skew` windows of the verifier's
//! current window and the MAC must match.

mod encoding;
mod verify;
mod window;

use hmac::Hmac;
use sha2::Sha256;
use thiserror::Error;

pub use encoding::{decode_url_safe, encode_url_safe, to_url_safe};
pub use verify::{DecodedToken, VerifyError, decode_token, verify_token};
pub use window::{TimeTokenSigner, generate_token};

// =============================================================================
// Constants
// =============================================================================

/// Default time window in seconds (one hour).
pub const DEFAULT_TIME_WINDOW_SECS: i64 = 3600;

/// Default number of neighbouring windows the backend accepts on either side.
pub const DEFAULT_ALLOWED_CLOCK_SKEW: u32 = 1;

/// HTTP header that carries the token.
pub const API_TOKEN_HEADER: &str = "X-API-Token";

type HmacSha256 = Hmac<Sha256>;

// =============================================================================
// Error Types
// =============================================================================

/// Errors raised while generating a token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Window size, timestamp, or key was unusable.
    #[error("invalid token configuration: {0}")]
    InvalidConfiguration(String),
}
