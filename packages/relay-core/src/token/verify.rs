//! Token decoding and verification.

use hmac::Mac;
use thiserror::Error;

use super::TokenError;
use super::encoding::decode_url_safe;
use super::window::{new_mac, window_index};

/// Errors raised while decoding or verifying a token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// Outer layer is not valid base64.
    #[error("token is not valid base64: {0}")]
    Encoding(String),

    /// Inner string is not `<window>:<mac>`.
    #[error("malformed token: {0}")]
    Malformed(String),

    /// Token was minted for a window too far from the verifier's.
    #[error("token window {window} outside {current}±{skew}")]
    WindowOutOfRange {
        /// Window index carried by the token.
        window: i64,
        /// Verifier's current window index.
        current: i64,
        /// Accepted distance in windows.
        skew: u32,
    },

    /// MAC does not match the secret.
    #[error("token MAC mismatch")]
    MacMismatch,

    /// Verifier configuration is unusable.
    #[error(transparent)]
    Configuration(#[from] TokenError),
}

/// Parts of a decoded token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedToken {
    /// Window index the token was minted for.
    pub window_index: i64,
    /// URL-safe, unpadded base64 MAC.
    pub mac: String,
}

struct RawParts {
    window_label: String,
    window_index: i64,
    mac: String,
}

fn split_token(token: &str) -> Result<RawParts, VerifyError> {
    let bytes = decode_url_safe(token).map_err(|e| VerifyError::Encoding(e.to_string()))?;
    let inner = String::from_utf8(bytes)
        .map_err(|_| VerifyError::Malformed("payload is not UTF-8".to_string()))?;

    let parts: Vec<&str> = inner.split(':').collect();
    let [window_label, mac] = parts.as_slice() else {
        return Err(VerifyError::Malformed(format!(
            "expected 2 parts, got {}",
            parts.len()
        )));
    };

    let window_index = window_label
        .parse::<i64>()
        .map_err(|e| VerifyError::Malformed(format!("invalid window index: {e}")))?;

    Ok(RawParts {
        window_label: (*window_label).to_string(),
        window_index,
        mac: (*mac).to_string(),
    })
}

/// Strip the outer encoding and split the inner `<window>:<mac>` string.
///
/// # Errors
///
/// Returns [`VerifyError::Encoding`] or [`VerifyError::Malformed`].
pub fn decode_token(token: &str) -> Result<DecodedToken, VerifyError> {
    let parts = split_token(token)?;
    Ok(DecodedToken {
        window_index: parts.window_index,
        mac: parts.mac,
    })
}

/// Check a token the way the backend's publish middleware does.
///
/// Accepts windows in `[current - allowed_skew, current + allowed_skew]`
/// where `current` is the window containing `now_seconds`. The MAC is
/// recomputed over the window label exactly as transmitted and compared in
/// constant time. Returns the token's window index on success.
///
/// # Errors
///
/// Returns the first [`VerifyError`] encountered.
pub fn verify_token(
    token: &str,
    secret: &[u8],
    window_seconds: i64,
    allowed_skew: u32,
    now_seconds: f64,
) -> Result<i64, VerifyError> {
    let current = window_index(window_seconds, now_seconds)?;
    let parts = split_token(token)?;

    let skew = i64::from(allowed_skew);
    if parts.window_index < current.saturating_sub(skew)
        || parts.window_index > current.saturating_add(skew)
    {
        return Err(VerifyError::WindowOutOfRange {
            window: parts.window_index,
            current,
            skew: allowed_skew,
        });
    }

    let received = decode_url_safe(&parts.mac).map_err(|_| VerifyError::MacMismatch)?;
    new_mac(secret, &parts.window_label)?
        .verify_slice(&received)
        .map_err(|_| VerifyError::MacMismatch)?;

    Ok(parts.window_index)
}
