//! Token generation.

use chrono::Utc;
use hmac::{Mac, digest::KeyInit};

use super::encoding::encode_url_safe;
use super::{HmacSha256, TokenError};

/// Generate the token for the window containing `now_seconds`.
///
/// Pure function of its inputs. An empty secret is accepted.
///
/// # Errors
///
/// Returns [`TokenError::InvalidConfiguration`] when `window_seconds` is not
/// positive or `now_seconds` is negative or not finite.
pub fn generate_token(
    secret: &[u8],
    window_seconds: i64,
    now_seconds: f64,
) -> Result<String, TokenError> {
    let window_index = window_index(window_seconds, now_seconds)?;
    let window = window_index.to_string();
    let mac = encode_url_safe(&sign_window(secret, &window)?);
    let inner = format!("{window}:{mac}");
    Ok(encode_url_safe(inner.as_bytes()))
}

/// Compute `floor(now_seconds / window_seconds)`.
pub(super) fn window_index(window_seconds: i64, now_seconds: f64) -> Result<i64, TokenError> {
    if window_seconds <= 0 {
        return Err(TokenError::InvalidConfiguration(format!(
            "time window must be positive, got {window_seconds}"
        )));
    }
    if !now_seconds.is_finite() || now_seconds < 0.0 {
        return Err(TokenError::InvalidConfiguration(format!(
            "timestamp must be a non-negative number of seconds, got {now_seconds}"
        )));
    }

    // floor(t / w) == floor(t) / w for t >= 0 and integral w > 0
    let whole_seconds = now_seconds.floor() as i64;
    Ok(whole_seconds / window_seconds)
}

/// Keyed MAC over the decimal window label.
pub(super) fn new_mac(secret: &[u8], window: &str) -> Result<HmacSha256, TokenError> {
    let mut mac = <HmacSha256 as KeyInit>::new_from_slice(secret)
        .map_err(|e| TokenError::InvalidConfiguration(format!("HMAC key rejected: {e}")))?;
    mac.update(window.as_bytes());
    Ok(mac)
}

fn sign_window(secret: &[u8], window: &str) -> Result<Vec<u8>, TokenError> {
    Ok(new_mac(secret, window)?.finalize().into_bytes().to_vec())
}

/// Seconds since the Unix epoch, with millisecond resolution.
#[allow(clippy::cast_precision_loss)]
fn unix_now_seconds() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}

// =============================================================================
// Signer
// =============================================================================

/// Token generator bound to one secret and window size.
///
/// Built once from configuration and passed to whatever needs fresh tokens.
/// The `Debug` implementation redacts the secret.
#[derive(Clone)]
pub struct TimeTokenSigner {
    secret: Vec<u8>,
    window_seconds: i64,
}

impl TimeTokenSigner {
    /// Create a signer.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidConfiguration`] if `window_seconds` is not
    /// positive. An empty secret is accepted with a warning.
    pub fn new(secret: impl Into<Vec<u8>>, window_seconds: i64) -> Result<Self, TokenError> {
        let secret = secret.into();
        if window_seconds <= 0 {
            return Err(TokenError::InvalidConfiguration(format!(
                "time window must be positive, got {window_seconds}"
            )));
        }
        if secret.is_empty() {
            tracing::warn!("time token secret is empty; generated tokens are trivially forgeable");
        }
        Ok(Self {
            secret,
            window_seconds,
        })
    }

    /// Window size in seconds.
    #[must_use]
    pub const fn window_seconds(&self) -> i64 {
        self.window_seconds
    }

    /// Whether the configured secret is empty.
    #[must_use]
    pub fn has_empty_secret(&self) -> bool {
        self.secret.is_empty()
    }

    /// Window index containing `now_seconds`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidConfiguration`] for a negative timestamp.
    pub fn window_index_at(&self, now_seconds: f64) -> Result<i64, TokenError> {
        window_index(self.window_seconds, now_seconds)
    }

    /// Token for the window containing `now_seconds`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidConfiguration`] for a negative timestamp.
    pub fn token_at(&self, now_seconds: f64) -> Result<String, TokenError> {
        generate_token(&self.secret, self.window_seconds, now_seconds)
    }

    /// Token for the current wall-clock window.
    ///
    /// # Errors
    ///
    /// Only fails if the system clock reports a time before the epoch.
    pub fn current_token(&self) -> Result<String, TokenError> {
        let now = unix_now_seconds();
        let token = self.token_at(now)?;
        tracing::debug!(
            window = self.window_index_at(now)?,
            window_seconds = self.window_seconds,
            "Generated time token"
        );
        Ok(token)
    }
}

impl std::fmt::Debug for TimeTokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeTokenSigner")
            .field("secret", &"[REDACTED]")
            .field("window_seconds", &self.window_seconds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::token::encoding::decode_url_safe;

    const SECRET: &[u8] = b"test-secret";

    /// `"1:" + base64url(HMAC-SHA256("test-secret", "1"))`
    const INNER_WINDOW_1: &str = "1:htHC0nlV_S7ERToUxOyxQes0H584wqDQCHH6dsH3Bv0";

    #[test]
    fn known_vector_inner_string() {
        let token = generate_token(SECRET, 3600, 3600.0).unwrap();
        let inner = String::from_utf8(decode_url_safe(&token).unwrap()).unwrap();
        assert_eq!(inner, INNER_WINDOW_1);
    }

    #[test]
    fn known_vector_outer_encoding() {
        let token = generate_token(SECRET, 3600, 3600.0).unwrap();
        assert_eq!(token, encode_url_safe(INNER_WINDOW_1.as_bytes()));
        assert_eq!(
            token,
            "MTpodEhDMG5sVl9TN0VSVG9VeE95eFFlczBINTg0d3FEUUNISDZkc0gzQnYw"
        );
    }

    #[test]
    fn same_window_same_token() {
        let a = generate_token(SECRET, 3600, 3600.0).unwrap();
        let b = generate_token(SECRET, 3600, 7199.0).unwrap();
        let c = generate_token(SECRET, 3600, 7199.999).unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn next_window_different_token() {
        let a = generate_token(SECRET, 3600, 3600.0).unwrap();
        let b = generate_token(SECRET, 3600, 7200.0).unwrap();
        assert_ne!(a, b);
        assert_eq!(
            b,
            "MjpyWUR4ZVNNMmp6M0RiRkNjQ29ucFIyV3lWMnlBSURIZG1PZldla093R25j"
        );
    }

    #[test]
    fn secret_changes_token() {
        let a = generate_token(b"secret-a", 3600, 3600.0).unwrap();
        let b = generate_token(b"secret-b", 3600, 3600.0).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn empty_secret_is_accepted() {
        let token = generate_token(b"", 3600, 3600.0).unwrap();
        assert_eq!(
            token,
            "MTpRZUNwUkktUjdicExCY2JDX0E3YkhXUVlxaWtyV3lsQ1kzdnNRNktibFNN"
        );
    }

    #[test_case(0 ; "zero window")]
    #[test_case(-1 ; "negative window")]
    #[test_case(i64::MIN ; "minimum window")]
    fn non_positive_window_is_rejected(window: i64) {
        let err = generate_token(SECRET, window, 3600.0).unwrap_err();
        assert!(matches!(err, TokenError::InvalidConfiguration(_)));
    }

    #[test_case(-1.0 ; "negative")]
    #[test_case(f64::NAN ; "nan")]
    #[test_case(f64::INFINITY ; "infinite")]
    fn invalid_timestamp_is_rejected(now: f64) {
        let err = generate_token(SECRET, 3600, now).unwrap_err();
        assert!(matches!(err, TokenError::InvalidConfiguration(_)));
    }

    #[test]
    fn epoch_is_window_zero() {
        assert_eq!(window_index(3600, 0.0).unwrap(), 0);
        assert_eq!(window_index(3600, 3599.9).unwrap(), 0);
        assert_eq!(window_index(1, 42.7).unwrap(), 42);
    }

    #[test]
    fn signer_matches_free_function() {
        let signer = TimeTokenSigner::new("test-secret", 3600).unwrap();
        assert_eq!(
            signer.token_at(3600.0).unwrap(),
            generate_token(SECRET, 3600, 3600.0).unwrap()
        );
        assert_eq!(signer.window_index_at(7200.0).unwrap(), 2);
        assert_eq!(signer.window_seconds(), 3600);
    }

    #[test]
    fn signer_rejects_non_positive_window() {
        assert!(TimeTokenSigner::new("secret", 0).is_err());
        assert!(TimeTokenSigner::new("secret", -60).is_err());
    }

    #[test]
    fn signer_flags_empty_secret() {
        let signer = TimeTokenSigner::new(Vec::new(), 3600).unwrap();
        assert!(signer.has_empty_secret());
        assert!(!signer.current_token().unwrap().is_empty());
    }

    #[test]
    fn signer_debug_redacts_secret() {
        let signer = TimeTokenSigner::new("super-secret-value", 60).unwrap();
        let debug = format!("{signer:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret-value"));
    }
}
