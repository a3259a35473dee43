//! HS256 Signed-Claims Tokens
//!
//! Compact JWS tokens used by the private WebSocket feed
//! (`GET /ws?token=<jwt>`). Same shared-secret signing idea as the
//! time-window token, but carries explicit claims and an expiry instead of a
//! window index.
//!
//! ```text
//! base64url({"alg":"HS256","typ":"JWT"}) "." base64url(claims) "." base64url(HMAC-SHA256)
//! ```

use hmac::{Hmac, Mac, digest::KeyInit};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use crate::token::{decode_url_safe, encode_url_safe};

type HmacSha256 = Hmac<Sha256>;

/// Default token lifetime (one hour).
pub const DEFAULT_TTL_SECS: i64 = 3600;

/// Errors raised while signing or verifying a signed-claims token.
#[derive(Debug, Error)]
pub enum JwtError {
    /// Token is not three dot-separated segments.
    #[error("malformed token: {0}")]
    Malformed(String),

    /// Header names an algorithm other than HS256.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Signature does not match the secret.
    #[error("invalid signature")]
    InvalidSignature,

    /// `exp` is not after the verification time.
    #[error("token expired at {exp}")]
    Expired {
        /// Expiry carried by the token.
        exp: i64,
    },

    /// Header or claims JSON could not be processed.
    #[error("claims serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// HMAC key was rejected.
    #[error("invalid signing key")]
    InvalidKey,
}

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

impl Header {
    fn hs256() -> Self {
        Self {
            alg: "HS256".to_string(),
            typ: "JWT".to_string(),
        }
    }
}

/// Claims carried by the feed token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id).
    pub sub: String,
    /// Display name.
    pub name: String,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

impl Claims {
    /// Claims issued at `iat` that expire `ttl_secs` later.
    #[must_use]
    pub fn new(sub: impl Into<String>, name: impl Into<String>, iat: i64, ttl_secs: i64) -> Self {
        Self {
            sub: sub.into(),
            name: name.into(),
            iat,
            exp: iat.saturating_add(ttl_secs),
        }
    }
}

fn signature(secret: &[u8], signing_input: &str) -> Result<HmacSha256, JwtError> {
    let mut mac =
        <HmacSha256 as KeyInit>::new_from_slice(secret).map_err(|_| JwtError::InvalidKey)?;
    mac.update(signing_input.as_bytes());
    Ok(mac)
}

/// Sign claims with HS256.
///
/// # Errors
///
/// Returns [`JwtError::Json`] if the claims cannot be serialized.
pub fn sign(claims: &Claims, secret: &[u8]) -> Result<String, JwtError> {
    let header = encode_url_safe(&serde_json::to_vec(&Header::hs256())?);
    let payload = encode_url_safe(&serde_json::to_vec(claims)?);
    let signing_input = format!("{header}.{payload}");
    let sig = signature(secret, &signing_input)?.finalize().into_bytes();
    Ok(format!("{signing_input}.{}", encode_url_safe(&sig)))
}

/// Verify an HS256 token and return its claims.
///
/// # Errors
///
/// Returns the first [`JwtError`] encountered: structure, algorithm,
/// signature, then expiry relative to `now_secs`.
pub fn verify(token: &str, secret: &[u8], now_secs: i64) -> Result<Claims, JwtError> {
    let segments: Vec<&str> = token.split('.').collect();
    let [header, payload, sig] = segments.as_slice() else {
        return Err(JwtError::Malformed(format!(
            "expected 3 segments, got {}",
            segments.len()
        )));
    };
    let (header, payload, sig) = (*header, *payload, *sig);

    let decode = |segment: &str, what: &str| {
        decode_url_safe(segment).map_err(|e| JwtError::Malformed(format!("{what}: {e}")))
    };

    let parsed: Header = serde_json::from_slice(&decode(header, "header")?)?;
    if parsed.alg != "HS256" {
        return Err(JwtError::UnsupportedAlgorithm(parsed.alg));
    }

    let sig_bytes = decode(sig, "signature")?;
    signature(secret, &format!("{header}.{payload}"))?
        .verify_slice(&sig_bytes)
        .map_err(|_| JwtError::InvalidSignature)?;

    let claims: Claims = serde_json::from_slice(&decode(payload, "claims")?)?;
    if claims.exp <= now_secs {
        return Err(JwtError::Expired { exp: claims.exp });
    }

    Ok(claims)
}
