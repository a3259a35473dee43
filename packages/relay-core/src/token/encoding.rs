//! URL-safe base64 helpers.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Encode bytes as URL-safe base64 without padding.
#[must_use]
pub fn encode_url_safe(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Map standard-alphabet base64 onto the URL-safe alphabet and drop padding.
///
/// Input already in the URL-safe alphabet passes through unchanged.
#[must_use]
pub fn to_url_safe(encoded: &str) -> String {
    encoded
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect()
}

/// Decode base64 in either alphabet, padded or not.
///
/// # Errors
///
/// Returns the underlying decode error for invalid characters or lengths.
pub fn decode_url_safe(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(to_url_safe(encoded))
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::STANDARD;

    use super::*;

    #[test]
    fn url_safe_matches_standard_with_substitution() {
        // 0xfb 0xff produces both '+' and '/' in the standard alphabet.
        let bytes = [0xfb, 0xff, 0xbf, 0x3e];
        let standard = STANDARD.encode(bytes);
        assert!(standard.contains('+') || standard.contains('/'));
        assert!(standard.ends_with('='));

        assert_eq!(encode_url_safe(&bytes), to_url_safe(&standard));
    }

    #[test]
    fn to_url_safe_is_idempotent() {
        let once = to_url_safe("ab+/cd==");
        assert_eq!(once, "ab-_cd");
        assert_eq!(to_url_safe(&once), once);
    }

    #[test]
    fn decode_accepts_both_alphabets() {
        let bytes = b"1:some-mac?>";
        let standard = STANDARD.encode(bytes);
        let url_safe = encode_url_safe(bytes);

        assert_eq!(decode_url_safe(&standard).unwrap(), bytes);
        assert_eq!(decode_url_safe(&url_safe).unwrap(), bytes);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode_url_safe("not base64!").is_err());
    }
}
