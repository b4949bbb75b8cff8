//! Identity header signing and verification.
//!
//! The authentication gateway in front of the orders service vouches for
//! the shopper by sending two headers:
//!
//! ```text
//! Storefront-User:      {username}
//! Storefront-Signature: {unix_timestamp}.{base64_signature}
//! ```
//!
//! The signature is `HMAC-SHA256("{username}.{timestamp}", identity_secret)`.

/// Header name carrying the authenticated username.
pub const USER_HEADER: &str = "Storefront-User";

/// Header name for the HMAC signature over the username.
pub const SIGNATURE_HEADER: &str = "Storefront-Signature";

/// Maximum allowed age of a signature (in seconds).
pub const MAX_SIGNATURE_AGE: i64 = 5 * 60;

/// Errors produced by signature operations.
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("invalid header format")]
    InvalidFormat,
    #[error("invalid base64 encoding")]
    InvalidBase64,
    #[error("invalid signature")]
    SignatureMismatch,
    #[error("signature expired")]
    Expired,
}

impl From<ring::error::Unspecified> for SignatureError {
    fn from(_: ring::error::Unspecified) -> Self {
        Self::SignatureMismatch
    }
}

// ---------------------------------------------------------------------------
// Header parsing / formatting
// ---------------------------------------------------------------------------

/// Parse a `Storefront-Signature` header value (`{timestamp}.{base64}`) into
/// `(timestamp, raw_signature_bytes)`.
pub fn parse_signature_header(value: &str) -> Result<(i64, Box<[u8]>), SignatureError> {
    let (timestamp, encoded) = value.split_once('.').ok_or(SignatureError::InvalidFormat)?;
    let timestamp: i64 = timestamp
        .parse()
        .map_err(|_| SignatureError::InvalidFormat)?;
    let signature_bytes = fast32::base64::RFC4648_NOPAD
        .decode_str(encoded)
        .map_err(|_| SignatureError::InvalidBase64)?
        .into_boxed_slice();
    Ok((timestamp, signature_bytes))
}

/// Format a `{timestamp}.{base64}` header value from its parts.
pub fn format_signature_header(timestamp: i64, signature: &[u8]) -> String {
    format!(
        "{}.{}",
        timestamp,
        fast32::base64::RFC4648_NOPAD.encode(signature)
    )
}

/// Check that a signature timestamp is within [`MAX_SIGNATURE_AGE`].
pub fn check_timestamp(timestamp: i64) -> Result<(), SignatureError> {
    let now = time::OffsetDateTime::now_utc().unix_timestamp();
    if now - timestamp > MAX_SIGNATURE_AGE {
        return Err(SignatureError::Expired);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Identity signing
// ---------------------------------------------------------------------------

fn identity_key(key: &[u8]) -> ring::hmac::Key {
    ring::hmac::Key::new(ring::hmac::HMAC_SHA256, key)
}

/// Sign a username at an explicit timestamp and return the header value.
pub fn sign_identity_at(username: &str, timestamp: i64, key: &[u8]) -> String {
    let data = format!("{username}.{timestamp}");
    let sig = ring::hmac::sign(&identity_key(key), data.as_bytes());
    format_signature_header(timestamp, sig.as_ref())
}

/// Sign a username with the current time.
///
/// Returns the formatted `Storefront-Signature` header value.
pub fn sign_identity(username: &str, key: &[u8]) -> String {
    let timestamp = time::OffsetDateTime::now_utc().unix_timestamp();
    sign_identity_at(username, timestamp, key)
}

/// Verify a signed username.
///
/// Checks `HMAC-SHA256("{username}.{timestamp}", key)` and timestamp freshness.
pub fn verify_identity(
    username: &str,
    timestamp: i64,
    signature: &[u8],
    key: &[u8],
) -> Result<(), SignatureError> {
    let data = format!("{username}.{timestamp}");
    ring::hmac::verify(&identity_key(key), data.as_bytes(), signature)?;
    check_timestamp(timestamp)?;
    Ok(())
}
