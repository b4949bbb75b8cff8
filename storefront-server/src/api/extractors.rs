//! Custom Axum extractors for request authentication.
//!
//! Provides `AuthenticatedUser`, which verifies the `Storefront-Signature`
//! header against the username carried in `Storefront-User`.
//!
//! All cryptographic operations are delegated to [`storefront_sdk::signature`].

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use storefront_sdk::signature::{self, SIGNATURE_HEADER, SignatureError, USER_HEADER};

use crate::state::AppState;

/// The username vouched for by the authentication gateway.
///
/// # Header format
///
/// ```text
/// Storefront-User:      {username}
/// Storefront-Signature: {unix_timestamp}.{base64_signature}
/// ```
///
/// The signature is computed as
/// `HMAC-SHA256("{username}.{timestamp}", identity_secret)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub String);

/// Errors returned by the [`AuthenticatedUser`] extractor.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("missing Storefront-User header")]
    MissingUser,
    #[error("missing Storefront-Signature header")]
    MissingSignature,
    #[error("invalid header format")]
    InvalidHeader,
    #[error("invalid signature encoding")]
    InvalidBase64,
    #[error("signature verification failed")]
    SignatureMismatch,
    #[error("signature expired")]
    Expired,
}

impl From<SignatureError> for IdentityError {
    fn from(err: SignatureError) -> Self {
        match err {
            SignatureError::InvalidFormat => Self::InvalidHeader,
            SignatureError::InvalidBase64 => Self::InvalidBase64,
            SignatureError::SignatureMismatch => Self::SignatureMismatch,
            SignatureError::Expired => Self::Expired,
        }
    }
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        let status = match self {
            IdentityError::MissingUser
            | IdentityError::MissingSignature
            | IdentityError::SignatureMismatch
            | IdentityError::Expired => StatusCode::UNAUTHORIZED,
            IdentityError::InvalidHeader | IdentityError::InvalidBase64 => StatusCode::BAD_REQUEST,
        };
        (status, self.to_string()).into_response()
    }
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = IdentityError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Usernames may carry any UTF-8; `to_str` would only accept ASCII.
        let username = parts
            .headers
            .get(USER_HEADER)
            .ok_or(IdentityError::MissingUser)
            .and_then(|value| {
                std::str::from_utf8(value.as_bytes()).map_err(|_| IdentityError::InvalidHeader)
            })?;
        if username.is_empty() {
            return Err(IdentityError::InvalidHeader);
        }

        let sig_value = parts
            .headers
            .get(SIGNATURE_HEADER)
            .ok_or(IdentityError::MissingSignature)?
            .to_str()
            .map_err(|_| IdentityError::InvalidHeader)?;

        let (timestamp, signature_bytes) = signature::parse_signature_header(sig_value)?;

        let identity = state.config.identity.read().await;
        signature::verify_identity(
            username,
            timestamp,
            &signature_bytes,
            identity.secret_bytes(),
        )?;
        drop(identity);

        Ok(AuthenticatedUser(username.to_owned()))
    }
}
