//! Identity configuration.

/// Secret shared with the authentication gateway.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    secret: Box<[u8]>,
}

impl IdentityConfig {
    pub fn new(secret: impl Into<Box<[u8]>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Get the secret key bytes for HMAC verification.
    pub fn secret_bytes(&self) -> &[u8] {
        &self.secret
    }
}
