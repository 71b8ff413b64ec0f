//! Secret key policy

use crate::error::{TokenError, TokenResult};

/// Secret length recommended for HS256: one full SHA-256 block of entropy
pub const RECOMMENDED_SECRET_LEN: usize = 32;

/// Enforce a minimum secret length. A minimum of zero accepts any secret.
pub(crate) fn validate_hmac_key(secret: &[u8], min_len: usize) -> TokenResult<()> {
    if secret.len() < min_len {
        return Err(TokenError::invalid_key(&format!(
            "HS256 secret must be at least {} bytes, got {}",
            min_len,
            secret.len()
        )));
    }
    Ok(())
}
