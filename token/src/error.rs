//! Token error types

use thiserror::Error;

/// Token operation result type
pub type TokenResult<T> = Result<T, TokenError>;

/// Every way encoding or validating a token can fail.
///
/// Validation is all-or-nothing: a decoder either hands back a fully
/// checked token or exactly one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Wrong segment count, bad base64url, bad JSON, or a claim of the wrong shape
    #[error("Malformed token: {0}")]
    Structure(String),

    /// Header `typ` is not `JWT`
    #[error("Unsupported token type: {0}")]
    Type(String),

    /// Header `alg` is not `HS256`
    #[error("Unsupported algorithm: {0}")]
    Algorithm(String),

    /// Recomputed MAC does not match the transmitted signature
    #[error("Invalid token signature")]
    Signature,

    /// A required claim is absent from the payload
    #[error("Missing required claim: {0}")]
    MissingClaim(String),

    /// Current time is at or past `exp`
    #[error("Token expired at {expired_at} (now: {now})")]
    Expired {
        /// Expiration, epoch seconds
        expired_at: i64,
        /// Clock reading used for the check, epoch seconds
        now: i64,
    },

    /// Caller asked for a claim the validated token does not carry
    #[error("Unknown claim: {0}")]
    UnknownClaim(String),

    /// A claim value that cannot be represented on the wire
    #[error("Invalid claim: {0}")]
    InvalidClaim(String),

    /// Secret rejected by the configured key policy
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

impl TokenError {
    /// Create a structure error
    #[inline]
    #[must_use]
    pub fn structure(msg: &str) -> Self {
        TokenError::Structure(msg.to_string())
    }

    /// Create a missing claim error
    #[inline]
    #[must_use]
    pub fn missing_claim(claim: &str) -> Self {
        TokenError::MissingClaim(claim.to_string())
    }

    /// Create an unknown claim error
    #[inline]
    #[must_use]
    pub fn unknown_claim(claim: &str) -> Self {
        TokenError::UnknownClaim(claim.to_string())
    }

    /// Create an invalid claim error
    #[inline]
    #[must_use]
    pub fn invalid_claim(msg: &str) -> Self {
        TokenError::InvalidClaim(msg.to_string())
    }

    /// Create an invalid key error
    #[inline]
    #[must_use]
    pub fn invalid_key(msg: &str) -> Self {
        TokenError::InvalidKey(msg.to_string())
    }

    /// Short, stable name of the failure kind, suitable for log fields
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::Structure(_) => "structure",
            TokenError::Type(_) => "type",
            TokenError::Algorithm(_) => "algorithm",
            TokenError::Signature => "signature",
            TokenError::MissingClaim(_) => "missing_claim",
            TokenError::Expired { .. } => "expired",
            TokenError::UnknownClaim(_) => "unknown_claim",
            TokenError::InvalidClaim(_) => "invalid_claim",
            TokenError::InvalidKey(_) => "invalid_key",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            TokenError::missing_claim("exp").to_string(),
            "Missing required claim: exp"
        );
        assert_eq!(
            TokenError::Expired {
                expired_at: 10,
                now: 12
            }
            .to_string(),
            "Token expired at 10 (now: 12)"
        );
        assert_eq!(TokenError::Signature.to_string(), "Invalid token signature");
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(TokenError::structure("x").kind(), "structure");
        assert_eq!(TokenError::Algorithm("none".into()).kind(), "algorithm");
        assert_eq!(TokenError::unknown_claim("role").kind(), "unknown_claim");
    }
}
