//! Validated token view.

use crate::claims::{ClaimValue, Claims};
use crate::error::{TokenError, TokenResult};
use chrono::{DateTime, Utc};
use std::fmt;

/// A token that passed every check.
///
/// Only a [`Decoder`](crate::Decoder) constructs these, so holding one means
/// the structure, header, signature and expiration were all verified at the
/// time of decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedToken {
    pub(crate) token: String,
    pub(crate) issued_at: DateTime<Utc>,
    pub(crate) expires_at: DateTime<Utc>,
    pub(crate) claims: Claims,
}

impl ValidatedToken {
    /// Expiration instant (`exp`)
    #[must_use]
    pub fn expiration(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Issue instant (`iat`)
    #[must_use]
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// `exp` as epoch seconds
    #[must_use]
    pub fn exp(&self) -> i64 {
        self.expires_at.timestamp()
    }

    /// `iat` as epoch seconds
    #[must_use]
    pub fn iat(&self) -> i64 {
        self.issued_at.timestamp()
    }

    /// Look up a claim, including `iat` and `exp`.
    ///
    /// # Errors
    /// `UnknownClaim` when the token does not carry `key`.
    pub fn get_claim(&self, key: &str) -> TokenResult<&ClaimValue> {
        self.claims
            .get(key)
            .ok_or_else(|| TokenError::unknown_claim(key))
    }

    /// String claim, `None` when absent or not a string
    #[must_use]
    pub fn claim_str(&self, key: &str) -> Option<&str> {
        self.claims.get(key).and_then(ClaimValue::as_str)
    }

    /// Integer claim, `None` when absent or not an integer
    #[must_use]
    pub fn claim_i64(&self, key: &str) -> Option<i64> {
        self.claims.get(key).and_then(ClaimValue::as_i64)
    }

    /// Every claim in the payload
    #[must_use]
    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    /// Payload claims other than `iat` and `exp`
    #[must_use]
    pub fn custom_claims(&self) -> Claims {
        self.claims.without_reserved()
    }

    /// The token exactly as it was received
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.token
    }

    /// Consume the view, keeping the claims
    #[must_use]
    pub fn into_claims(self) -> Claims {
        self.claims
    }
}

impl fmt::Display for ValidatedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token)
    }
}

impl AsRef<str> for ValidatedToken {
    fn as_ref(&self) -> &str {
        &self.token
    }
}
