//! Token validation options.

use crate::crypto::keys::RECOMMENDED_SECRET_LEN;
use chrono::Duration;

/// Options applied by a [`Decoder`](crate::Decoder).
///
/// The defaults implement the plain contract: no clock leeway, any secret
/// length, and no claims required beyond `iat` and `exp`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Grace period added to `exp` before a token counts as expired.
    pub leeway: Duration,
    /// Shortest secret accepted, in bytes.
    pub min_secret_len: usize,
    /// Claims that must be present in addition to `iat` and `exp`.
    pub required_claims: Vec<String>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            leeway: Duration::zero(),
            min_secret_len: 0,
            required_claims: vec![],
        }
    }
}

impl ValidationOptions {
    /// Strict options: zero leeway and a 32-byte minimum secret.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            leeway: Duration::zero(),
            min_secret_len: RECOMMENDED_SECRET_LEN,
            required_claims: vec![],
        }
    }

    /// Set the time leeway for the expiration check.
    #[must_use]
    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway = leeway;
        self
    }

    /// Set the shortest accepted secret.
    #[must_use]
    pub fn with_min_secret_len(mut self, len: usize) -> Self {
        self.min_secret_len = len;
        self
    }

    /// Add a required claim.
    #[must_use]
    pub fn require_claim(mut self, claim: impl Into<String>) -> Self {
        self.required_claims.push(claim.into());
        self
    }

    /// Leeway in whole seconds; negative leeway is treated as zero.
    pub(crate) fn leeway_secs(&self) -> i64 {
        self.leeway.num_seconds().max(0)
    }
}
