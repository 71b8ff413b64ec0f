//! Token encoder.

use crate::claims::{ClaimValue, Claims, EXPIRATION, ISSUED_AT};
use crate::clock::{Clock, SystemClock};
use crate::crypto::{hmac_sha256, keys};
use crate::encoding::encode_json_segment;
use crate::error::{TokenError, TokenResult};
use crate::header::Header;
use chrono::{DateTime, Duration, Utc};

/// Lifetime given to tokens when the caller does not pick one: six minutes.
pub const DEFAULT_LIFETIME_SECS: i64 = 360;

/// Builds signed tokens.
///
/// The encoder holds no key material. The secret is passed to each
/// [`encode`](Encoder::encode) call and dropped when it returns.
#[derive(Debug, Clone)]
pub struct Encoder<C = SystemClock> {
    clock: C,
    lifetime_secs: i64,
    min_secret_len: usize,
}

impl Encoder<SystemClock> {
    /// Encoder on the wall clock with the default lifetime
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: SystemClock,
            lifetime_secs: DEFAULT_LIFETIME_SECS,
            min_secret_len: 0,
        }
    }
}

impl Default for Encoder<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Encoder<C> {
    /// Read issue time from another clock
    #[must_use]
    pub fn with_clock<D: Clock>(self, clock: D) -> Encoder<D> {
        Encoder {
            clock,
            lifetime_secs: self.lifetime_secs,
            min_secret_len: self.min_secret_len,
        }
    }

    /// Set the token lifetime
    #[must_use]
    pub fn with_lifetime(self, lifetime: Duration) -> Self {
        self.with_lifetime_secs(lifetime.num_seconds())
    }

    /// Set the token lifetime in seconds. Zero or negative values produce
    /// tokens that are already expired.
    #[must_use]
    pub fn with_lifetime_secs(mut self, secs: i64) -> Self {
        self.lifetime_secs = secs;
        self
    }

    /// Refuse secrets shorter than `len` bytes
    #[must_use]
    pub fn with_min_secret_len(mut self, len: usize) -> Self {
        self.min_secret_len = len;
        self
    }

    /// Configured lifetime in seconds
    #[must_use]
    pub fn lifetime_secs(&self) -> i64 {
        self.lifetime_secs
    }

    /// Encode `claims` into a signed token string.
    ///
    /// `iat` and `exp` are always set from the clock and the configured
    /// lifetime; values the caller put under those keys are replaced.
    ///
    /// # Errors
    /// `InvalidClaim` for a non-finite float or a lifetime that overflows
    /// the timestamp range, `InvalidKey` when the secret is too short.
    pub fn encode(&self, secret: &[u8], claims: &Claims) -> TokenResult<String> {
        keys::validate_hmac_key(secret, self.min_secret_len)?;

        for (key, value) in claims.iter() {
            value.ensure_encodable(key)?;
        }

        let issued_at = self.clock.now();
        let expires_at = issued_at
            .checked_add(self.lifetime_secs)
            .ok_or_else(|| TokenError::invalid_claim("token lifetime overflows 'exp'"))?;
        // Decoders reject timestamps chrono cannot represent, so never sign one
        for (name, secs) in [(ISSUED_AT, issued_at), (EXPIRATION, expires_at)] {
            if DateTime::<Utc>::from_timestamp(secs, 0).is_none() {
                return Err(TokenError::invalid_claim(&format!(
                    "'{name}' is outside the supported timestamp range"
                )));
            }
        }

        let mut payload = claims.clone();
        payload.insert(ISSUED_AT, ClaimValue::Int(issued_at));
        payload.insert(EXPIRATION, ClaimValue::Int(expires_at));

        let header_b64 = encode_json_segment(&Header::HS256)?;
        let payload_b64 = encode_json_segment(&payload)?;
        let signing_input = format!("{header_b64}.{payload_b64}");
        let signature_b64 = hmac_sha256::sign_segment(&signing_input, secret)?;

        tracing::trace!(
            iat = issued_at,
            exp = expires_at,
            claims = payload.len(),
            "token encoded"
        );

        Ok(format!("{signing_input}.{signature_b64}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::encoding::base64_url_decode;

    const NOW: i64 = 1_700_000_000;

    fn payload_of(token: &str) -> serde_json::Value {
        let segment = token.split('.').nth(1).unwrap();
        serde_json::from_slice(&base64_url_decode(segment).unwrap()).unwrap()
    }

    #[test]
    fn test_token_shape() {
        let token = Encoder::new()
            .with_clock(FixedClock(NOW))
            .encode(b"secret", &Claims::new())
            .unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9");
        assert_eq!(parts[2].len(), 43);
        assert!(!token.contains('='));
    }

    #[test]
    fn test_timing_claims_from_clock() {
        let token = Encoder::new()
            .with_clock(FixedClock(NOW))
            .with_lifetime(Duration::hours(1))
            .encode(b"secret", &Claims::new().with("sub", "u-1"))
            .unwrap();
        let payload = payload_of(&token);
        assert_eq!(payload["iat"], NOW);
        assert_eq!(payload["exp"], NOW + 3600);
        assert_eq!(payload["sub"], "u-1");
    }

    #[test]
    fn test_default_lifetime() {
        let encoder = Encoder::new().with_clock(FixedClock(NOW));
        assert_eq!(encoder.lifetime_secs(), DEFAULT_LIFETIME_SECS);
        let payload = payload_of(&encoder.encode(b"k", &Claims::new()).unwrap());
        assert_eq!(payload["exp"], NOW + 360);
    }

    #[test]
    fn test_reserved_claims_overwritten() {
        let claims = Claims::new()
            .with("iat", 1)
            .with("exp", 2)
            .with("role", "admin");
        let token = Encoder::new()
            .with_clock(FixedClock(NOW))
            .encode(b"secret", &claims)
            .unwrap();
        let payload = payload_of(&token);
        assert_eq!(payload["iat"], NOW);
        assert_eq!(payload["exp"], NOW + DEFAULT_LIFETIME_SECS);
        assert_eq!(payload["role"], "admin");
        // The caller's claims are untouched
        assert_eq!(claims.get("iat"), Some(&ClaimValue::Int(1)));
    }

    #[test]
    fn test_deterministic_for_same_inputs() {
        let encoder = Encoder::new().with_clock(FixedClock(NOW));
        let claims = Claims::new().with("b", 2).with("a", 1);
        assert_eq!(
            encoder.encode(b"s", &claims).unwrap(),
            encoder.encode(b"s", &claims).unwrap()
        );
    }

    #[test]
    fn test_non_finite_float_rejected() {
        let result = Encoder::new().encode(b"s", &Claims::new().with("ratio", f64::NAN));
        assert!(matches!(result, Err(TokenError::InvalidClaim(_))));
    }

    #[test]
    fn test_lifetime_overflow_rejected() {
        let result = Encoder::new()
            .with_clock(FixedClock(i64::MAX - 10))
            .encode(b"s", &Claims::new());
        assert!(matches!(result, Err(TokenError::InvalidClaim(_))));
    }

    #[test]
    fn test_lifetime_beyond_timestamp_range_rejected() {
        let result = Encoder::new()
            .with_clock(FixedClock(NOW))
            .with_lifetime_secs(10_000_000_000_000)
            .encode(b"k", &Claims::new().with("sub", "u"));
        assert!(matches!(result, Err(TokenError::InvalidClaim(msg)) if msg.contains("'exp'")));

        let result = Encoder::new()
            .with_clock(FixedClock(-10_000_000_000_000))
            .encode(b"k", &Claims::new());
        assert!(matches!(result, Err(TokenError::InvalidClaim(msg)) if msg.contains("'iat'")));
    }

    #[test]
    fn test_encoded_range_decodes() {
        // Far but representable expiry still round-trips through the decoder
        let secret = b"k";
        let token = Encoder::new()
            .with_clock(FixedClock(NOW))
            .with_lifetime_secs(100_000_000_000)
            .encode(secret, &Claims::new())
            .unwrap();
        let validated = crate::Decoder::new()
            .with_clock(FixedClock(NOW))
            .decode(&token, secret)
            .unwrap();
        assert_eq!(validated.exp(), NOW + 100_000_000_000);
    }

    #[test]
    fn test_min_secret_len() {
        let encoder = Encoder::new().with_min_secret_len(32);
        assert!(matches!(
            encoder.encode(b"short", &Claims::new()),
            Err(TokenError::InvalidKey(_))
        ));
        assert!(encoder.encode(&[1u8; 32], &Claims::new()).is_ok());
    }
}
