//! Token decoder and validator.

use crate::claims::{ClaimValue, Claims, EXPIRATION, ISSUED_AT};
use crate::clock::{Clock, SystemClock};
use crate::crypto::{hmac_sha256, keys};
use crate::encoding::decode_json_segment;
use crate::error::{TokenError, TokenResult};
use crate::header::Header;
use crate::token::ValidatedToken;
use crate::validation::ValidationOptions;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Parses token strings and validates them against a secret.
#[derive(Debug, Clone)]
pub struct Decoder<C = SystemClock> {
    clock: C,
    options: ValidationOptions,
}

impl Decoder<SystemClock> {
    /// Decoder on the wall clock with default options
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: SystemClock,
            options: ValidationOptions::default(),
        }
    }
}

impl Default for Decoder<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Decoder<C> {
    /// Read the current time from another clock
    #[must_use]
    pub fn with_clock<D: Clock>(self, clock: D) -> Decoder<D> {
        Decoder {
            clock,
            options: self.options,
        }
    }

    /// Set custom validation options
    #[must_use]
    pub fn with_validation_options(mut self, options: ValidationOptions) -> Self {
        self.options = options;
        self
    }

    /// Get a reference to the validation options
    #[must_use]
    pub fn validation_options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Parse and validate `token`.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// segment structure, header `typ` then `alg`, signature, payload
    /// structure, presence of `exp` then `iat` (then any configured required
    /// claims), timestamp shape, expiration.
    ///
    /// # Errors
    /// One [`TokenError`] describing the first failed check.
    pub fn decode(&self, token: &str, secret: &[u8]) -> TokenResult<ValidatedToken> {
        match self.validate(token, secret) {
            Ok(validated) => {
                tracing::trace!(
                    iat = validated.iat(),
                    exp = validated.exp(),
                    "token validated"
                );
                Ok(validated)
            }
            Err(e) => {
                tracing::debug!(kind = e.kind(), error = %e, "token rejected");
                Err(e)
            }
        }
    }

    fn validate(&self, token: &str, secret: &[u8]) -> TokenResult<ValidatedToken> {
        keys::validate_hmac_key(secret, self.options.min_secret_len)?;

        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 3 {
            return Err(TokenError::Structure(format!(
                "expected 3 segments, found {}",
                parts.len()
            )));
        }
        let (header_b64, payload_b64, signature_b64) = (parts[0], parts[1], parts[2]);
        if header_b64.is_empty() {
            return Err(TokenError::structure("empty header segment"));
        }
        if payload_b64.is_empty() {
            return Err(TokenError::structure("empty payload segment"));
        }

        let header = decode_json_segment(header_b64, "header")?;
        Header::check(&header)?;
        // Checked after the header so `alg: none` is reported as such
        if signature_b64.is_empty() {
            return Err(TokenError::structure("empty signature segment"));
        }

        // Signature covers the received bytes, never a re-serialization
        let signing_input = &token[..header_b64.len() + 1 + payload_b64.len()];
        hmac_sha256::verify_segment(signing_input, signature_b64, secret)?;

        let claims = match decode_json_segment(payload_b64, "payload")? {
            Value::Object(object) => Claims::from_json_object(object)?,
            _ => return Err(TokenError::structure("payload is not a JSON object")),
        };

        let exp = claims
            .get(EXPIRATION)
            .ok_or_else(|| TokenError::missing_claim(EXPIRATION))?;
        let iat = claims
            .get(ISSUED_AT)
            .ok_or_else(|| TokenError::missing_claim(ISSUED_AT))?;
        for required in &self.options.required_claims {
            if !claims.contains(required) {
                return Err(TokenError::missing_claim(required));
            }
        }

        let expires_at = to_timestamp(EXPIRATION, exp)?;
        let issued_at = to_timestamp(ISSUED_AT, iat)?;

        let now = self.clock.now();
        let exp_secs = expires_at.timestamp();
        if exp_secs.saturating_add(self.options.leeway_secs()) <= now {
            return Err(TokenError::Expired {
                expired_at: exp_secs,
                now,
            });
        }

        Ok(ValidatedToken {
            token: token.to_string(),
            issued_at,
            expires_at,
            claims,
        })
    }
}

/// Epoch seconds from a claim. Integral floats are accepted since some
/// writers emit `1700000000.0`.
fn to_timestamp(name: &str, value: &ClaimValue) -> TokenResult<DateTime<Utc>> {
    let secs = match value {
        ClaimValue::Int(secs) => Some(*secs),
        ClaimValue::Float(f)
            if f.is_finite()
                && f.fract() == 0.0
                && *f >= i64::MIN as f64
                && *f < i64::MAX as f64 =>
        {
            Some(*f as i64)
        }
        _ => None,
    };
    secs.and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or_else(|| TokenError::Structure(format!("'{name}' is not an epoch timestamp")))
}
