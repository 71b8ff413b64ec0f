//! Compact HS256-signed tokens.
//!
//! A token is `header.payload.signature`: base64url (unpadded) JSON for the
//! first two segments and an HMAC-SHA256 tag over `header.payload` for the
//! third. The [`Encoder`] builds tokens from [`Claims`]; the [`Decoder`]
//! validates them all-or-nothing and hands back a [`ValidatedToken`].
//!
//! ```
//! use hs_token::{Claims, decode, encode_with_lifetime};
//!
//! let secret = b"0123456789abcdef0123456789abcdef";
//! let token = encode_with_lifetime(secret, &Claims::new().with("role", "admin"), 3600)?;
//! let validated = decode(&token, secret)?;
//! assert_eq!(validated.claim_str("role"), Some("admin"));
//! # Ok::<(), hs_token::TokenError>(())
//! ```
//!
//! Only one algorithm exists here. There is no key rotation, revocation or
//! refresh; the caller owns the secret and passes it to every call.

#![forbid(unsafe_code)]

pub mod claims;
pub mod clock;
pub(crate) mod crypto;
pub mod decoder;
pub mod encoder;
mod encoding;
mod error;
pub mod header;
mod token;
pub mod validation;

pub use claims::{ClaimValue, Claims};
pub use clock::{Clock, FixedClock, SystemClock};
pub use crypto::hmac_sha256::TAG_LEN;
pub use crypto::keys::RECOMMENDED_SECRET_LEN;
pub use decoder::Decoder;
pub use encoder::{DEFAULT_LIFETIME_SECS, Encoder};
pub use error::{TokenError, TokenResult};
pub use header::Header;
pub use token::ValidatedToken;
pub use validation::ValidationOptions;

/// Encode `claims` with the default lifetime (360 seconds) on the wall clock.
///
/// # Errors
/// `InvalidClaim` for claim values JSON cannot carry.
pub fn encode(secret: &[u8], claims: &Claims) -> TokenResult<String> {
    Encoder::new().encode(secret, claims)
}

/// Encode `claims` valid for `lifetime_secs` from now.
///
/// # Errors
/// `InvalidClaim` for claim values JSON cannot carry or an overflowing lifetime.
pub fn encode_with_lifetime(
    secret: &[u8],
    claims: &Claims,
    lifetime_secs: i64,
) -> TokenResult<String> {
    Encoder::new()
        .with_lifetime_secs(lifetime_secs)
        .encode(secret, claims)
}

/// Validate `token` against `secret` on the wall clock with default options.
///
/// # Errors
/// The first failed check, see [`Decoder::decode`].
pub fn decode(token: &str, secret: &[u8]) -> TokenResult<ValidatedToken> {
    Decoder::new().decode(token, secret)
}
