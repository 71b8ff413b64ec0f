//! HMAC-SHA256 operations for token signing and verification

use crate::encoding::base64_url_encode;
use crate::error::{TokenError, TokenResult};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;

/// Length of an HMAC-SHA256 tag in bytes
pub const TAG_LEN: usize = 32;

/// Raw HMAC-SHA256 tag over `data`
pub fn hmac_sha256_sign(data: &[u8], secret: &[u8]) -> TokenResult<[u8; TAG_LEN]> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|_| TokenError::invalid_key("HMAC key rejected"))?;
    mac.update(data);
    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&mac.finalize().into_bytes());
    Ok(tag)
}

/// Base64url signature segment for a signing input
pub(crate) fn sign_segment(signing_input: &str, secret: &[u8]) -> TokenResult<String> {
    let tag = Zeroizing::new(hmac_sha256_sign(signing_input.as_bytes(), secret)?);
    Ok(base64_url_encode(&tag[..]))
}

/// Check a transmitted signature segment against the recomputed one.
///
/// Comparison runs over the encoded form in constant time, so a
/// non-canonical encoding of the right tag is also a mismatch.
pub(crate) fn verify_segment(
    signing_input: &str,
    signature_b64: &str,
    secret: &[u8],
) -> TokenResult<()> {
    let expected = Zeroizing::new(sign_segment(signing_input, secret)?);
    if bool::from(expected.as_bytes().ct_eq(signature_b64.as_bytes())) {
        Ok(())
    } else {
        Err(TokenError::Signature)
    }
}
