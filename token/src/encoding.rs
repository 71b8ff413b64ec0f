//! Base64url segment codec (RFC 7515: URL-safe alphabet, no padding)

use crate::error::{TokenError, TokenResult};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Serialize;
use serde_json::Value;

#[inline]
pub(crate) fn base64_url_encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

#[inline]
pub(crate) fn base64_url_decode(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(input)
}

/// Serialize to compact JSON and encode as a segment
pub(crate) fn encode_json_segment<T: Serialize>(value: &T) -> TokenResult<String> {
    let json = serde_json::to_vec(value)
        .map_err(|e| TokenError::invalid_claim(&format!("JSON serialization failed: {e}")))?;
    Ok(base64_url_encode(&json))
}

/// Decode a segment into a JSON value; `name` labels the segment in errors
pub(crate) fn decode_json_segment(segment: &str, name: &str) -> TokenResult<Value> {
    let bytes = base64_url_decode(segment)
        .map_err(|e| TokenError::Structure(format!("{name} is not valid base64url: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| TokenError::Structure(format!("{name} is not valid JSON: {e}")))
}
