//! Token cryptographic operations

pub mod hmac_sha256;
pub mod keys;
