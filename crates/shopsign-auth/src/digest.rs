//! Keyed digests and timing-safe signature comparison.
//!
//! Every verifier in this crate computes its expected signature with
//! [`hmac_sha256`] and decides its verdict with [`constant_time_eq`].

use hmac::{Hmac, KeyInit, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::VerifyError;

type HmacSha256 = Hmac<Sha256>;

/// Compute HMAC-SHA256 of `data` under `key` and return the raw 32 bytes.
#[must_use]
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can accept keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().into()
}

/// Compute HMAC-SHA256 of `data` under `key` and return it as lowercase hex.
///
/// # Examples
///
/// ```
/// use shopsign_auth::digest::hmac_sha256_hex;
///
/// assert_eq!(
///     hmac_sha256_hex(b"shhh", b"code=abc&shop=x.myshopify.com"),
///     "7ed9e1121e018ca81c6c57b0a788fcf8edf9b64f17b181ef8c1f5394a91a0580"
/// );
/// ```
#[must_use]
pub fn hmac_sha256_hex(key: &[u8], data: &[u8]) -> String {
    hex::encode(hmac_sha256(key, data))
}

/// Compare two byte strings in time independent of their contents.
///
/// Inputs of different length compare unequal immediately; lengths are not
/// secret. Equal-length inputs are always compared in full.
#[must_use]
pub fn constant_time_eq(provided: &[u8], expected: &[u8]) -> bool {
    provided.ct_eq(expected).into()
}

/// Reject an empty signing secret.
pub(crate) fn ensure_secret(secret: &[u8]) -> Result<(), VerifyError> {
    if secret.is_empty() {
        return Err(VerifyError::EmptySecret);
    }
    Ok(())
}
