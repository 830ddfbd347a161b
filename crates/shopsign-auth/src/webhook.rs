//! Webhook body signature verification.
//!
//! Webhook deliveries are signed over the raw request body and the signature
//! is sent in the `X-Shopify-Hmac-SHA256` header. The header value is
//! `base64(hex(HMAC-SHA256(secret, body)))`: the digest is hex-encoded first,
//! and the base64 layer is applied to that hex text, not to the raw digest.
//!
//! The body must be the exact bytes received, captured before any parsing.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::debug;

use crate::digest::{constant_time_eq, ensure_secret, hmac_sha256_hex};
use crate::error::{VerifyError, verdict};
use crate::request::SignedRequest;

/// Header carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "X-Shopify-Hmac-SHA256";

/// Compute the expected `X-Shopify-Hmac-SHA256` header value for a body.
///
/// # Examples
///
/// ```
/// use shopsign_auth::webhook;
///
/// assert_eq!(
///     webhook::sign(b"{}", "k"),
///     "YWRkODUzYjEwM2ZiY2M5MzZhMTk0ZjllYjE1ZTI5YzRmZjA4YWY2ZTQ3ZDVkMWJjYTRmMjAyMThlMzFlNGZmZg=="
/// );
/// ```
#[must_use]
pub fn sign(body: &[u8], secret: impl AsRef<[u8]>) -> String {
    BASE64.encode(hmac_sha256_hex(secret.as_ref(), body))
}

/// Verify a webhook body against the claimed `X-Shopify-Hmac-SHA256` value.
///
/// Returns `false` if the header is absent, the secret is empty, or the
/// signature does not match.
#[must_use]
pub fn verify_webhook(claimed: Option<&str>, body: &[u8], secret: impl AsRef<[u8]>) -> bool {
    verdict("webhook", check(claimed, body, secret.as_ref())).is_some()
}

/// Verify a webhook request. A request representation without a body fails.
#[must_use]
pub fn verify_request<R: SignedRequest + ?Sized>(request: &R, secret: impl AsRef<[u8]>) -> bool {
    let Some(body) = request.body() else {
        return verdict::<()>("webhook", Err(VerifyError::MissingBody)).is_some();
    };
    verify_webhook(request.header(SIGNATURE_HEADER), body, secret)
}

fn check(claimed: Option<&str>, body: &[u8], secret: &[u8]) -> Result<(), VerifyError> {
    ensure_secret(secret)?;
    let provided = claimed.ok_or(VerifyError::MissingHeader(SIGNATURE_HEADER))?;

    debug!(body_len = body.len(), "Verifying webhook signature");

    let expected = sign(body, secret);
    if constant_time_eq(provided.as_bytes(), expected.as_bytes()) {
        Ok(())
    } else {
        Err(VerifyError::SignatureMismatch)
    }
}
