//! OAuth callback verification.
//!
//! Shopify redirects the merchant back to the app with the query string
//! signed by an `hmac` parameter:
//!
//! ```text
//! /auth/callback?code=...&shop=x.myshopify.com&state=...&timestamp=...&hmac=<hex>
//! ```
//!
//! The signature is the lowercase hex HMAC-SHA256 of every other parameter,
//! re-encoded as a query string with keys sorted (see
//! [`canonical::encode_query`]).

use tracing::debug;

use crate::canonical;
use crate::digest::{constant_time_eq, ensure_secret, hmac_sha256_hex};
use crate::error::{VerifyError, verdict};
use crate::params::QueryParams;
use crate::request::SignedRequest;

/// Query parameter carrying the OAuth signature.
pub const SIGNATURE_PARAM: &str = "hmac";

/// Build the OAuth signing string: every parameter except `hmac`, encoded.
#[must_use]
pub fn canonical_query(params: &QueryParams) -> String {
    canonical::encode_query(&params.without(SIGNATURE_PARAM))
}

/// Compute the expected `hmac` value for a parameter set.
///
/// Any `hmac` parameter already present is ignored.
///
/// # Examples
///
/// ```
/// use shopsign_auth::{QueryParams, oauth};
///
/// let params = QueryParams::parse("shop=x.myshopify.com&code=abc");
/// assert_eq!(
///     oauth::sign(&params, "shhh"),
///     "7ed9e1121e018ca81c6c57b0a788fcf8edf9b64f17b181ef8c1f5394a91a0580"
/// );
/// ```
#[must_use]
pub fn sign(params: &QueryParams, secret: impl AsRef<[u8]>) -> String {
    hmac_sha256_hex(secret.as_ref(), canonical_query(params).as_bytes())
}

/// Verify the `hmac` signature of OAuth callback parameters.
///
/// Returns `false` if the parameters are empty, `hmac` is absent, the secret
/// is empty, or the signature does not match.
#[must_use]
pub fn verify_oauth(params: &QueryParams, secret: impl AsRef<[u8]>) -> bool {
    verdict("oauth", check(params, secret.as_ref())).is_some()
}

/// Verify an OAuth callback request.
#[must_use]
pub fn verify_request<R: SignedRequest + ?Sized>(request: &R, secret: impl AsRef<[u8]>) -> bool {
    verify_oauth(&request.query_params(), secret)
}

fn check(params: &QueryParams, secret: &[u8]) -> Result<(), VerifyError> {
    ensure_secret(secret)?;
    if params.is_empty() {
        return Err(VerifyError::EmptyQuery);
    }
    let provided = params
        .first_bytes(SIGNATURE_PARAM)
        .ok_or(VerifyError::MissingParam(SIGNATURE_PARAM))?;

    debug!(
        shop = params.first("shop").unwrap_or_default(),
        param_count = params.len(),
        "Verifying OAuth callback signature"
    );

    let expected = sign(params, secret);
    if constant_time_eq(provided, expected.as_bytes()) {
        Ok(())
    } else {
        Err(VerifyError::SignatureMismatch)
    }
}
