//! App proxy request verification.
//!
//! Storefront requests forwarded through an app proxy carry a `signature`
//! query parameter. Unlike OAuth, the signed string is not a query string: the
//! remaining keys are sorted, the values of each key are joined with `,`, and
//! the `key=value` groups are concatenated with nothing in between (see
//! [`canonical::join_sorted`]).

use tracing::debug;

use crate::canonical;
use crate::digest::{constant_time_eq, ensure_secret, hmac_sha256_hex};
use crate::error::{VerifyError, verdict};
use crate::params::QueryParams;
use crate::request::SignedRequest;

/// Query parameter carrying the app proxy signature.
pub const SIGNATURE_PARAM: &str = "signature";

/// Build the app proxy signing bytes: every parameter except `signature`.
#[must_use]
pub fn canonical_query(params: &QueryParams) -> Vec<u8> {
    canonical::join_sorted(&params.without(SIGNATURE_PARAM))
}

/// Compute the expected `signature` value for a parameter set.
///
/// Any `signature` parameter already present is ignored.
#[must_use]
pub fn sign(params: &QueryParams, secret: impl AsRef<[u8]>) -> String {
    hmac_sha256_hex(secret.as_ref(), &canonical_query(params))
}

/// Verify the `signature` of app proxy parameters.
///
/// Returns `false` if the parameters are empty, `signature` is absent, the
/// secret is empty, or the signature does not match.
#[must_use]
pub fn verify_app_proxy(params: &QueryParams, secret: impl AsRef<[u8]>) -> bool {
    verdict("app_proxy", check(params, secret.as_ref())).is_some()
}

/// Verify an app proxy request.
#[must_use]
pub fn verify_request<R: SignedRequest + ?Sized>(request: &R, secret: impl AsRef<[u8]>) -> bool {
    verify_app_proxy(&request.query_params(), secret)
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
        path_prefix = params.first("path_prefix").unwrap_or_default(),
        "Verifying app proxy signature"
    );

    let expected = sign(params, secret);
    if constant_time_eq(provided, expected.as_bytes()) {
        Ok(())
    } else {
        Err(VerifyError::SignatureMismatch)
    }
}
