//! Verification failure reasons.
//!
//! [`VerifyError`] names every way a verification can fail. It is used inside
//! each verifier's pipeline and written to the debug log, but never returned
//! to callers: the public functions collapse it into a bare verdict so that a
//! client probing the endpoint cannot learn which check rejected it.

use tracing::debug;

/// Reasons a Shopify request signature failed to verify.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// The secret used to key the MAC is empty.
    #[error("empty secret")]
    EmptySecret,

    /// The request carries no query parameters at all.
    #[error("empty query string")]
    EmptyQuery,

    /// A required query parameter is absent.
    #[error("missing query parameter: {0}")]
    MissingParam(&'static str),

    /// A required header is absent or not valid visible ASCII.
    #[error("missing header: {0}")]
    MissingHeader(&'static str),

    /// The request has no body to verify.
    #[error("missing request body")]
    MissingBody,

    /// The `Authorization` header does not use the `Bearer` scheme.
    #[error("authorization header is not a bearer token")]
    InvalidAuthScheme,

    /// The bearer token does not have exactly three segments.
    #[error("malformed token: expected 3 segments, found {0}")]
    MalformedToken(usize),

    /// A token segment is not valid unpadded base64url.
    #[error("invalid base64url in token {0}")]
    InvalidBase64(&'static str),

    /// The token payload is not a valid claim set.
    #[error("invalid token claims: {0}")]
    InvalidClaims(#[from] serde_json::Error),

    /// The token expired before the current time.
    #[error("token expired at {expires_at} (now {now})")]
    Expired {
        /// The `exp` claim.
        expires_at: i64,
        /// Time of the check.
        now: i64,
    },

    /// The token is not valid until a later time.
    #[error("token not valid before {not_before} (now {now})")]
    NotYetValid {
        /// The `nbf` claim.
        not_before: i64,
        /// Time of the check.
        now: i64,
    },

    /// A claim that must be an absolute URL could not be parsed as one.
    #[error("invalid URL in {0} claim")]
    InvalidUrl(&'static str),

    /// The issuer and destination claims name different hosts.
    #[error("issuer host {issuer} does not match destination host {destination}")]
    HostnameMismatch {
        /// Host of the `iss` claim.
        issuer: String,
        /// Host of the `dest` claim.
        destination: String,
    },

    /// The audience claim is not this app's API key.
    #[error("audience does not match the app API key")]
    AudienceMismatch,

    /// The computed signature does not match the provided signature.
    #[error("signature does not match")]
    SignatureMismatch,
}

/// Collapse a verification pipeline result into a verdict, logging the reason.
pub(crate) fn verdict<T>(scheme: &'static str, result: Result<T, VerifyError>) -> Option<T> {
    match result {
        Ok(value) => {
            debug!(scheme, "signature verification succeeded");
            Some(value)
        }
        Err(err) => {
            debug!(scheme, reason = %err, "signature verification failed");
            None
        }
    }
}
