//! Session token (App Bridge bearer assertion) verification.
//!
//! Embedded apps receive a JWT-shaped token in the `Authorization` header:
//!
//! ```text
//! Authorization: Bearer <header>.<payload>.<signature>
//! ```
//!
//! Verification is a fixed pipeline that stops at the first failure:
//!
//! 1. Strip the `Bearer ` prefix and split into exactly three segments.
//! 2. Decode the payload (unpadded base64url) into [`SessionClaims`].
//! 3. Check `exp` and `nbf` against the clock, with no leeway.
//! 4. Require `iss` and `dest` to be URLs naming the same host.
//! 5. Require `aud` to equal the app's API key.
//! 6. Compare the decoded signature with HMAC-SHA256 over the ASCII text
//!    `<header>.<payload>`, exactly as received.
//!
//! Only HMAC-SHA256 is accepted. The header segment is signed but never
//! decoded, so there is no algorithm negotiation to attack.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use tracing::debug;

use crate::clock::Clock;
use crate::digest::{constant_time_eq, ensure_secret, hmac_sha256};
use crate::error::{VerifyError, verdict};
use crate::request::SignedRequest;

/// Prefix of an `Authorization` header carrying a session token.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Claims carried in a session token payload.
///
/// `sub`, `iat`, `jti` and `sid` are parsed but not validated. Absent claims
/// default to empty strings and zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct SessionClaims {
    /// `iss`: the shop admin URL.
    #[serde(rename = "iss")]
    pub issuer: String,
    /// `dest`: the shop URL.
    #[serde(rename = "dest")]
    pub destination: String,
    /// `aud`: the app API key.
    #[serde(rename = "aud")]
    pub audience: String,
    /// `sub`: the user the session belongs to.
    #[serde(rename = "sub")]
    pub subject: String,
    /// `exp`: expiry, seconds since the epoch.
    #[serde(rename = "exp")]
    pub expires_at: i64,
    /// `nbf`: start of validity, seconds since the epoch.
    #[serde(rename = "nbf")]
    pub not_before: i64,
    /// `iat`: issue time, seconds since the epoch.
    #[serde(rename = "iat")]
    pub issued_at: i64,
    /// `jti`: unique token identifier.
    #[serde(rename = "jti")]
    pub token_id: String,
    /// `sid`: session identifier.
    #[serde(rename = "sid")]
    pub session_id: String,
}

/// Verify a session token from an `Authorization` header value.
///
/// Returns the shop hostname from the `dest` claim and `true` on success, or
/// an empty string and `false` on any failure.
#[must_use]
pub fn verify_session_token(
    authorization: Option<&str>,
    api_key: &str,
    secret: impl AsRef<[u8]>,
    clock: &dyn Clock,
) -> (String, bool) {
    match verdict(
        "session_token",
        check(authorization, api_key, secret.as_ref(), clock.now()),
    ) {
        Some(shop) => (shop, true),
        None => (String::new(), false),
    }
}

/// Verify the session token in a request's `Authorization` header.
#[must_use]
pub fn verify_request<R: SignedRequest + ?Sized>(
    request: &R,
    api_key: &str,
    secret: impl AsRef<[u8]>,
    clock: &dyn Clock,
) -> (String, bool) {
    verify_session_token(
        request.header(http::header::AUTHORIZATION.as_str()),
        api_key,
        secret,
        clock,
    )
}

fn check(
    authorization: Option<&str>,
    api_key: &str,
    secret: &[u8],
    now: i64,
) -> Result<String, VerifyError> {
    ensure_secret(secret)?;
    let token = authorization
        .ok_or(VerifyError::MissingHeader("authorization"))?
        .strip_prefix(BEARER_PREFIX)
        .ok_or(VerifyError::InvalidAuthScheme)?;

    let segments: Vec<&str> = token.split('.').collect();
    let [header, payload, signature] = segments.as_slice() else {
        return Err(VerifyError::MalformedToken(segments.len()));
    };

    let claims = decode_claims(payload)?;

    debug!(
        issuer = %claims.issuer,
        destination = %claims.destination,
        expires_at = claims.expires_at,
        now,
        "Verifying session token"
    );

    check_validity_window(&claims, now)?;
    let shop = check_hostnames(&claims)?;

    if claims.audience != api_key {
        return Err(VerifyError::AudienceMismatch);
    }

    let provided = URL_SAFE_NO_PAD
        .decode(signature)
        .map_err(|_| VerifyError::InvalidBase64("signature"))?;
    let expected = hmac_sha256(secret, format!("{header}.{payload}").as_bytes());
    if !constant_time_eq(&provided, &expected) {
        return Err(VerifyError::SignatureMismatch);
    }

    Ok(shop)
}

/// Decode the payload segment into claims.
fn decode_claims(payload: &str) -> Result<SessionClaims, VerifyError> {
    let raw = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| VerifyError::InvalidBase64("payload"))?;
    Ok(serde_json::from_slice(&raw)?)
}

fn check_validity_window(claims: &SessionClaims, now: i64) -> Result<(), VerifyError> {
    if claims.expires_at < now {
        return Err(VerifyError::Expired {
            expires_at: claims.expires_at,
            now,
        });
    }
    if claims.not_before > now {
        return Err(VerifyError::NotYetValid {
            not_before: claims.not_before,
            now,
        });
    }
    Ok(())
}

/// Require `iss` and `dest` to share a host; return that host.
fn check_hostnames(claims: &SessionClaims) -> Result<String, VerifyError> {
    let issuer = hostname(&claims.issuer).ok_or(VerifyError::InvalidUrl("iss"))?;
    let destination = hostname(&claims.destination).ok_or(VerifyError::InvalidUrl("dest"))?;
    if issuer != destination {
        return Err(VerifyError::HostnameMismatch {
            issuer,
            destination,
        });
    }
    Ok(destination)
}

/// Host of an absolute URL, without port or IPv6 brackets.
fn hostname(raw: &str) -> Option<String> {
    let uri: http::Uri = raw.parse().ok()?;
    uri.scheme()?;
    let host = uri.host()?;
    let host = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    (!host.is_empty()).then(|| host.to_owned())
}
