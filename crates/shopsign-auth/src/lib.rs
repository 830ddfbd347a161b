//! Shopify request signature verification for shopsign.
//!
//! This crate verifies that inbound HTTP requests were signed by Shopify with
//! an app's shared secret. Four request shapes are supported, each with its
//! own canonicalization:
//!
//! - OAuth callbacks: query string signed by an `hmac` parameter
//! - App proxy requests: query string signed by a `signature` parameter
//! - Session tokens: HMAC-SHA256 bearer tokens in the `Authorization` header
//! - Webhooks: raw body signed in the `X-Shopify-Hmac-SHA256` header
//!
//! Every verifier is a pure function returning a verdict. Failures are never
//! reported as errors: the reason is logged at `debug` level and the caller
//! sees only `false` (or an empty shop for session tokens).
//!
//! # Usage
//!
//! ```rust
//! use shopsign_auth::{QueryParams, oauth};
//!
//! let params = QueryParams::parse(
//!     "code=abc&shop=x.myshopify.com\
//!      &hmac=7ed9e1121e018ca81c6c57b0a788fcf8edf9b64f17b181ef8c1f5394a91a0580",
//! );
//! assert!(oauth::verify_oauth(&params, "shhh"));
//! ```
//!
//! # Modules
//!
//! - [`app_proxy`] - App proxy signature verification
//! - [`canonical`] - Canonical signing strings for query-signed requests
//! - [`clock`] - Time source for session token validity checks
//! - [`digest`] - HMAC-SHA256 helpers and constant-time comparison
//! - [`error`] - Verification failure reasons
//! - [`oauth`] - OAuth callback verification
//! - [`params`] - Parsed query string parameters
//! - [`request`] - Read-only request view
//! - [`session_token`] - Session token verification
//! - [`verifier`] - Verifier bound to one app's credentials
//! - [`webhook`] - Webhook body verification

pub mod app_proxy;
pub mod canonical;
pub mod clock;
pub mod digest;
pub mod error;
pub mod oauth;
pub mod params;
pub mod request;
pub mod session_token;
pub mod verifier;
pub mod webhook;

pub use app_proxy::verify_app_proxy;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::VerifyError;
pub use oauth::verify_oauth;
pub use params::QueryParams;
pub use request::{RequestView, SignedRequest};
pub use session_token::{SessionClaims, verify_session_token};
pub use verifier::ShopifyVerifier;
pub use webhook::verify_webhook;
