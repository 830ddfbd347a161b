//! A verifier bound to one app's credentials.
//!
//! [`ShopifyVerifier`] holds an API key, a secret and a clock, and checks any
//! [`SignedRequest`] against them. It has no mutable state; clone it freely
//! or share it behind an `Arc` across request handlers.

use std::fmt;
use std::sync::Arc;

use shopsign_core::{ApiKey, ApiSecret, ShopsignConfig};

use crate::clock::{Clock, SystemClock};
use crate::request::SignedRequest;
use crate::{app_proxy, oauth, session_token, webhook};

/// Verifies Shopify-signed requests for a single app.
#[derive(Clone)]
pub struct ShopifyVerifier {
    api_key: ApiKey,
    api_secret: ApiSecret,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for ShopifyVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShopifyVerifier")
            .field("api_key", &self.api_key)
            .field("api_secret", &self.api_secret)
            .field("clock", &"...")
            .finish()
    }
}

impl ShopifyVerifier {
    /// Create a verifier using the system clock.
    #[must_use]
    pub fn new(api_key: ApiKey, api_secret: ApiSecret) -> Self {
        Self {
            api_key,
            api_secret,
            clock: Arc::new(SystemClock),
        }
    }

    /// Create a verifier from loaded configuration.
    #[must_use]
    pub fn from_config(config: &ShopsignConfig) -> Self {
        Self::new(config.api_key.clone(), config.api_secret.clone())
    }

    /// Replace the time source used for session token checks.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// The API key session tokens must be addressed to.
    #[must_use]
    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Verify an OAuth callback.
    #[must_use]
    pub fn oauth<R: SignedRequest + ?Sized>(&self, request: &R) -> bool {
        oauth::verify_request(request, &self.api_secret)
    }

    /// Verify an app proxy request.
    #[must_use]
    pub fn app_proxy<R: SignedRequest + ?Sized>(&self, request: &R) -> bool {
        app_proxy::verify_request(request, &self.api_secret)
    }

    /// Verify a session token; returns the shop hostname and the verdict.
    #[must_use]
    pub fn session_token<R: SignedRequest + ?Sized>(&self, request: &R) -> (String, bool) {
        session_token::verify_request(
            request,
            self.api_key.as_str(),
            &self.api_secret,
            self.clock.as_ref(),
        )
    }

    /// Verify a webhook delivery.
    #[must_use]
    pub fn webhook<R: SignedRequest + ?Sized>(&self, request: &R) -> bool {
        webhook::verify_request(request, &self.api_secret)
    }
}
