//! Shopify app credential types.

use std::fmt;

use crate::error::{ShopsignError, ShopsignResult};

/// Shopify app API key (the public client identifier).
///
/// Session tokens carry this value in their `aud` claim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    /// Create a new API key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the API key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shopify app shared secret.
///
/// The value is never printed: both `Debug` and `Display` are redacted, and
/// there is no `Serialize` implementation.
#[derive(Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(try_from = "String")]
pub struct ApiSecret(String);

impl ApiSecret {
    /// Create a new secret.
    ///
    /// # Errors
    /// Returns an error if the secret is empty.
    pub fn new(secret: impl Into<String>) -> ShopsignResult<Self> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ShopsignError::Config("API secret must not be empty".to_owned()));
        }
        Ok(Self(secret))
    }

    /// Expose the raw secret bytes for keying a MAC.
    #[must_use]
    pub fn expose(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl TryFrom<String> for ApiSecret {
    type Error = ShopsignError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl AsRef<[u8]> for ApiSecret {
    fn as_ref(&self) -> &[u8] {
        self.expose()
    }
}

impl fmt::Debug for ApiSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiSecret(***)")
    }
}

impl fmt::Display for ApiSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}
