//! Configuration management for shopsign hosts.
//!
//! Credentials are read from environment variables:
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `SHOPIFY_API_KEY` | App API key, the expected session token audience |
//! | `SHOPIFY_API_SECRET` | Shared secret used to key every signature |

use tracing::debug;

use crate::error::{ShopsignError, ShopsignResult};
use crate::types::{ApiKey, ApiSecret};

/// Environment variable holding the app API key.
pub const API_KEY_ENV: &str = "SHOPIFY_API_KEY";

/// Environment variable holding the app shared secret.
pub const API_SECRET_ENV: &str = "SHOPIFY_API_SECRET";

/// Shopify app credentials used by the verifiers.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopsignConfig {
    /// App API key.
    pub api_key: ApiKey,
    /// Shared secret. Never serialized.
    #[serde(skip_serializing)]
    pub api_secret: ApiSecret,
}

impl ShopsignConfig {
    /// Create a configuration from explicit credentials.
    #[must_use]
    pub fn new(api_key: ApiKey, api_secret: ApiSecret) -> Self {
        Self {
            api_key,
            api_secret,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Returns [`ShopsignError::MissingEnv`] if a variable is unset, or
    /// [`ShopsignError::Config`] if the secret is empty.
    pub fn from_env() -> ShopsignResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    /// Same as [`ShopsignConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ShopsignResult<Self> {
        let api_key =
            lookup(API_KEY_ENV).ok_or_else(|| ShopsignError::MissingEnv(API_KEY_ENV.to_owned()))?;
        let api_secret = lookup(API_SECRET_ENV)
            .ok_or_else(|| ShopsignError::MissingEnv(API_SECRET_ENV.to_owned()))?;

        debug!(api_key = %api_key, "loaded shopify app credentials");

        Ok(Self {
            api_key: ApiKey::new(api_key),
            api_secret: ApiSecret::new(api_secret)?,
        })
    }
}
