//! Core configuration and credential types for shopsign.
//!
//! This crate holds the pieces shared by hosts that verify Shopify requests:
//! the app credentials (API key and shared secret) and the environment-driven
//! configuration that produces them.

mod config;
mod error;
mod types;

pub use config::{API_KEY_ENV, API_SECRET_ENV, ShopsignConfig};
pub use error::{ShopsignError, ShopsignResult};
pub use types::{ApiKey, ApiSecret};
