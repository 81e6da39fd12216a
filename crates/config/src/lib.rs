//! Configuration for fetching a Shopify Admin API schema.
//!
//! All settings come from three environment variables (`STORE`,
//! `API_VERSION`, `ACCESS_TOKEN`). They are read once at startup into a
//! [`ShopifyConfig`] which is then passed explicitly to everything that
//! needs it.

mod config;
mod error;
mod loader;

pub use config::{ShopifyConfig, ACCESS_TOKEN_HEADER, SCHEMA_OUTPUT_FILE};
pub use error::{ConfigError, Result};
pub use loader::{ACCESS_TOKEN_VAR, API_VERSION_VAR, STORE_VAR};
