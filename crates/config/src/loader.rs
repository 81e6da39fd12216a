use crate::{ConfigError, Result, ShopifyConfig};
use std::env::VarError;

/// Store subdomain.
pub const STORE_VAR: &str = "STORE";
/// Admin API version.
pub const API_VERSION_VAR: &str = "API_VERSION";
/// Admin API access token.
pub const ACCESS_TOKEN_VAR: &str = "ACCESS_TOKEN";

impl ShopifyConfig {
    /// Load the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name))
    }

    /// Load the configuration through `lookup`, which has the same contract
    /// as [`std::env::var`].
    ///
    /// Unset and empty variables are both treated as missing. Every missing
    /// variable is reported in a single error.
    #[tracing::instrument(skip(lookup))]
    pub fn from_lookup<F>(mut lookup: F) -> Result<Self>
    where
        F: FnMut(&str) -> std::result::Result<String, VarError>,
    {
        let mut missing = Vec::new();
        let mut read = |var: &'static str| -> Result<Option<String>> {
            match lookup(var) {
                Ok(value) if !value.is_empty() => Ok(Some(value)),
                Ok(_) | Err(VarError::NotPresent) => {
                    tracing::debug!(var, "Environment variable missing");
                    missing.push(var);
                    Ok(None)
                }
                Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode { var }),
            }
        };

        let store = read(STORE_VAR)?;
        let api_version = read(API_VERSION_VAR)?;
        let access_token = read(ACCESS_TOKEN_VAR)?;

        match (store, api_version, access_token) {
            (Some(store), Some(api_version), Some(access_token)) => {
                tracing::debug!(store = %store, api_version = %api_version, "Configuration loaded");
                Ok(Self::new(store, api_version, access_token))
            }
            _ => Err(match missing.as_slice() {
                [var] => ConfigError::Missing { var },
                _ => ConfigError::MissingMany { vars: missing },
            }),
        }
    }
}
