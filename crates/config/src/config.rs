use std::fmt;

/// Header Shopify reads the Admin API access token from.
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// File name the printed SDL is written to.
pub const SCHEMA_OUTPUT_FILE: &str = "schema.graphql";

/// Settings for one schema fetch against a Shopify store.
///
/// Values are taken verbatim; the only check applied when loading is that
/// each one is present and non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct ShopifyConfig {
    /// Store subdomain, the `acme` in `acme.myshopify.com`.
    pub store: String,
    /// Admin API version path segment, e.g. `2024-01`.
    pub api_version: String,
    /// Admin API access token, sent as [`ACCESS_TOKEN_HEADER`].
    pub access_token: String,
}

impl ShopifyConfig {
    #[must_use]
    pub fn new(
        store: impl Into<String>,
        api_version: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            store: store.into(),
            api_version: api_version.into(),
            access_token: access_token.into(),
        }
    }

    /// The Admin GraphQL endpoint for this store and API version.
    ///
    /// ```
    /// # use shopify_schema_config::ShopifyConfig;
    /// let config = ShopifyConfig::new("acme", "2024-01", "shpat_123");
    /// assert_eq!(
    ///     config.endpoint_url(),
    ///     "https://acme.myshopify.com/admin/api/2024-01/graphql.json"
    /// );
    /// ```
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        format!(
            "https://{}.myshopify.com/admin/api/{}/graphql.json",
            self.store, self.api_version
        )
    }

    /// File name for the raw introspection JSON, named after the API version.
    #[must_use]
    pub fn json_output_file(&self) -> String {
        format!("{}.json", self.api_version)
    }

    /// Headers to send with the introspection request.
    #[must_use]
    pub fn headers(&self) -> Vec<(String, String)> {
        vec![(ACCESS_TOKEN_HEADER.to_string(), self.access_token.clone())]
    }
}

impl fmt::Debug for ShopifyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShopifyConfig")
            .field("store", &self.store)
            .field("api_version", &self.api_version)
            .field("access_token", &"<redacted>")
            .finish()
    }
}
