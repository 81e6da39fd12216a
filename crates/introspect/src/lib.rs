//! GraphQL introspection, client schema building and SDL printing.
//!
//! The pieces run in a fixed order: send the introspection query, gate the
//! response on its `errors` field, build a [`ClientSchema`] from `data`, and
//! print it as SDL.
//!
//! # Examples
//!
//! ```no_run
//! use shopify_introspect::{print_schema, ClientSchema, IntrospectionClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = IntrospectionClient::new()
//!         .with_header("X-Shopify-Access-Token", "shpat_123");
//!
//!     // Raw response body, errors and all
//!     let body = client
//!         .execute("https://acme.myshopify.com/admin/api/2024-01/graphql.json")
//!         .await?;
//!
//!     // Fails with `IntrospectionError::GraphQL` if the body carries errors
//!     let schema = ClientSchema::from_response(&body)?;
//!
//!     println!("{}", print_schema(&schema));
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod query;
mod response;
mod schema;
mod sdl;
mod strings;
mod types;

pub use client::IntrospectionClient;
pub use error::{IntrospectionError, Result};
pub use query::{introspection_query, IntrospectionOptions};
pub use response::{check_response, response_errors, GraphQLErrors};
pub use schema::{
    ClientSchema, Deprecation, Directive, EnumType, EnumValue, Field, InputObjectType,
    InputValue, InterfaceType, NamedType, ObjectType, ScalarType, TypeRef, UnionType,
    DEFAULT_DEPRECATION_REASON,
};
pub use sdl::print_schema;
pub use types::*;

use serde_json::Value;

/// Introspects `url` with `client` and prints the result as SDL.
///
/// Returns the raw response body alongside the SDL so callers can keep both.
///
/// # Errors
///
/// Any error from [`IntrospectionClient::execute`], [`check_response`] or
/// [`ClientSchema::from_data`].
#[tracing::instrument(skip(client))]
pub async fn introspect_to_sdl(client: &IntrospectionClient, url: &str) -> Result<(Value, String)> {
    tracing::info!("Starting introspection");
    let body = client.execute(url).await?;
    let schema = ClientSchema::from_response(&body)?;
    let sdl = print_schema(&schema);
    tracing::info!(
        types = schema.types().len(),
        sdl_length = sdl.len(),
        "Introspection complete"
    );
    Ok((body, sdl))
}
