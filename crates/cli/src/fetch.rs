//! One schema fetch: introspect, gate on errors, print, write.

use crate::output::SchemaWriter;
use anyhow::{Context, Result};
use shopify_introspect::{check_response, print_schema, ClientSchema, IntrospectionClient};
use shopify_schema_config::ShopifyConfig;
use std::path::PathBuf;

/// What a successful fetch produced.
#[derive(Debug)]
pub struct FetchOutcome {
    pub schema_path: PathBuf,
    pub json_path: PathBuf,
    pub type_count: usize,
}

/// Fetches the schema from `endpoint` and writes both output files.
///
/// `endpoint` is normally [`ShopifyConfig::endpoint_url`]. If the response
/// carries GraphQL errors nothing is written. The SDL is written before the
/// JSON.
#[tracing::instrument(skip_all, fields(store = %config.store, api_version = %config.api_version))]
pub async fn fetch_schema(
    config: &ShopifyConfig,
    endpoint: &str,
    writer: &SchemaWriter,
) -> Result<FetchOutcome> {
    let client = IntrospectionClient::new().with_headers(config.headers());

    let body = client
        .execute(endpoint)
        .await
        .with_context(|| format!("Failed to fetch schema from {endpoint}"))?;

    let data = check_response(&body)?;
    let schema = ClientSchema::from_data(data).context("Failed to build client schema")?;
    let sdl = print_schema(&schema);

    let schema_path = writer.write_sdl(&sdl).await?;
    let json_path = writer
        .write_json(&config.json_output_file(), &body)
        .await?;

    tracing::info!(
        types = schema.types().len(),
        sdl_length = sdl.len(),
        "Schema written"
    );

    Ok(FetchOutcome {
        schema_path,
        json_path,
        type_count: schema.types().len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit_code::ExitCode;
    use serde_json::{json, Value};
    use shopify_introspect::IntrospectionError;
    use tempfile::TempDir;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FIXTURE: &str =
        include_str!("../../introspect/tests/fixtures/shopify_introspection.json");
    const GRAPHQL_PATH: &str = "/admin/api/2024-01/graphql.json";

    fn fixture() -> Value {
        serde_json::from_str(FIXTURE).unwrap()
    }

    fn config() -> ShopifyConfig {
        ShopifyConfig::new("acme", "2024-01", "shpat_test")
    }

    async fn serve(body: Value) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .and(header("X-Shopify-Access-Token", "shpat_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;
        server
    }

    fn endpoint(server: &MockServer) -> String {
        format!("{}{GRAPHQL_PATH}", server.uri())
    }

    #[tokio::test]
    async fn test_writes_sdl_and_json() {
        let server = serve(fixture()).await;
        let dir = TempDir::new().unwrap();
        let writer = SchemaWriter::new(dir.path());

        let outcome = fetch_schema(&config(), &endpoint(&server), &writer)
            .await
            .unwrap();

        assert_eq!(outcome.schema_path, dir.path().join("schema.graphql"));
        assert_eq!(outcome.json_path, dir.path().join("2024-01.json"));

        let expected_schema = ClientSchema::from_response(&fixture()).unwrap();
        assert_eq!(outcome.type_count, expected_schema.types().len());
        assert_eq!(
            std::fs::read_to_string(&outcome.schema_path).unwrap(),
            print_schema(&expected_schema)
        );

        let json = std::fs::read_to_string(&outcome.json_path).unwrap();
        assert_eq!(json, serde_json::to_string(&fixture()).unwrap());
        assert!(json.contains("\"extensions\""));
    }

    #[tokio::test]
    async fn test_graphql_errors_write_nothing() {
        let server = serve(json!({
            "errors": [{ "message": "Access denied for __schema field." }]
        }))
        .await;
        let dir = TempDir::new().unwrap();
        let writer = SchemaWriter::new(dir.path());

        let err = fetch_schema(&config(), &endpoint(&server), &writer)
            .await
            .unwrap_err();

        match err.downcast_ref::<IntrospectionError>() {
            Some(IntrospectionError::GraphQL(errors)) => {
                assert_eq!(errors.messages(), ["Access denied for __schema field."]);
            }
            other => panic!("expected GraphQL errors, got {other:?}"),
        }
        assert_eq!(ExitCode::from_error(&err), ExitCode::GraphQLErrors);
        assert!(!dir.path().join("schema.graphql").exists());
        assert!(!dir.path().join("2024-01.json").exists());
    }

    #[tokio::test]
    async fn test_empty_errors_array_is_success() {
        let mut body = fixture();
        body["errors"] = json!([]);
        let server = serve(body.clone()).await;
        let dir = TempDir::new().unwrap();
        let writer = SchemaWriter::new(dir.path());

        let outcome = fetch_schema(&config(), &endpoint(&server), &writer)
            .await
            .unwrap();

        let json = std::fs::read_to_string(outcome.json_path).unwrap();
        assert_eq!(serde_json::from_str::<Value>(&json).unwrap(), body);
        assert!(outcome.schema_path.exists());
    }

    #[tokio::test]
    async fn test_invalid_introspection_writes_nothing() {
        let server = serve(json!({ "data": { "shop": { "name": "Acme" } } })).await;
        let dir = TempDir::new().unwrap();
        let writer = SchemaWriter::new(dir.path());

        let err = fetch_schema(&config(), &endpoint(&server), &writer)
            .await
            .unwrap_err();

        assert_eq!(ExitCode::from_error(&err), ExitCode::SchemaError);
        assert!(!dir.path().join("schema.graphql").exists());
    }

    #[tokio::test]
    async fn test_json_write_failure_keeps_sdl() {
        let server = serve(fixture()).await;
        let dir = TempDir::new().unwrap();
        // A directory in the way of the JSON file
        std::fs::create_dir(dir.path().join("2024-01.json")).unwrap();
        let writer = SchemaWriter::new(dir.path());

        let err = fetch_schema(&config(), &endpoint(&server), &writer)
            .await
            .unwrap_err();

        assert_eq!(ExitCode::from_error(&err), ExitCode::IoError);
        assert!(dir.path().join("schema.graphql").is_file());
    }

    #[tokio::test]
    async fn test_http_failure_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;
        let dir = TempDir::new().unwrap();
        let writer = SchemaWriter::new(dir.path());

        let err = fetch_schema(&config(), &endpoint(&server), &writer)
            .await
            .unwrap_err();

        assert_eq!(ExitCode::from_error(&err), ExitCode::NetworkError);
        assert!(err.to_string().starts_with("Failed to fetch schema from"));
    }
}
