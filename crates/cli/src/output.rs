//! Writing the fetched schema to disk.

use anyhow::{Context, Result};
use serde_json::Value;
use shopify_schema_config::SCHEMA_OUTPUT_FILE;
use std::path::PathBuf;

/// Writes the SDL and the raw introspection JSON into one directory.
///
/// Existing files are overwritten. Nothing is cleaned up on failure, so a
/// failed JSON write leaves the SDL file in place.
#[derive(Debug, Clone)]
pub struct SchemaWriter {
    dir: PathBuf,
}

impl SchemaWriter {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Writes `sdl` verbatim to `schema.graphql`.
    #[tracing::instrument(skip(self, sdl), fields(dir = %self.dir.display()))]
    pub async fn write_sdl(&self, sdl: &str) -> Result<PathBuf> {
        let path = self.dir.join(SCHEMA_OUTPUT_FILE);
        tokio::fs::write(&path, sdl)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(bytes = sdl.len(), path = %path.display(), "Wrote SDL");
        Ok(path)
    }

    /// Writes `body` as compact JSON to `file_name`.
    #[tracing::instrument(skip(self, body), fields(dir = %self.dir.display()))]
    pub async fn write_json(&self, file_name: &str, body: &Value) -> Result<PathBuf> {
        let path = self.dir.join(file_name);
        let json =
            serde_json::to_string(body).context("Failed to serialize introspection result")?;
        tokio::fs::write(&path, &json)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(bytes = json.len(), path = %path.display(), "Wrote introspection JSON");
        Ok(path)
    }
}
