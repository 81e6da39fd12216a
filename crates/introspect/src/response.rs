//! Inspection of raw GraphQL responses before a schema is built from them.

use crate::{IntrospectionError, Result};
use serde_json::Value;
use std::fmt;

/// Returns the `errors` field of a response if it carries anything.
///
/// `null`, `[]`, `""`, `{}` and `false` all count as "no errors", so a server
/// that always sends an (empty) `errors` array is treated as successful.
#[must_use]
pub fn response_errors(body: &Value) -> Option<&Value> {
    let errors = body.get("errors")?;
    let present = match errors {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Number(_) => true,
    };
    present.then_some(errors)
}

/// Gates a response body on its `errors` field and returns its `data`.
///
/// # Errors
///
/// - [`IntrospectionError::GraphQL`] when the response carries errors
/// - [`IntrospectionError::Invalid`] when there are no errors but no `data`
///   either
pub fn check_response(body: &Value) -> Result<&Value> {
    if let Some(errors) = response_errors(body) {
        let errors = GraphQLErrors::from_value(errors);
        tracing::warn!(count = errors.len(), "Response contains GraphQL errors");
        return Err(IntrospectionError::GraphQL(errors));
    }

    match body.get("data") {
        Some(data) if !data.is_null() => Ok(data),
        _ => Err(IntrospectionError::invalid(
            "response has neither `errors` nor `data`",
        )),
    }
}

/// Errors reported by a GraphQL endpoint.
///
/// Keeps the raw JSON so it can be printed as received, plus a one-line
/// summary per error for display.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphQLErrors {
    raw: Value,
    messages: Vec<String>,
}

impl GraphQLErrors {
    /// Builds the error list from whatever shape the server sent.
    ///
    /// Conforming GraphQL servers send an array of objects with a `message`;
    /// Shopify sends a bare string for authentication failures and sometimes
    /// an object keyed by field.
    #[must_use]
    pub fn from_value(errors: &Value) -> Self {
        let messages = match errors {
            Value::Array(items) => items.iter().map(error_summary).collect(),
            Value::String(s) => vec![s.clone()],
            Value::Object(map) => map
                .iter()
                .map(|(key, value)| format!("{key}: {}", plain(value)))
                .collect(),
            other => vec![other.to_string()],
        };
        Self {
            raw: errors.clone(),
            messages,
        }
    }

    /// The `errors` value exactly as the server sent it.
    #[must_use]
    pub const fn raw(&self) -> &Value {
        &self.raw
    }

    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl fmt::Display for GraphQLErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, message) in self.messages.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  - {message}")?;
        }
        Ok(())
    }
}

/// One line describing a single GraphQL error object.
fn error_summary(error: &Value) -> String {
    let Some(message) = error.get("message").and_then(Value::as_str) else {
        return plain(error);
    };

    let mut summary = message.to_string();

    if let Some(path) = error.get("path").and_then(Value::as_array) {
        let path: Vec<String> = path.iter().map(plain).collect();
        summary.push_str(&format!(" (path: {})", path.join(".")));
    }

    if let Some(locations) = error.get("locations").and_then(Value::as_array) {
        let locations: Vec<String> = locations
            .iter()
            .filter_map(|loc| {
                let line = loc.get("line")?.as_u64()?;
                let column = loc.get("column")?.as_u64()?;
                Some(format!("{line}:{column}"))
            })
            .collect();
        if !locations.is_empty() {
            summary.push_str(&format!(" at {}", locations.join(", ")));
        }
    }

    if let Some(code) = error
        .get("extensions")
        .and_then(|ext| ext.get("code"))
        .and_then(Value::as_str)
    {
        summary.push_str(&format!(" [{code}]"));
    }

    summary
}

/// Strings without quotes, everything else as JSON.
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
