use crate::response::GraphQLErrors;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IntrospectionError>;

#[derive(Debug, Error)]
pub enum IntrospectionError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error {0}: {1}")]
    Http(u16, String),

    #[error("Failed to parse introspection response: {0}")]
    Parse(String),

    #[error("GraphQL endpoint returned errors:\n{0}")]
    GraphQL(GraphQLErrors),

    #[error("Invalid or incomplete introspection result: {0}")]
    Invalid(String),
}

impl IntrospectionError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}
