//! Exit codes for `fetch-schema`.
//!
//! Each failure class gets its own code so scripts can tell a rejected
//! request from a broken network or a bad environment.

use shopify_introspect::IntrospectionError;
use shopify_schema_config::ConfigError;

/// Exit codes used by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Both files written
    Success = 0,
    /// The endpoint answered with GraphQL errors; nothing was written
    GraphQLErrors = 1,
    /// Required environment variables are missing
    ConfigError = 2,
    /// The introspection result could not be turned into a schema
    SchemaError = 3,
    /// Writing an output file failed
    IoError = 4,
    /// The request failed (connection, HTTP status, unreadable body)
    NetworkError = 5,
    /// Anything not covered above
    Failure = 6,
}

impl ExitCode {
    /// Classifies an error by the first cause in its chain this CLI knows
    /// about.
    #[must_use]
    pub fn from_error(error: &anyhow::Error) -> Self {
        for cause in error.chain() {
            if cause.downcast_ref::<ConfigError>().is_some() {
                return Self::ConfigError;
            }
            if let Some(error) = cause.downcast_ref::<IntrospectionError>() {
                return match error {
                    IntrospectionError::GraphQL(_) => Self::GraphQLErrors,
                    IntrospectionError::Invalid(_) => Self::SchemaError,
                    IntrospectionError::Network(_)
                    | IntrospectionError::Http(..)
                    | IntrospectionError::Parse(_) => Self::NetworkError,
                };
            }
            if cause.downcast_ref::<std::io::Error>().is_some() {
                return Self::IoError;
            }
        }
        Self::Failure
    }

    /// Get the numeric value of this exit code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code.code())
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::GraphQLErrors => write!(f, "GraphQL errors"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::SchemaError => write!(f, "invalid introspection result"),
            Self::IoError => write!(f, "I/O error"),
            Self::NetworkError => write!(f, "network error"),
            Self::Failure => write!(f, "failure"),
        }
    }
}
