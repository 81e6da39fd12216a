use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable `{var}`")]
    Missing { var: &'static str },

    #[error("Missing required environment variables: {}", vars.join(", "))]
    MissingMany { vars: Vec<&'static str> },

    #[error("Environment variable `{var}` is not valid unicode")]
    NotUnicode { var: &'static str },
}

impl ConfigError {
    /// Names of every variable this error is about.
    #[must_use]
    pub fn vars(&self) -> Vec<&'static str> {
        match self {
            Self::Missing { var } | Self::NotUnicode { var } => vec![*var],
            Self::MissingMany { vars } => vars.clone(),
        }
    }
}
