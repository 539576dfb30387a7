//! Configuration parsing errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid YAML data: {0}")]
    DocumentSyntax(#[from] serde_yaml::Error),

    #[error("'language' parameter is missing")]
    MissingLanguage,

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: String, reason: String },

    #[error(transparent)]
    Plan(#[from] buildplan_core::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// The configuration field this error is about, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::Invalid { field, .. } => Some(field),
            ConfigError::MissingLanguage => Some("language"),
            _ => None,
        }
    }
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
