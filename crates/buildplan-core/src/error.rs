//! Error types for buildplan domain values.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid notification policy '{0}': expected one of always, never, change")]
    InvalidPolicy(String),

    #[error("unknown hook stage: {0}")]
    UnknownHookStage(String),

    #[error("invalid branch pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("missing required field: {0}")]
    MissingField(String),
}

pub type Result<T> = std::result::Result<T, Error>;
