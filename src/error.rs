//! Error types for the muncher crate

use thiserror::Error;

/// Main error type for the muncher crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("unknown exploration policy '{name}' (expected 'eps_greedy' or 'ucb')")]
    UnknownPolicy { name: String },

    #[error("unknown state encoder '{name}' (expected 'coarse' or 'sector')")]
    UnknownEncoder { name: String },

    #[error("action {action} is out of range for an action space of {actions}")]
    ActionOutOfRange { action: usize, actions: usize },

    #[error("cannot approximate against an empty value store")]
    EmptyValueStore,

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid progress bar template: {message}")]
    ProgressBarTemplate { message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
