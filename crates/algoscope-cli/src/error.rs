//! Error types for the algoscope binary.

use thiserror::Error;

/// Errors surfaced to the terminal.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error("no algorithm given")]
    MissingAlgorithm,

    #[error("unexpected argument {0:?}")]
    UnexpectedArgument(String),

    #[error(transparent)]
    Engine(#[from] algoscope_engine::Error),

    #[error("could not build input: {0}")]
    Model(#[from] algoscope_model::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
