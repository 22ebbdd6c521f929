//! Error types for a demonstration run.
//!
//! Every variant is fatal to the run: nothing is retried, the error is
//! returned to the caller after the producer has been released.

use thiserror::Error;

use crate::config::loader::ConfigError;

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum Error {
    /// The producer could not bind its listener.
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// Connection or request failure talking to the producer.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The producer base URL could not be parsed or joined.
    #[error("invalid producer URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The producer answered with a non-success status.
    #[error("producer returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The body is not valid JSON or does not match the envelope shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The body decoded to JSON whose root is not an object.
    #[error("response body is not a JSON object (found {0})")]
    NotAnObject(&'static str),

    /// The server task failed or panicked.
    #[error("server error: {0}")]
    Server(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
