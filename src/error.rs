use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching, extracting or serializing a recipe
#[derive(Error, Debug)]
pub enum ImportError {
    /// Failed to fetch a page over HTTP
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),

    /// An embedded script payload could not be repaired into valid JSON.
    /// The raw fragment has already been written to `dump` when this is
    /// raised; the failure indicates an upstream page-format change.
    #[error("Malformed embedded payload (raw fragment saved to {}): {source}", .dump.display())]
    MalformedPayload {
        source: serde_json::Error,
        dump: PathBuf,
    },

    /// Error parsing HTTP headers
    #[error("Header parse error: {0}")]
    HeaderError(#[from] reqwest::header::InvalidHeaderValue),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Failed to serialize a recipe to TOML
    #[error("Serialization error: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// Failed to deserialize a recipe from TOML
    #[error("Deserialization error: {0}")]
    DeserializeError(#[from] toml::de::Error),

    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
