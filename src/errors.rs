// ABOUTME: Error types for the marp-slides library
// ABOUTME: Parsing never fails; these cover file access, resources, export and watch mode

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarpError {
    #[error("Failed to read file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to fetch remote resource: {0}")]
    FetchError(#[from] reqwest::Error),

    #[error("Remote resource {url} returned HTTP {status}")]
    RemoteStatusError { url: String, status: u16 },

    #[error("Failed to serialize slides: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Input validation error: {0}")]
    ValidationError(String),

    #[error("Path not found: {0}")]
    PathNotFoundError(PathBuf),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Watch error: {0}")]
    WatchError(String),

    #[error("Unknown error: {0}")]
    UnknownError(String),
}

impl From<anyhow::Error> for MarpError {
    fn from(err: anyhow::Error) -> Self {
        MarpError::UnknownError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MarpError>;
