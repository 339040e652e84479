use core::result::Result as CoreResult;
use std::io::Error as IoError;

use reqwest::{Error as ReqwestError, StatusCode};
use serde_json::Error as SerdeJsonError;
use thiserror::Error;
use toml::de::Error as TomlError;

/// Result type for demo operations.
pub type Result<T> = CoreResult<T, Error>;

/// Errors surfaced by the fixture client and its supporting code.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// The HTTP request could not be sent or its body could not be read.
    #[error("HTTP request failed: {0}")]
    Request(#[from] ReqwestError),

    /// A request or response body was not valid JSON for the expected shape.
    #[error("JSON serialization error: {0}")]
    Json(#[from] SerdeJsonError),

    /// TOML deserialization failed.
    #[error("TOML deserialization error: {0}")]
    Toml(#[from] TomlError),

    /// The server answered with a non-success status.
    #[error("{operation} failed with status {status}: {body}")]
    Status {
        /// Operation that issued the request, e.g. `create post`.
        operation: &'static str,
        /// Status code returned by the server.
        status: StatusCode,
        /// Raw response body, kept for diagnostics.
        body: String,
    },

    /// A page element required for rendering does not exist.
    #[error("Element not found: #{0}")]
    MissingElement(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns `true` when the server answered with a non-success status.
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status { .. })
    }

    /// Status code of a [`Error::Status`] failure.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
