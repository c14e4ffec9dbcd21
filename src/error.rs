//! Error handling and custom error types
//!
//! Provides unified error handling across the client using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("A generation request is already in flight")]
    Busy,
}

impl Error {
    /// True for failures detected before any network call was made.
    pub fn is_local(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::Busy)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
