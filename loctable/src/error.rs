//! All error types for the loctable crate.
//!
//! These are returned from all fallible operations (parsing, serialization, conversion, etc.).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown format `{0}`")]
    UnknownFormat(String),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid data: {0}")]
    DataMismatch(String),

    #[error("invalid locale tag `{0}`")]
    InvalidLocale(String),

    #[error("input is empty")]
    EmptyInput,
}

impl Error {
    /// Creates a new data mismatch error
    pub fn data_mismatch(message: impl Into<String>) -> Self {
        Error::DataMismatch(message.into())
    }
}
