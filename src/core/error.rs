//! Error types for the isobuild engine

use thiserror::Error;

/// Main error type for the engine
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Block type '{0}' already registered")]
    DuplicateBlockType(String),

    #[error("Unknown block type '{0}'")]
    UnknownBlockType(String),

    #[error("Storage error: {0}")]
    Storage(String),
}
