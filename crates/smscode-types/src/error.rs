use std::path::PathBuf;

use thiserror::Error;

/// Fatal configuration errors. The process does not start.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not specified")]
    NotSpecified,

    #[error("cannot read config file {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },

    #[error("cannot parse config file {path}: {reason}")]
    Unparseable { path: PathBuf, reason: String },

    #[error("no users configured in config file")]
    NoUsers,

    #[error("cannot locate message store: {0}")]
    StoreLocation(String),
}

/// Errors from reading the message store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("cannot open message store: {0}")]
    Open(String),

    #[error("message query failed: {0}")]
    Query(String),

    #[error("cannot decode message row: {0}")]
    Decode(String),
}

/// Errors from rendering the HTML page.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("rendering page: {0}")]
    Format(#[from] std::fmt::Error),
}
