//! Error types for mailtree

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Folder not found: {0}")]
    PathNotFound(String),

    #[error("Invalid folder path: {0:?}")]
    InvalidPath(String),

    #[error("Message not found: {0}")]
    MessageNotFound(String),

    #[error("No mailbox registered for {0}")]
    UnknownMailbox(String),

    #[error("Address already registered: {0}")]
    AddressInUse(String),

    #[error("Unknown search criterion: {0}")]
    UnknownCriterion(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Script error: {0}")]
    Script(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
