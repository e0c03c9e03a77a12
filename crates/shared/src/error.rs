//! Error types shared across the chat workflow.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("message text must not be empty")]
    EmptyMessage,
    #[error("unknown quick action: {0}")]
    UnknownAction(String),
    #[error("no API key configured")]
    MissingApiKey,
}
