//! Daybell error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaybellError {
    #[error("{0}")]
    Config(String),

    #[error("Notion error: {0}")]
    Notion(String),

    #[error("Webhook error: {0}")]
    Webhook(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DaybellError>;
