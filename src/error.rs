//! Error types for Newsrush

use std::io;
use thiserror::Error;

/// Main error type for Newsrush
#[derive(Error, Debug)]
pub enum NewsrushError {
    #[error("News fetch error: {0}")]
    News(String),

    #[error("Translation error: {0}")]
    Translate(String),

    #[error("Speech synthesis error: {0}")]
    Speech(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown language: {0}")]
    Language(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for Newsrush operations
pub type Result<T> = std::result::Result<T, NewsrushError>;

impl From<String> for NewsrushError {
    fn from(s: String) -> Self {
        NewsrushError::Other(s)
    }
}

impl From<&str> for NewsrushError {
    fn from(s: &str) -> Self {
        NewsrushError::Other(s.to_string())
    }
}

impl From<serde_json::Error> for NewsrushError {
    fn from(e: serde_json::Error) -> Self {
        NewsrushError::Other(format!("JSON error: {}", e))
    }
}
