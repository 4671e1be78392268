//! Error types for precis.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to read {}: {}", .path.display(), .cause)]
    Read { path: PathBuf, cause: String },

    #[error("Text too short: {words} words (minimum {min_words})")]
    TooShort { words: usize, min_words: usize },

    #[error("Summarization model is still loading")]
    NotReady,

    #[error("Model error: {0}")]
    Model(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
