//! Error types for the noun translator.
//!
//! Uses `thiserror` for structured error definitions that provide
//! clear context about what went wrong.

use std::path::PathBuf;
use thiserror::Error;

/// A non-success HTTP response, with its body for diagnostics.
#[derive(Error, Debug)]
#[error("HTTP {status}: {body}")]
pub struct ApiFailure {
    pub status: reqwest::StatusCode,
    pub body: String,
}

/// Errors raised while reading posts from the social feed.
#[derive(Error, Debug)]
pub enum SourceError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API error: {0}")]
    ApiError(#[from] ApiFailure),

    /// The credentials were rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Failed to parse an API response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Endpoint URL could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Errors raised by a translation backend.
#[derive(Error, Debug)]
pub enum TranslationError {
    /// HTTP request to API failed
    #[error("API request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error: {0}")]
    ApiError(#[from] ApiFailure),

    /// Failed to parse API response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// The backend returned nothing usable
    #[error("Translation refused: {0}")]
    Refused(String),

    /// Invalid translator configuration
    #[error("Invalid translator configuration: {0}")]
    InvalidConfig(String),
}

/// Errors raised while writing the output file.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while loading the word list.
#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("Failed to read dictionary {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Dictionary {} contains no words", .path.display())]
    Empty { path: PathBuf },
}

/// Error type for configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse config file
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// Missing required configuration value
    #[error("Missing required config value: {0}")]
    MissingValue(String),

    /// Invalid configuration value
    #[error("Invalid config value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Config directory not found
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// A failed pipeline run. Any stage failure aborts the whole run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Post source unavailable: {0}")]
    SourceUnavailable(#[from] SourceError),

    #[error("Failed to translate '{word}': {source}")]
    TranslationFailure {
        word: String,
        #[source]
        source: TranslationError,
    },

    #[error(transparent)]
    Filesystem(#[from] OutputError),
}
