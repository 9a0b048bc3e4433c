/*!
 * Error types for the viewlingo library.
 *
 * This module contains custom error types for the collaborators the
 * translation core talks to, using the thiserror crate for ergonomic
 * error definitions. None of these escape `translate_texts`; they are
 * logged and turned into skipped texts by the orchestrator.
 */

use thiserror::Error;

/// Errors that can occur when creating or using a translation session
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    /// The provider cannot build a session for this pair
    #[error("Unsupported language pair: {source_language} -> {target_language}")]
    UnsupportedPair {
        /// Source language code
        source_language: String,
        /// Target language code
        target_language: String,
    },

    /// The session rejected or failed the translation request
    #[error("Translation failed: {0}")]
    TranslationFailed(String),

    /// The session returned a different number of results than requested
    #[error("Session returned {actual} results for {expected} texts")]
    ResultCountMismatch {
        /// Number of texts sent
        expected: usize,
        /// Number of translations received
        actual: usize,
    },

    /// The backing model or pack is not currently usable
    #[error("Session unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised by the external text recognition engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecognitionError {
    /// The frame could not be decoded or is empty
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// The engine failed while recognizing text
    #[error("Recognition engine failed: {0}")]
    EngineFailed(String),
}

/// Errors raised by the language pack installation subsystem
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PackError {
    /// The status of a pack could not be determined
    #[error("Status check failed for {pair}: {message}")]
    StatusCheckFailed {
        /// Pair being checked, rendered as `source->target`
        pair: String,
        /// Underlying failure
        message: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a translation session
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Error from text recognition
    #[error("Recognition error: {0}")]
    Recognition(#[from] RecognitionError),

    /// Error from the language pack subsystem
    #[error("Language pack error: {0}")]
    Pack(#[from] PackError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
