/*!
 * Error types for the termaudit application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur while reading a TMX document
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TmxError {
    /// The document has no `<tmx>` root element
    #[error("Not a TMX document: missing <tmx> root element")]
    MissingRoot,

    /// The document has no `<body>` element
    #[error("Malformed TMX document: missing <body> element")]
    MissingBody,

    /// A character reference could not be decoded
    #[error("Invalid character reference: &{0};")]
    InvalidEntity(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Wrong number or type of command-line arguments
    #[error("Invalid invocation: {0}")]
    Invocation(String),

    /// Error from TMX parsing
    #[error("TMX error: {0}")]
    Tmx(#[from] TmxError),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

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
