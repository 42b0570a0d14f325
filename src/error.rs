//! Error types for the PDF Markdown MCP server.

use thiserror::Error;

/// Result type alias for the PDF Markdown MCP server.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the PDF Markdown MCP server.
#[derive(Error, Debug)]
pub enum Error {
    /// Document file not found
    #[error("Document not found: {path}")]
    DocumentNotFound { path: String },

    /// Path exists but is not a regular file
    #[error("Not a file: {path}")]
    NotAFile { path: String },

    /// Path exists but is not a directory
    #[error("Not a directory: {path}")]
    NotADirectory { path: String },

    /// Path access denied (outside allowed resource directories)
    #[error("Path access denied: {path}")]
    PathAccessDenied { path: String },

    /// No usable conversion engine found on PATH
    #[error("Conversion engine not found: {engine}")]
    EngineNotFound { engine: String },

    /// Conversion subprocess exited with a failure status
    #[error("Conversion failed ({engine}): {stderr}")]
    ConversionFailed { engine: String, stderr: String },

    /// Conversion subprocess exceeded the configured timeout
    #[error("Conversion timed out after {seconds}s")]
    ConversionTimeout { seconds: u64 },

    /// Conversion engine produced output that is not valid UTF-8 text
    #[error("Conversion produced non-text output: {reason}")]
    InvalidOutput { reason: String },

    /// Invalid tool parameters
    #[error("Invalid parameters: {reason}")]
    InvalidParams { reason: String },

    /// Input document exceeds the configured size limit
    #[error("Input too large: {size} bytes (max: {max_size} bytes)")]
    InputTooLarge { size: u64, max_size: u64 },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Return a sanitized error message safe to send to clients.
    /// Internal details (paths, subprocess stderr) are omitted.
    /// Full details should be logged via tracing before calling this.
    pub fn client_message(&self) -> String {
        match self {
            Error::DocumentNotFound { .. } => "Document not found".to_string(),
            Error::NotAFile { .. } => "Not a file".to_string(),
            Error::NotADirectory { .. } => "Not a directory".to_string(),
            Error::PathAccessDenied { .. } => "Access denied".to_string(),
            Error::EngineNotFound { engine } => {
                format!("Conversion engine not available: {}", engine)
            }
            Error::ConversionFailed { engine, .. } => format!("Conversion failed ({})", engine),
            Error::ConversionTimeout { seconds } => {
                format!("Conversion timed out after {}s", seconds)
            }
            Error::InvalidOutput { .. } => "Conversion produced non-text output".to_string(),
            Error::InvalidParams { reason } => format!("Invalid parameters: {}", reason),
            Error::InputTooLarge { max_size, .. } => {
                format!("Input exceeds maximum size of {} bytes", max_size)
            }
            Error::Io(_) => "I/O error".to_string(),
            Error::Serialization(_) => "Serialization error".to_string(),
        }
    }
}
