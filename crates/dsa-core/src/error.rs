//! Error types for the DSA agent.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for every layer of the DSA agent.
///
/// Each variant is recoverable: the command loop reports it to the user and
/// keeps accepting commands. Nothing here is retried automatically.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DsaError {
    /// The command is not valid in the current session state
    #[error("{0}")]
    SessionState(String),

    /// Input did not name a known command
    #[error("{0}")]
    UnknownCommand(String),

    /// A submission mode outside the accepted set
    #[error("Invalid mode '{mode}'. Available modes: {available}")]
    InvalidMode { mode: String, available: String },

    /// Wrong number of arguments for a known command
    #[error("Usage: {0}")]
    Usage(String),

    /// Model backend credentials missing or rejected
    #[error("Connection error: {0}")]
    Connection(String),

    /// A solution file could not be read
    #[error("Failed to read solution file '{path}': {message}")]
    FileRead { path: String, message: String },

    /// An artifact could not be written
    #[error("Failed to write to file '{path}': {message}")]
    FileWrite { path: String, message: String },

    /// Network or API failure talking to the model backend
    #[error("Transport error: {0}")]
    Transport(String),

    /// The model backend answered with no completion
    #[error("No choices returned from the model backend")]
    EmptyResponse,

    /// The language has no file extension mapping
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// The model response cannot be turned into an artifact
    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    /// The problem could not be fetched
    #[error("Failed to fetch problem '{slug}': {message}")]
    Fetch { slug: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DsaError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a SessionState error
    pub fn session_state(message: impl Into<String>) -> Self {
        Self::SessionState(message.into())
    }

    /// Creates an UnknownCommand error
    pub fn unknown_command(message: impl Into<String>) -> Self {
        Self::UnknownCommand(message.into())
    }

    /// Creates a Usage error
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Creates a FileRead error
    pub fn file_read(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FileRead {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a FileWrite error
    pub fn file_write(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FileWrite {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a MalformedResponse error
    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Creates a Fetch error
    pub fn fetch(slug: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            slug: slug.into(),
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a session state error
    pub fn is_session_state(&self) -> bool {
        matches!(self, Self::SessionState(_))
    }

    /// Check if this is an invalid mode error
    pub fn is_invalid_mode(&self) -> bool {
        matches!(self, Self::InvalidMode { .. })
    }

    /// Check if this is a connection error
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Check if this is a file read error
    pub fn is_file_read(&self) -> bool {
        matches!(self, Self::FileRead { .. })
    }

    /// Check if this is a transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if this is an unsupported language error
    pub fn is_unsupported_language(&self) -> bool {
        matches!(self, Self::UnsupportedLanguage(_))
    }
}

/// A type alias for `Result<T, DsaError>`.
pub type Result<T> = std::result::Result<T, DsaError>;
