//! Configuration errors

use super::ChesscastError;

/// Creates a config read error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> ChesscastError {
    ChesscastError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a config parse error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> ChesscastError {
    ChesscastError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid config error
pub fn invalid(message: impl Into<String>) -> ChesscastError {
    ChesscastError::ConfigInvalid {
        message: message.into(),
    }
}
