//! File system errors

use super::ChesscastError;

/// Creates a directory creation error
pub fn create_dir_failed(path: impl Into<String>, reason: impl Into<String>) -> ChesscastError {
    ChesscastError::CreateDirFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a missing project directory error
pub fn project_dir_not_found(path: impl Into<String>) -> ChesscastError {
    ChesscastError::ProjectDirNotFound { path: path.into() }
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> ChesscastError {
    ChesscastError::IoError {
        message: message.into(),
    }
}
