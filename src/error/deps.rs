//! Dependency errors

use super::ChesscastError;

/// Creates a missing manifest error
pub fn manifest_missing(path: impl Into<String>) -> ChesscastError {
    ChesscastError::ManifestMissing { path: path.into() }
}

/// Creates a manifest read error
pub fn manifest_read_failed(path: impl Into<String>, reason: impl Into<String>) -> ChesscastError {
    ChesscastError::ManifestReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an installation error
pub fn install_failed(reason: impl Into<String>) -> ChesscastError {
    ChesscastError::DependencyInstallFailed {
        reason: reason.into(),
    }
}

/// Creates a stamp write error
pub fn stamp_write_failed(path: impl Into<String>, reason: impl Into<String>) -> ChesscastError {
    ChesscastError::StampWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
