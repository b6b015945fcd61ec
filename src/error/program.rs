//! Main program errors

use super::ChesscastError;

pub fn missing(path: impl Into<String>) -> ChesscastError {
    ChesscastError::MainProgramMissing { path: path.into() }
}

pub fn spawn_failed(path: impl Into<String>, reason: impl Into<String>) -> ChesscastError {
    ChesscastError::MainProgramSpawnFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
