//! Isolated environment errors

use super::ChesscastError;

/// Creates an environment creation error
pub fn create_failed(path: impl Into<String>, reason: impl Into<String>) -> ChesscastError {
    ChesscastError::EnvironmentCreateFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an error listing the interpreters that could not be spawned
pub fn no_interpreter(tried: &[String]) -> ChesscastError {
    ChesscastError::NoBaseInterpreter {
        tried: tried.join(", "),
    }
}

/// Creates an environment activation error
pub fn activate_failed(path: impl Into<String>, reason: impl Into<String>) -> ChesscastError {
    ChesscastError::EnvironmentActivateFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
