//! Error types and handling for chesscast
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Constructor functions are grouped into sub-modules by error domain:
//! - [`environment`]: Isolated environment creation and activation
//! - [`deps`]: Dependency manifest and installation
//! - [`program`]: Main program execution
//! - [`config`]: Project configuration file
//! - [`fs`]: File system errors

pub mod config;
pub mod deps;
pub mod environment;
pub mod fs;
pub mod program;


use miette::Diagnostic;
use thiserror::Error;

/// Main error type for chesscast operations
#[derive(Error, Diagnostic, Debug)]
pub enum ChesscastError {
    // Environment errors
    #[error("Failed to create environment at {path}: {reason}")]
    #[diagnostic(
        code(chesscast::environment::create_failed),
        help("Check that the project directory is writable and that Python 3 with the venv module is installed")
    )]
    EnvironmentCreateFailed { path: String, reason: String },

    #[error("No Python interpreter found (tried: {tried})")]
    #[diagnostic(
        code(chesscast::environment::no_interpreter),
        help("Install Python 3 or point chesscast at an interpreter with --python <PATH>")
    )]
    NoBaseInterpreter { tried: String },

    #[error("Failed to activate environment at {path}: {reason}")]
    #[diagnostic(
        code(chesscast::environment::activate_failed),
        help("The environment looks corrupted. Delete the directory and run chesscast again to recreate it")
    )]
    EnvironmentActivateFailed { path: String, reason: String },

    // Dependency errors
    #[error("Dependency manifest not found: {path}")]
    #[diagnostic(
        code(chesscast::deps::manifest_missing),
        help("Create requirements.txt listing the packages main.py needs")
    )]
    ManifestMissing { path: String },

    #[error("Failed to read dependency manifest {path}: {reason}")]
    #[diagnostic(code(chesscast::deps::manifest_read_failed))]
    ManifestReadFailed { path: String, reason: String },

    #[error("Dependency installation failed: {reason}")]
    #[diagnostic(
        code(chesscast::deps::install_failed),
        help("Check network access and the versions pinned in requirements.txt")
    )]
    DependencyInstallFailed { reason: String },

    #[error("Failed to record installed dependencies in {path}: {reason}")]
    #[diagnostic(code(chesscast::deps::stamp_write_failed))]
    StampWriteFailed { path: String, reason: String },

    // Main program errors
    #[error("Main program not found: {path}")]
    #[diagnostic(
        code(chesscast::program::missing),
        help("Run chesscast from the project directory or pass --project-dir <DIR>")
    )]
    MainProgramMissing { path: String },

    #[error("Failed to start main program {path}: {reason}")]
    #[diagnostic(code(chesscast::program::spawn_failed))]
    MainProgramSpawnFailed { path: String, reason: String },

    // Configuration errors
    #[error("Failed to read configuration file {path}: {reason}")]
    #[diagnostic(code(chesscast::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file {path}: {reason}")]
    #[diagnostic(
        code(chesscast::config::parse_failed),
        help("Valid keys: env_dir, manifest, main_program, output_dir, pieces_dir, engine, python")
    )]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(chesscast::config::invalid))]
    ConfigInvalid { message: String },

    // CLI errors
    #[error("Unknown shell: {shell}")]
    #[diagnostic(
        code(chesscast::cli::unknown_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnknownShell { shell: String },

    // File system errors
    #[error("Project directory not found: {path}")]
    #[diagnostic(
        code(chesscast::fs::project_dir_not_found),
        help("Check the --project-dir / CHESSCAST_PROJECT_DIR value")
    )]
    ProjectDirNotFound { path: String },

    #[error("Failed to create directory {path}: {reason}")]
    #[diagnostic(code(chesscast::fs::create_dir_failed))]
    CreateDirFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(chesscast::fs::io_error))]
    IoError { message: String },
}

impl From<serde_yaml::Error> for ChesscastError {
    fn from(err: serde_yaml::Error) -> Self {
        ChesscastError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, ChesscastError>;
