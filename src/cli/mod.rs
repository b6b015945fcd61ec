//! CLI definitions using clap derive API
//!
//! A bare `chesscast` runs the launcher. Subcommands only cover the
//! launcher itself (version, completions).

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;

pub use completions::CompletionsArgs;

/// chesscast - PGN commentary video launcher
///
/// Prepares the Python environment for the commentary generator and runs it.
#[derive(Parser, Debug)]
#[command(
    name = "chesscast",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Launcher for the PGN chess commentary video generator",
    long_about = "chesscast creates an isolated Python environment (venv/) on first use, \
                  installs requirements.txt into it whenever the manifest changes, then runs \
                  main.py inside it and exits with main.py's exit status.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  chesscast                          \x1b[90m# Set up if needed and run main.py\x1b[0m\n   \
                  chesscast -C ~/chess-commentary    \x1b[90m# Run a project in another directory\x1b[0m\n   \
                  chesscast --python python3.11      \x1b[90m# Create venv/ with a specific interpreter\x1b[0m\n   \
                  chesscast --reinstall              \x1b[90m# Reinstall requirements.txt before running\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Project directory (defaults to current directory)
    #[arg(long, short = 'C', global = true, env = "CHESSCAST_PROJECT_DIR")]
    pub project_dir: Option<PathBuf>,

    /// Base interpreter used to create the environment
    #[arg(long, value_name = "PATH", env = "CHESSCAST_PYTHON")]
    pub python: Option<PathBuf>,

    /// Install dependencies even if they match requirements.txt
    #[arg(long)]
    pub reinstall: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
