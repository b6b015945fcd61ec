//! Version command implementation
//!
//! Besides the version, prints where a run keeps its state and which
//! interpreters it would try, which is what bug reports usually need.

use crate::config::layout::DEFAULT_ENV_DIR;
use crate::deps::stamp::STAMP_FILE;
use crate::environment::interpreter;
use crate::error::Result;
use crate::program::ENGINE_ENV_VAR;

/// Run version command
pub fn run() -> Result<()> {
    for line in version_lines() {
        println!("{line}");
    }
    Ok(())
}

fn version_lines() -> Vec<String> {
    let candidates = interpreter::base_candidates()
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let profile = if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    };

    vec![
        format!("chesscast {}", env!("CARGO_PKG_VERSION")),
        String::new(),
        "Launcher:".to_string(),
        format!("  Default environment: {DEFAULT_ENV_DIR}/"),
        format!("  Dependency stamp: {DEFAULT_ENV_DIR}/{STAMP_FILE}"),
        format!("  Base interpreters tried: {candidates}"),
        format!("  Engine variable: {ENGINE_ENV_VAR}"),
        format!("  Profile: {profile}"),
    ]
}
