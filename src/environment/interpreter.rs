//! Interpreter locations inside and outside the isolated environment

use std::path::{Path, PathBuf};

#[cfg(windows)]
const BIN_DIR: &str = "Scripts";
#[cfg(not(windows))]
const BIN_DIR: &str = "bin";

#[cfg(windows)]
const PYTHON_EXE: &str = "python.exe";
#[cfg(not(windows))]
const PYTHON_EXE: &str = "python";

/// File written by `python -m venv` describing the environment
pub const PYVENV_CFG: &str = "pyvenv.cfg";

/// Directory holding the environment's executables
pub fn bin_dir(env_root: &Path) -> PathBuf {
    env_root.join(BIN_DIR)
}

/// The environment's own interpreter
pub fn venv_interpreter(env_root: &Path) -> PathBuf {
    bin_dir(env_root).join(PYTHON_EXE)
}

/// Interpreters tried, in order, when none is configured
pub fn base_candidates() -> Vec<PathBuf> {
    let names: &[&str] = if cfg!(windows) {
        &["py", "python"]
    } else {
        &["python3", "python"]
    };
    names.iter().map(PathBuf::from).collect()
}

/// Read the Python version recorded in `pyvenv.cfg`
///
/// Newer interpreters write `version`, older ones `version_info`.
pub fn parse_pyvenv_version(content: &str) -> Option<String> {
    let mut fallback = None;
    for line in content.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key.trim() {
            "version" => return Some(value.to_string()),
            "version_info" => fallback = Some(value.to_string()),
            _ => {}
        }
    }
    fallback
}
