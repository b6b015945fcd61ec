//! Common test utilities for chesscast integration tests

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Stand-in for a base Python interpreter
///
/// `-m venv DIR` lays out a minimal environment whose `bin/python` is a
/// copy of this script, `-m pip` exits with `$FAKE_PIP_EXIT`, and anything
/// else acts as the main program. Every invocation is appended to
/// `$FAKE_PYTHON_LOG`.
#[cfg(unix)]
const FAKE_PYTHON: &str = r#"#!/bin/sh
echo "call $*" >> "$FAKE_PYTHON_LOG"
if [ "$1" = "-m" ] && [ "$2" = "venv" ]; then
  mkdir -p "$3/bin" || exit 1
  cp "$0" "$3/bin/python" && chmod +x "$3/bin/python"
  echo "version = 3.11.4" > "$3/pyvenv.cfg"
  exit 0
fi
if [ "$1" = "-m" ] && [ "$2" = "pip" ]; then
  exit "${FAKE_PIP_EXIT:-0}"
fi
echo "main engine=${CHESSCAST_ENGINE:-none} venv=${VIRTUAL_ENV:-none}" >> "$FAKE_PYTHON_LOG"
if [ -n "$FAKE_MAIN_SIGNAL" ]; then
  kill -"$FAKE_MAIN_SIGNAL" $$
fi
exit "${FAKE_MAIN_EXIT:-0}"
"#;

/// A project directory for integration tests
#[allow(dead_code)]
pub struct TestProject {
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestProject {
    /// Create an empty project directory
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Create a project with a manifest and a main program
    pub fn with_program() -> Self {
        let project = Self::new();
        project.write_file("requirements.txt", "chess==1.10.0\npygame==2.5.2\n");
        project.write_file("main.py", "print('commentary')\n");
        project
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the project
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists in the project
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Install the fake interpreter outside the project and return its path
    #[cfg(unix)]
    pub fn fake_python(&self) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.temp.path().join("tools").join("python3");
        std::fs::create_dir_all(path.parent().expect("tools dir"))
            .expect("Failed to create tools directory");
        std::fs::write(&path, FAKE_PYTHON).expect("Failed to write fake python");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake python executable");
        path
    }

    /// Where the fake interpreter logs its invocations
    pub fn log_path(&self) -> PathBuf {
        self.temp.path().join("python.log")
    }

    /// Logged invocations, one per line
    pub fn log_lines(&self) -> Vec<String> {
        std::fs::read_to_string(self.log_path())
            .unwrap_or_default()
            .lines()
            .map(ToString::to_string)
            .collect()
    }

    /// A chesscast command rooted at this project, isolated from the caller's config
    pub fn command(&self) -> Command {
        let mut cmd = chesscast_cmd();
        cmd.arg("-C")
            .arg(&self.path)
            .env("FAKE_PYTHON_LOG", self.log_path())
            .env_remove("CHESSCAST_PYTHON")
            .env_remove("CHESSCAST_PROJECT_DIR");
        cmd
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn chesscast_cmd() -> Command {
    Command::cargo_bin("chesscast").expect("chesscast binary should be built")
}
