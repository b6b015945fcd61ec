//! Test fixtures and utilities for reducing test setup duplication.
//!
//! Provides temp project directories and [`FakeRunner`], a [`ProcessRunner`]
//! that records every command and simulates the three kinds of child process
//! a run spawns: `python -m venv`, `python -m pip install` and the main program.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{create_project, FakeRunner, CallKind};
//!
//! #[test]
//! fn my_test() {
//!     let (temp, layout) = create_project();
//!     let runner = FakeRunner::new();
//!     // ... run something against `layout` with `&runner` ...
//!     assert_eq!(runner.count(CallKind::Pip), 1);
//! }
//! ```

use std::cell::RefCell;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::ProjectLayout;
use crate::environment::interpreter;
use crate::process::{CommandSpec, Completed, ExitOutcome, ProcessRunner};

/// Create a temp directory in the system temp location.
///
/// Never relative, so temp dirs are never created under the current working
/// directory (e.g. when `TMPDIR=tmp`).
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    let base = env::temp_dir();
    let base = if base.is_absolute() {
        base
    } else {
        PathBuf::from("/tmp")
    };
    TempDir::new_in(base).expect("Failed to create temp directory")
}

/// Create a project directory with a manifest and a main program.
///
/// # Panics
///
/// Panics if any file cannot be created.
#[must_use]
pub fn create_project() -> (TempDir, ProjectLayout) {
    let temp = create_temp_dir();
    let layout = ProjectLayout::with_defaults(temp.path());
    create_test_files(
        temp.path(),
        &[
            ("requirements.txt", "chess==1.10.0\npygame==2.5.2\n"),
            ("main.py", "print('commentary')\n"),
        ],
    );
    (temp, layout)
}

/// Create test files below `base`.
///
/// # Panics
///
/// Panics if any file cannot be created.
pub fn create_test_files(base: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = base.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&full_path, content).expect("Failed to write test file");
    }
}

/// Which step a recorded command belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Venv,
    Pip,
    Main,
}

impl CallKind {
    pub fn of(spec: &CommandSpec) -> Self {
        if spec.args_start_with(&["-m", "venv"]) {
            CallKind::Venv
        } else if spec.args_start_with(&["-m", "pip"]) {
            CallKind::Pip
        } else {
            CallKind::Main
        }
    }
}

/// Recording fake for every child process of a run
pub struct FakeRunner {
    pub calls: RefCell<Vec<CommandSpec>>,
    /// Programs that fail to spawn with `NotFound`
    pub missing: Vec<PathBuf>,
    pub venv_exit: i32,
    pub pip_exit: i32,
    pub main_exit: i32,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            missing: Vec::new(),
            venv_exit: 0,
            pip_exit: 0,
            main_exit: 0,
        }
    }

    #[must_use]
    pub fn with_main_exit(mut self, code: i32) -> Self {
        self.main_exit = code;
        self
    }

    #[must_use]
    pub fn with_pip_exit(mut self, code: i32) -> Self {
        self.pip_exit = code;
        self
    }

    /// Kinds of the recorded calls, in order
    pub fn kinds(&self) -> Vec<CallKind> {
        self.calls.borrow().iter().map(CallKind::of).collect()
    }

    pub fn count(&self, kind: CallKind) -> usize {
        self.kinds().into_iter().filter(|k| *k == kind).count()
    }

    fn fail(code: i32, stderr: &str) -> Completed {
        Completed {
            outcome: ExitOutcome::Exited(code),
            stderr: stderr.to_string(),
        }
    }
}

impl ProcessRunner for FakeRunner {
    fn run(&self, command: &CommandSpec) -> io::Result<Completed> {
        self.calls.borrow_mut().push(command.clone());
        if self.missing.contains(&command.program) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "program not found"));
        }

        match CallKind::of(command) {
            CallKind::Venv => {
                if self.venv_exit != 0 {
                    return Ok(Self::fail(
                        self.venv_exit,
                        "Error: ensurepip is not available\n",
                    ));
                }
                let root = PathBuf::from(command.args.last().cloned().unwrap_or_default());
                let python = interpreter::venv_interpreter(&root);
                fs::create_dir_all(interpreter::bin_dir(&root))?;
                fs::write(&python, "")?;
                fs::write(root.join(interpreter::PYVENV_CFG), "version = 3.11.4\n")?;
                Ok(Completed::exited(0))
            }
            CallKind::Pip if self.pip_exit != 0 => Ok(Self::fail(
                self.pip_exit,
                "ERROR: No matching distribution found\n",
            )),
            CallKind::Pip => Ok(Completed::exited(0)),
            CallKind::Main => Ok(Completed::exited(self.main_exit)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_create_temp_dir() {
        let temp = create_temp_dir();
        assert!(temp.path().is_absolute());
        assert!(temp.path().exists());
    }

    #[test]
    fn test_create_project() {
        let (_temp, layout) = create_project();
        assert!(layout.manifest.is_file());
        assert!(layout.main_program.is_file());
        assert!(!layout.env_dir.exists());
    }

    #[test]
    fn test_call_kind_classification() {
        let venv = CommandSpec::new("python3").args(["-m", "venv", "venv"]);
        let pip = CommandSpec::new("venv/bin/python").args(["-m", "pip", "install"]);
        let main = CommandSpec::new("venv/bin/python").arg("main.py");
        assert_eq!(CallKind::of(&venv), CallKind::Venv);
        assert_eq!(CallKind::of(&pip), CallKind::Pip);
        assert_eq!(CallKind::of(&main), CallKind::Main);
    }
}
