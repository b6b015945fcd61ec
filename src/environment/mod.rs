//! Isolated dependency environment
//!
//! The environment is a `python -m venv` directory. It is created once and
//! reused by every later run; chesscast never deletes a working environment.

pub mod activation;
pub mod interpreter;

pub use activation::ActiveEnvironment;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Result, environment};
use crate::process::{CommandSpec, ProcessRunner};
use crate::ui;

/// What [`Environment::ensure`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentStatus {
    Created,
    Reused,
}

/// The isolated environment directory
#[derive(Debug, Clone)]
pub struct Environment {
    root: PathBuf,
}

impl Environment {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    pub fn interpreter(&self) -> PathBuf {
        interpreter::venv_interpreter(&self.root)
    }

    /// Create the environment unless its directory already exists
    ///
    /// The directory is created before any interpreter runs so that an
    /// unwritable location fails without spawning anything. If no base
    /// interpreter manages to populate it, the directory is removed again.
    pub fn ensure(
        &self,
        base_python: Option<&Path>,
        runner: &dyn ProcessRunner,
    ) -> Result<EnvironmentStatus> {
        if self.exists() {
            ui::debug(format!("Reusing environment {}", self.root.display()));
            return Ok(EnvironmentStatus::Reused);
        }

        fs::create_dir_all(&self.root).map_err(|e| {
            environment::create_failed(self.root.display().to_string(), e.to_string())
        })?;

        match self.populate(base_python, runner) {
            Ok(()) => Ok(EnvironmentStatus::Created),
            Err(err) => {
                if let Err(e) = fs::remove_dir_all(&self.root) {
                    ui::warning(format!(
                        "Could not remove incomplete environment {}: {e}",
                        self.root.display()
                    ));
                }
                Err(err)
            }
        }
    }

    fn populate(&self, base_python: Option<&Path>, runner: &dyn ProcessRunner) -> Result<()> {
        let candidates = match base_python {
            Some(python) => vec![python.to_path_buf()],
            None => interpreter::base_candidates(),
        };

        let mut tried = Vec::new();
        for candidate in candidates {
            let spec = CommandSpec::new(&candidate)
                .args(["-m", "venv"])
                .arg(&self.root)
                .capture();
            ui::debug(format!("Running {}", spec.display()));

            match runner.run(&spec) {
                Ok(completed) if completed.outcome.success() => return Ok(()),
                Ok(completed) => {
                    return Err(environment::create_failed(
                        self.root.display().to_string(),
                        format!(
                            "{} -m venv failed: {}",
                            candidate.display(),
                            completed.failure_reason()
                        ),
                    ));
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    tried.push(candidate.display().to_string());
                }
                Err(e) => {
                    return Err(environment::create_failed(
                        self.root.display().to_string(),
                        format!("failed to run {}: {e}", candidate.display()),
                    ));
                }
            }
        }

        Err(environment::no_interpreter(&tried))
    }

    /// Activate the environment
    ///
    /// Fails if the directory has no interpreter, which is what a corrupted
    /// or half-deleted environment looks like.
    pub fn activate(&self) -> Result<ActiveEnvironment> {
        if !self.exists() {
            return Err(environment::activate_failed(
                self.root.display().to_string(),
                "environment directory does not exist",
            ));
        }

        let interpreter = self.interpreter();
        if !interpreter.is_file() {
            return Err(environment::activate_failed(
                self.root.display().to_string(),
                format!("interpreter not found at {}", interpreter.display()),
            ));
        }

        let python_version = fs::read_to_string(self.root.join(interpreter::PYVENV_CFG))
            .ok()
            .and_then(|cfg| interpreter::parse_pyvenv_version(&cfg));

        ActiveEnvironment::new(self.root.clone(), interpreter, python_version)
    }
}
