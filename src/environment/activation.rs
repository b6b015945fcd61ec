//! Explicit activation of the isolated environment
//!
//! Shell activation mutates the calling shell's `PATH` and exports
//! `VIRTUAL_ENV`. Here the same scoping is captured in an
//! [`ActiveEnvironment`] value that builds commands for the install and
//! execute steps; nothing in the launcher's own process environment changes.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{Result, environment};
use crate::process::CommandSpec;
use crate::ui;

/// An activated environment
///
/// Must be released with [`ActiveEnvironment::deactivate`]; dropping it
/// without doing so (an error unwinding past the run) still deactivates.
#[derive(Debug)]
pub struct ActiveEnvironment {
    root: PathBuf,
    interpreter: PathBuf,
    python_version: Option<String>,
    path_var: OsString,
    deactivated: bool,
}

impl ActiveEnvironment {
    pub(super) fn new(
        root: PathBuf,
        interpreter: PathBuf,
        python_version: Option<String>,
    ) -> Result<Self> {
        let bin_dir = super::interpreter::bin_dir(&root);
        let path_var = prepend_path(&bin_dir, env::var_os("PATH"))
            .map_err(|reason| environment::activate_failed(root.display().to_string(), reason))?;

        Ok(Self {
            root,
            interpreter,
            python_version,
            path_var,
            deactivated: false,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn interpreter(&self) -> &Path {
        &self.interpreter
    }

    pub fn python_version(&self) -> Option<&str> {
        self.python_version.as_deref()
    }

    /// A command running the environment's interpreter, scoped to the environment
    pub fn python_command(&self) -> CommandSpec {
        CommandSpec::new(&self.interpreter)
            .env("VIRTUAL_ENV", &self.root)
            .env("PATH", &self.path_var)
            .env_remove("PYTHONHOME")
    }

    /// Leave the environment
    pub fn deactivate(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !self.deactivated {
            self.deactivated = true;
            ui::debug(format!("Deactivated environment {}", self.root.display()));
        }
    }
}

impl Drop for ActiveEnvironment {
    fn drop(&mut self) {
        self.release();
    }
}

fn prepend_path(bin_dir: &Path, current: Option<OsString>) -> std::result::Result<OsString, String> {
    let mut paths = vec![bin_dir.to_path_buf()];
    if let Some(current) = current {
        paths.extend(env::split_paths(&current));
    }
    env::join_paths(paths).map_err(|e| e.to_string())
}
