//! Child process execution
//!
//! Every external command chesscast runs (the base interpreter creating the
//! environment, the package installer, the main program) goes through the
//! [`ProcessRunner`] trait so the run lifecycle can be exercised without
//! spawning real interpreters.

use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Description of a command to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub cwd: Option<PathBuf>,
    /// Variables set on top of the inherited environment
    pub env: Vec<(OsString, OsString)>,
    /// Variables removed from the inherited environment
    pub env_remove: Vec<OsString>,
    /// Capture stdout/stderr instead of inheriting the terminal
    pub capture: bool,
}

impl CommandSpec {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: Vec::new(),
            env_remove: Vec::new(),
            capture: false,
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    #[must_use]
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn env(mut self, key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> Self {
        self.env
            .push((key.as_ref().to_os_string(), value.as_ref().to_os_string()));
        self
    }

    #[must_use]
    pub fn env_remove(mut self, key: impl AsRef<OsStr>) -> Self {
        self.env_remove.push(key.as_ref().to_os_string());
        self
    }

    #[must_use]
    pub fn capture(mut self) -> Self {
        self.capture = true;
        self
    }

    /// Whether the arguments start with the given sequence
    #[cfg(test)]
    pub fn args_start_with(&self, prefix: &[&str]) -> bool {
        self.args.len() >= prefix.len()
            && self
                .args
                .iter()
                .zip(prefix)
                .all(|(arg, expected)| arg == OsStr::new(expected))
    }

    /// Render the command for status output
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().map(|a| a.to_string_lossy().into_owned()));
        parts.join(" ")
    }
}

/// How a child process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    Exited(i32),
    /// Terminated by a signal (Unix only)
    Signaled(i32),
    Unknown,
}

impl ExitOutcome {
    pub fn success(self) -> bool {
        matches!(self, ExitOutcome::Exited(0))
    }

    /// Exit code to hand back to the shell
    pub fn exit_code(self) -> i32 {
        match self {
            ExitOutcome::Exited(code) => code,
            ExitOutcome::Signaled(signal) => 128 + signal,
            ExitOutcome::Unknown => 1,
        }
    }

    pub fn describe(self) -> String {
        match self {
            ExitOutcome::Exited(code) => format!("exit status {code}"),
            ExitOutcome::Signaled(signal) => format!("terminated by signal {signal}"),
            ExitOutcome::Unknown => "unknown exit status".to_string(),
        }
    }
}

impl From<ExitStatus> for ExitOutcome {
    fn from(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return ExitOutcome::Exited(code);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return ExitOutcome::Signaled(signal);
            }
        }

        ExitOutcome::Unknown
    }
}

/// Result of a finished child process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completed {
    pub outcome: ExitOutcome,
    /// Captured stderr; empty unless the command was captured
    pub stderr: String,
}

impl Completed {
    #[cfg(test)]
    pub fn exited(code: i32) -> Self {
        Self {
            outcome: ExitOutcome::Exited(code),
            stderr: String::new(),
        }
    }

    /// Short failure reason: last stderr line if any, otherwise the exit status
    pub fn failure_reason(&self) -> String {
        self.stderr
            .lines()
            .rev()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .map_or_else(|| self.outcome.describe(), ToString::to_string)
    }
}

/// Runs commands to completion
pub trait ProcessRunner {
    /// Run a command synchronously and wait for it to exit.
    ///
    /// Spawn failures are returned as `io::Error` so callers can tell a
    /// missing program (`ErrorKind::NotFound`) apart from a failed one.
    fn run(&self, command: &CommandSpec) -> io::Result<Completed>;
}

/// Runs commands as real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> io::Result<Completed> {
        let mut command = Command::new(&spec.program);
        command.args(&spec.args);
        if let Some(ref cwd) = spec.cwd {
            command.current_dir(cwd);
        }
        for key in &spec.env_remove {
            command.env_remove(key);
        }
        for (key, value) in &spec.env {
            command.env(key, value);
        }

        if spec.capture {
            let output = command.stdin(Stdio::null()).output()?;
            Ok(Completed {
                outcome: output.status.into(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        } else {
            let status = command.status()?;
            Ok(Completed {
                outcome: status.into(),
                stderr: String::new(),
            })
        }
    }
}
