//! Status output presentation layer
//!
//! This module handles:
//! - Timestamped, leveled status lines (`[INFO] 12:04:05.123 - message`)
//! - Spinners for quiet long-running steps (see [`progress`])
//!
//! Debug lines are only printed when verbose output is enabled with
//! [`set_verbose`]. Errors go to stderr, everything else to stdout.

pub mod progress;

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Local;
use console::Style;

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Enable or disable debug output
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Severity of a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
    Success,
    Debug,
}

impl Level {
    pub fn label(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Success => "SUCCESS",
            Level::Debug => "DEBUG",
        }
    }

    fn style(self) -> Style {
        match self {
            Level::Info => Style::new().blue(),
            Level::Warning => Style::new().yellow(),
            Level::Error => Style::new().red(),
            Level::Success => Style::new().green(),
            Level::Debug => Style::new().cyan(),
        }
    }
}

/// Format a status line without styling
pub fn format_line(level: Level, timestamp: &str, message: &str) -> String {
    format!("[{}] {} - {}", level.label(), timestamp, message)
}

fn timestamp() -> String {
    Local::now().format("%H:%M:%S%.3f").to_string()
}

fn emit(level: Level, message: &str) {
    if level == Level::Debug && !is_verbose() {
        return;
    }

    let line = level
        .style()
        .apply_to(format_line(level, &timestamp(), message));
    if level == Level::Error {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

pub fn info(message: impl AsRef<str>) {
    emit(Level::Info, message.as_ref());
}

pub fn warning(message: impl AsRef<str>) {
    emit(Level::Warning, message.as_ref());
}

pub fn error(message: impl AsRef<str>) {
    emit(Level::Error, message.as_ref());
}

pub fn success(message: impl AsRef<str>) {
    emit(Level::Success, message.as_ref());
}

pub fn debug(message: impl AsRef<str>) {
    emit(Level::Debug, message.as_ref());
}
