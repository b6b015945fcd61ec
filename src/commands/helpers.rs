//! Command helper utilities

use std::path::{Path, PathBuf};

use normpath::PathExt;

use crate::error::{Result, fs};

/// Resolve the project directory from an optional argument
///
/// If a path is provided, use it. Otherwise, resolve to the current
/// directory. The directory must already exist; nothing is ever created
/// under a mistyped path. The result is absolute and normalized, so later
/// relative-path display strips cleanly.
pub fn resolve_project_dir(project_dir: Option<PathBuf>) -> Result<PathBuf> {
    let path = match project_dir {
        Some(path) => path,
        None => std::env::current_dir()
            .map_err(|e| fs::io_error(format!("Failed to get current directory: {e}")))?,
    };

    if !path.is_dir() {
        return Err(fs::project_dir_not_found(path.display().to_string()));
    }

    Ok(normalize(&path))
}

fn normalize(path: &Path) -> PathBuf {
    path.normalize()
        .map(normpath::BasePathBuf::into_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}
