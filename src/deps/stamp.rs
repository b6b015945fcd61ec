//! Install stamp recording what the environment was last installed from
//!
//! Written inside the environment directory after a successful install, so
//! recreating the environment discards it together with the packages.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use super::manifest::Manifest;
use crate::error::{Result, deps};

/// Stamp file name inside the environment directory
pub const STAMP_FILE: &str = ".chesscast-deps.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallStamp {
    /// BLAKE3 hash of the manifest and its includes as installed
    pub manifest_hash: String,
    /// Interpreter the packages were installed into
    pub interpreter: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    pub launcher_version: String,
}

impl InstallStamp {
    pub fn for_manifest(manifest: &Manifest, interpreter: &Path) -> Self {
        Self {
            manifest_hash: manifest.hash.clone(),
            interpreter: interpreter.display().to_string(),
            requirements: manifest.requirement_lines(),
            launcher_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn path(env_root: &Path) -> PathBuf {
        env_root.join(STAMP_FILE)
    }

    /// Read the stamp; a missing or unparsable stamp reads as `None`
    pub fn read(env_root: &Path) -> Option<Self> {
        let content = fs::read_to_string(Self::path(env_root)).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Write the stamp atomically
    pub fn write(&self, env_root: &Path) -> Result<()> {
        let path = Self::path(env_root);
        let fail = |reason: String| deps::stamp_write_failed(path.display().to_string(), reason);

        let content = serde_json::to_string_pretty(self).map_err(|e| fail(e.to_string()))?;

        let mut file = NamedTempFile::new_in(env_root).map_err(|e| fail(e.to_string()))?;
        file.write_all(content.as_bytes())
            .map_err(|e| fail(e.to_string()))?;
        file.write_all(b"\n").map_err(|e| fail(e.to_string()))?;
        file.persist(&path).map_err(|e| fail(e.error.to_string()))?;

        Ok(())
    }
}
