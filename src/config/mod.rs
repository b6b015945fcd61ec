//! Configuration file handling for chesscast
//!
//! This module contains:
//! - `chesscast.yaml` - optional per-project overrides of the default layout
//! - [`ProjectLayout`] - the resolved set of paths a run operates on

pub mod layout;

pub use layout::{LayoutOverrides, ProjectLayout};

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, config};

/// Project configuration file name, looked up in the project root
pub const CONFIG_FILE: &str = "chesscast.yaml";

/// Project configuration (chesscast.yaml)
///
/// Every key is optional; relative paths are resolved against the project root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Isolated environment directory (default `venv`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_dir: Option<PathBuf>,

    /// Dependency manifest (default `requirements.txt`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PathBuf>,

    /// Main program (default `main.py`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_program: Option<PathBuf>,

    /// Video output directory (default `output`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Piece image directory (default `pieces`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pieces_dir: Option<PathBuf>,

    /// Chess engine binary, checked before the bundled one and `PATH`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<PathBuf>,

    /// Base interpreter used to create the environment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub python: Option<PathBuf>,
}

impl ProjectConfig {
    /// Parse project configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty file deserializes to a unit value, not a mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `chesscast.yaml` from the project root, falling back to defaults
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| config::read_failed(path.display().to_string(), e.to_string()))?;

        Self::from_yaml(&content).map_err(|e| match e {
            crate::error::ChesscastError::ConfigParseFailed { reason, .. } => {
                config::parse_failed(path.display().to_string(), reason)
            }
            other => other,
        })
    }

    fn validate(&self) -> Result<()> {
        let paths = [
            ("env_dir", &self.env_dir),
            ("manifest", &self.manifest),
            ("main_program", &self.main_program),
            ("output_dir", &self.output_dir),
            ("pieces_dir", &self.pieces_dir),
            ("engine", &self.engine),
            ("python", &self.python),
        ];

        for (key, value) in paths {
            if value
                .as_ref()
                .is_some_and(|p| p.as_os_str().is_empty())
            {
                return Err(config::invalid(format!("{key} must not be empty")));
            }
        }

        if self
            .env_dir
            .as_ref()
            .is_some_and(|p| p == Path::new(".") || p == Path::new("./"))
        {
            return Err(config::invalid(
                "env_dir must not be the project root itself",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChesscastError;
    use tempfile::TempDir;

    #[test]
    fn test_from_yaml_full() {
        let yaml = r"
env_dir: .venv
manifest: deps/requirements.txt
main_program: app/main.py
output_dir: videos
pieces_dir: assets/pieces
engine: /usr/games/stockfish
python: /usr/bin/python3.12
";
        let config = ProjectConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.env_dir, Some(PathBuf::from(".venv")));
        assert_eq!(config.manifest, Some(PathBuf::from("deps/requirements.txt")));
        assert_eq!(config.main_program, Some(PathBuf::from("app/main.py")));
        assert_eq!(config.output_dir, Some(PathBuf::from("videos")));
        assert_eq!(config.pieces_dir, Some(PathBuf::from("assets/pieces")));
        assert_eq!(config.engine, Some(PathBuf::from("/usr/games/stockfish")));
        assert_eq!(config.python, Some(PathBuf::from("/usr/bin/python3.12")));
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = ProjectConfig::from_yaml("env_dir: .venv\n").unwrap();
        assert_eq!(config.env_dir, Some(PathBuf::from(".venv")));
        assert!(config.manifest.is_none());
    }

    #[test]
    fn test_from_yaml_empty() {
        let config = ProjectConfig::from_yaml("  \n").unwrap();
        assert_eq!(config, ProjectConfig::default());
    }

    #[test]
    fn test_from_yaml_rejects_unknown_key() {
        let result = ProjectConfig::from_yaml("venv: other\n");
        assert!(matches!(
            result,
            Err(ChesscastError::ConfigParseFailed { .. })
        ));
    }

    #[test]
    fn test_from_yaml_rejects_empty_path() {
        let result = ProjectConfig::from_yaml("manifest: \"\"\n");
        assert!(matches!(result, Err(ChesscastError::ConfigInvalid { .. })));
    }

    #[test]
    fn test_from_yaml_rejects_root_env_dir() {
        let result = ProjectConfig::from_yaml("env_dir: .\n");
        assert!(matches!(result, Err(ChesscastError::ConfigInvalid { .. })));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = ProjectConfig::load(temp.path()).unwrap();
        assert_eq!(config, ProjectConfig::default());
    }

    #[test]
    fn test_load_directory_is_read_error() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join(CONFIG_FILE)).unwrap();

        let err = ProjectConfig::load(temp.path()).unwrap_err();

        assert!(matches!(err, ChesscastError::ConfigReadFailed { .. }));
        assert!(err.to_string().contains(CONFIG_FILE));
    }

    #[test]
    fn test_load_reports_file_path_on_parse_error() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE), "env_dir: [unclosed\n").unwrap();

        let err = ProjectConfig::load(temp.path()).unwrap_err();
        match err {
            ChesscastError::ConfigParseFailed { path, .. } => {
                assert!(path.ends_with(CONFIG_FILE));
            }
            other => panic!("Expected ConfigParseFailed, got {other:?}"),
        }
    }
}
