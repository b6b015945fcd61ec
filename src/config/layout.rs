//! Resolved project layout
//!
//! Combines built-in defaults, `chesscast.yaml` and command line overrides
//! into absolute paths. Precedence: command line / environment > file > defaults.

use std::path::{Path, PathBuf};

use super::ProjectConfig;

pub const DEFAULT_ENV_DIR: &str = "venv";
pub const DEFAULT_MANIFEST: &str = "requirements.txt";
pub const DEFAULT_MAIN_PROGRAM: &str = "main.py";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_PIECES_DIR: &str = "pieces";

/// Values supplied on the command line (or through `CHESSCAST_*` variables)
#[derive(Debug, Clone, Default)]
pub struct LayoutOverrides {
    pub python: Option<PathBuf>,
}

/// Every path a run touches, resolved against the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub env_dir: PathBuf,
    pub manifest: PathBuf,
    pub main_program: PathBuf,
    pub output_dir: PathBuf,
    pub pieces_dir: PathBuf,
    /// Explicitly configured engine binary
    pub engine: Option<PathBuf>,
    /// Explicitly configured base interpreter; discovered when `None`
    pub base_python: Option<PathBuf>,
}

impl ProjectLayout {
    /// Layout with every default, rooted at `root`
    #[cfg(test)]
    pub fn with_defaults(root: impl Into<PathBuf>) -> Self {
        Self::resolve(root, &ProjectConfig::default(), &LayoutOverrides::default())
    }

    pub fn resolve(
        root: impl Into<PathBuf>,
        config: &ProjectConfig,
        overrides: &LayoutOverrides,
    ) -> Self {
        let root = root.into();
        let pick = |value: &Option<PathBuf>, default: &str| {
            join_relative(&root, value.as_deref().unwrap_or(Path::new(default)))
        };

        Self {
            env_dir: pick(&config.env_dir, DEFAULT_ENV_DIR),
            manifest: pick(&config.manifest, DEFAULT_MANIFEST),
            main_program: pick(&config.main_program, DEFAULT_MAIN_PROGRAM),
            output_dir: pick(&config.output_dir, DEFAULT_OUTPUT_DIR),
            pieces_dir: pick(&config.pieces_dir, DEFAULT_PIECES_DIR),
            engine: config.engine.as_deref().map(|p| join_relative(&root, p)),
            base_python: overrides
                .python
                .clone()
                .or_else(|| config.python.clone())
                .map(|p| resolve_program(&root, p)),
            root,
        }
    }

    /// Path relative to the project root, for display
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}

fn join_relative(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Bare program names (`python3.12`) are looked up on `PATH` by the OS,
/// anything with a separator is a path relative to the project root.
fn resolve_program(root: &Path, program: PathBuf) -> PathBuf {
    if program.is_absolute() || program.components().count() == 1 {
        program
    } else {
        root.join(program)
    }
}
