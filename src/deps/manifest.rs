//! Dependency manifest (requirements.txt)
//!
//! The installer reads the file itself; parsing here only serves status
//! output and the stamp. The hash covers the raw bytes of the manifest and
//! of every file it pulls in with `-r` or `-c`, so any edit to any of them,
//! including comments or option lines, marks the stamp stale.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use normpath::{BasePathBuf, PathExt};

use crate::error::{Result, deps};
use crate::hash;

/// One requirement line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Distribution name as written (`pygame`, `moviepy`)
    pub name: String,
    /// Everything after the name: version specifiers, extras, markers
    pub spec: String,
}

impl Requirement {
    /// Parse a single line; `None` for blanks, comments and option lines
    pub fn parse(line: &str) -> Option<Self> {
        let line = strip_comment(line).trim();
        if line.is_empty() || line.starts_with('-') {
            return None;
        }

        let split = line
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
            .unwrap_or(line.len());
        let (name, spec) = line.split_at(split);
        if name.is_empty() {
            return None;
        }

        Some(Self {
            name: name.to_string(),
            spec: spec.trim().to_string(),
        })
    }
}

impl std::fmt::Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.spec.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}{}", self.name, self.spec)
        }
    }
}

/// `#` starts a comment at line start or after whitespace
fn strip_comment(line: &str) -> &str {
    if line.trim_start().starts_with('#') {
        return "";
    }
    match line.find(" #").or_else(|| line.find("\t#")) {
        Some(index) => &line[..index],
        None => line,
    }
}

/// Key for cycle detection; `a/../b.txt` and `b.txt` are the same file
fn normalized(path: &Path) -> PathBuf {
    path.normalize()
        .map(BasePathBuf::into_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}

/// What an include line pulls in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncludeKind {
    /// `-r` / `--requirement`: more requirements
    Requirements,
    /// `-c` / `--constraint`: version constraints only
    Constraints,
}

/// Parse an include line into its kind and the path as written
pub fn parse_include(line: &str) -> Option<(IncludeKind, &str)> {
    let line = strip_comment(line).trim();
    let options = [
        ("--requirement", IncludeKind::Requirements),
        ("--constraint", IncludeKind::Constraints),
        ("-r", IncludeKind::Requirements),
        ("-c", IncludeKind::Constraints),
    ];

    options.iter().find_map(|(flag, kind)| {
        let rest = line.strip_prefix(flag)?;
        let target = match rest.strip_prefix('=') {
            Some(target) => target,
            None if flag.len() == 2 => rest,
            None if rest.starts_with(char::is_whitespace) => rest,
            None => return None,
        };
        let target = target.trim();
        (!target.is_empty()).then_some((*kind, target))
    })
}

/// A loaded manifest
#[derive(Debug, Clone)]
pub struct Manifest {
    pub path: PathBuf,
    pub requirements: Vec<Requirement>,
    /// Files pulled in with `-r` or `-c`, in the order first seen
    pub includes: Vec<PathBuf>,
    pub hash: String,
}

impl Manifest {
    /// Load and hash the manifest with everything it includes
    ///
    /// A missing manifest is its own error; a missing include is a read
    /// failure of that include.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                deps::manifest_missing(path.display().to_string())
            } else {
                deps::manifest_read_failed(path.display().to_string(), e.to_string())
            }
        })?;

        let mut manifest = Self::from_bytes(path, &bytes);
        let mut hashed = bytes.clone();
        let mut seen = BTreeSet::from([normalized(path)]);
        manifest.load_includes(path, &bytes, &mut hashed, &mut seen)?;
        if !manifest.includes.is_empty() {
            manifest.hash = hash::hash_bytes(&hashed);
        }

        Ok(manifest)
    }

    fn load_includes(
        &mut self,
        file: &Path,
        bytes: &[u8],
        hashed: &mut Vec<u8>,
        seen: &mut BTreeSet<PathBuf>,
    ) -> Result<()> {
        let content = String::from_utf8_lossy(bytes).into_owned();
        let base = file.parent().unwrap_or_else(|| Path::new(""));

        for (kind, target) in content.lines().filter_map(parse_include) {
            let included = base.join(target);
            if !seen.insert(normalized(&included)) {
                continue;
            }

            let included_bytes = fs::read(&included).map_err(|e| {
                deps::manifest_read_failed(
                    included.display().to_string(),
                    format!("included from {}: {e}", file.display()),
                )
            })?;

            hashed.push(0);
            hashed.extend_from_slice(target.as_bytes());
            hashed.push(0);
            hashed.extend_from_slice(&included_bytes);

            if kind == IncludeKind::Requirements {
                self.requirements.extend(
                    String::from_utf8_lossy(&included_bytes)
                        .lines()
                        .filter_map(Requirement::parse),
                );
            }
            self.includes.push(included.clone());
            self.load_includes(&included, &included_bytes, hashed, seen)?;
        }

        Ok(())
    }

    pub fn from_bytes(path: &Path, bytes: &[u8]) -> Self {
        let content = String::from_utf8_lossy(bytes);
        Self {
            path: path.to_path_buf(),
            requirements: content.lines().filter_map(Requirement::parse).collect(),
            includes: Vec::new(),
            hash: hash::hash_bytes(bytes),
        }
    }

    /// Requirement lines in their written form
    pub fn requirement_lines(&self) -> Vec<String> {
        self.requirements.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChesscastError;
    use crate::test_fixtures::{create_temp_dir, create_test_files};

    #[test]
    fn test_parse_pinned() {
        let req = Requirement::parse("pygame==2.5.2").unwrap();
        assert_eq!(req.name, "pygame");
        assert_eq!(req.spec, "==2.5.2");
        assert_eq!(req.to_string(), "pygame==2.5.2");
    }

    #[test]
    fn test_parse_bare_name() {
        let req = Requirement::parse("python-chess").unwrap();
        assert_eq!(req.name, "python-chess");
        assert!(req.spec.is_empty());
    }

    #[test]
    fn test_parse_extras_and_markers() {
        let req = Requirement::parse("moviepy[optional] >= 1.0 ; python_version < \"3.12\"").unwrap();
        assert_eq!(req.name, "moviepy");
        assert!(req.spec.starts_with("[optional]"));
    }

    #[test]
    fn test_parse_skips_comments_and_options() {
        assert!(Requirement::parse("# rendering").is_none());
        assert!(Requirement::parse("   ").is_none());
        assert!(Requirement::parse("-r base.txt").is_none());
        assert!(Requirement::parse("--index-url https://pypi.org/simple").is_none());
    }

    #[test]
    fn test_parse_strips_trailing_comment() {
        let req = Requirement::parse("pyttsx3==2.90  # narration").unwrap();
        assert_eq!(req.to_string(), "pyttsx3==2.90");
    }

    #[test]
    fn test_from_bytes() {
        let manifest = Manifest::from_bytes(
            Path::new("requirements.txt"),
            b"# chess\nchess==1.10.0\n\nstockfish\n-r extra.txt\nopencv-python>=4.8\n",
        );
        assert_eq!(
            manifest.requirement_lines(),
            vec!["chess==1.10.0", "stockfish", "opencv-python>=4.8"]
        );
        assert!(manifest.hash.starts_with(crate::hash::HASH_PREFIX));
    }

    #[test]
    fn test_parse_include_forms() {
        assert_eq!(
            parse_include("-r base.txt"),
            Some((IncludeKind::Requirements, "base.txt"))
        );
        assert_eq!(
            parse_include("-rbase.txt"),
            Some((IncludeKind::Requirements, "base.txt"))
        );
        assert_eq!(
            parse_include("--requirement=render/video.txt  # moviepy"),
            Some((IncludeKind::Requirements, "render/video.txt"))
        );
        assert_eq!(
            parse_include("-c constraints.txt"),
            Some((IncludeKind::Constraints, "constraints.txt"))
        );
        assert_eq!(parse_include("--requirements-only x"), None);
        assert_eq!(parse_include("--index-url https://pypi.org/simple"), None);
        assert_eq!(parse_include("chess==1.10.0"), None);
    }

    #[test]
    fn test_load_without_includes_hashes_raw_bytes() {
        let temp = create_temp_dir();
        create_test_files(temp.path(), &[("requirements.txt", "chess==1.10.0\n")]);

        let manifest = Manifest::load(&temp.path().join("requirements.txt")).unwrap();

        assert!(manifest.includes.is_empty());
        assert_eq!(manifest.hash, crate::hash::hash_bytes(b"chess==1.10.0\n"));
    }

    #[test]
    fn test_load_follows_includes() {
        let temp = create_temp_dir();
        create_test_files(
            temp.path(),
            &[
                ("requirements.txt", "-r base.txt\n-c constraints.txt\nmoviepy==1.0.3\n"),
                ("base.txt", "chess==1.10.0\n-r render/extra.txt\n"),
                ("render/extra.txt", "pygame==2.5.2\n-r ../base.txt\n"),
                ("constraints.txt", "numpy<2\n"),
            ],
        );

        let manifest = Manifest::load(&temp.path().join("requirements.txt")).unwrap();

        assert_eq!(
            manifest.requirement_lines(),
            vec!["moviepy==1.0.3", "chess==1.10.0", "pygame==2.5.2"]
        );
        assert_eq!(manifest.includes.len(), 3);
    }

    #[test]
    fn test_included_file_edit_changes_hash() {
        let temp = create_temp_dir();
        create_test_files(
            temp.path(),
            &[
                ("requirements.txt", "-r base.txt\nchess==1.10.0\n"),
                ("base.txt", "pygame==2.5.2\n"),
            ],
        );
        let path = temp.path().join("requirements.txt");
        let before = Manifest::load(&path).unwrap();

        create_test_files(temp.path(), &[("base.txt", "pygame==2.6.0\n")]);
        let after = Manifest::load(&path).unwrap();

        assert_ne!(before.hash, after.hash);
    }

    #[test]
    fn test_constraints_edit_changes_hash() {
        let temp = create_temp_dir();
        create_test_files(
            temp.path(),
            &[
                ("requirements.txt", "-c constraints.txt\nchess\n"),
                ("constraints.txt", "chess==1.10.0\n"),
            ],
        );
        let path = temp.path().join("requirements.txt");
        let before = Manifest::load(&path).unwrap();

        create_test_files(temp.path(), &[("constraints.txt", "chess==1.11.0\n")]);

        assert_ne!(before.hash, Manifest::load(&path).unwrap().hash);
        assert_eq!(before.requirement_lines(), vec!["chess"]);
    }

    #[test]
    fn test_missing_include_is_read_error() {
        let temp = create_temp_dir();
        create_test_files(temp.path(), &[("requirements.txt", "-r base.txt\n")]);

        let err = Manifest::load(&temp.path().join("requirements.txt")).unwrap_err();

        assert!(matches!(err, ChesscastError::ManifestReadFailed { .. }));
        assert!(err.to_string().contains("base.txt"));
    }

    #[test]
    fn test_load_missing() {
        let temp = create_temp_dir();
        let err = Manifest::load(&temp.path().join("requirements.txt")).unwrap_err();
        assert!(matches!(err, ChesscastError::ManifestMissing { .. }));
    }

    #[test]
    fn test_load_directory_is_read_error() {
        let temp = create_temp_dir();
        let err = Manifest::load(temp.path()).unwrap_err();
        assert!(matches!(err, ChesscastError::ManifestReadFailed { .. }));
    }
}
