//! Checks on the files the main program consumes
//!
//! The main program creates `output/` itself and reports missing piece
//! images or a missing engine in its own way, but only after its
//! dependencies have loaded. Checking here surfaces those problems before a
//! long video run starts.

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use wax::{CandidatePath, Glob, Pattern};

use crate::config::ProjectLayout;
use crate::error::{Result, fs as fs_error};
use crate::ui;

/// Piece images the board renderer loads from the pieces directory
pub const PIECE_IMAGES: [&str; 12] = [
    "king-w.png",
    "queen-w.png",
    "rook-w.png",
    "bishop-w.png",
    "knight-w.png",
    "pawn-w.png",
    "king-b.png",
    "queen-b.png",
    "rook-b.png",
    "bishop-b.png",
    "knight-b.png",
    "pawn-b.png",
];

/// Engine directory bundled next to the main program
pub const BUNDLED_ENGINE_DIR: &str = "0.1.0/stockfish";

const ENGINE_NAME: &str = "stockfish";

/// What the checks found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreflightReport {
    pub output_created: bool,
    pub missing_pieces: Vec<String>,
    /// `*.png` files in the pieces directory the renderer never loads
    pub unrecognized_images: Vec<String>,
    pub engine: Option<PathBuf>,
}

/// Run every check; only an uncreatable output directory is an error
pub fn run(layout: &ProjectLayout) -> Result<PreflightReport> {
    let output_created = ensure_output_dir(&layout.output_dir)?;
    if output_created {
        ui::debug(format!(
            "Created output directory {}",
            layout.relative(&layout.output_dir).display()
        ));
    }

    let pieces = layout.relative(&layout.pieces_dir).display().to_string();
    let images = png_file_names(&layout.pieces_dir);
    let missing_pieces = missing_piece_images(&images);
    if missing_pieces.is_empty() {
        ui::debug("All piece images present");
    } else {
        ui::warning(format!(
            "Missing piece images in {pieces}: {}",
            missing_pieces.join(", ")
        ));
    }

    let unrecognized_images = unrecognized_images(&images);
    if !unrecognized_images.is_empty() {
        ui::warning(format!(
            "Images in {pieces} that will not be used: {} (expected names like king-w.png)",
            unrecognized_images.join(", ")
        ));
    }

    let engine = locate_engine(layout, env::var_os("PATH").as_deref());
    match engine {
        Some(ref path) => ui::info(format!("Chess engine: {}", path.display())),
        None => ui::warning("Stockfish not found, position analysis will be limited"),
    }

    Ok(PreflightReport {
        output_created,
        missing_pieces,
        unrecognized_images,
        engine,
    })
}

/// Create the output directory; returns whether it had to be created
pub fn ensure_output_dir(dir: &Path) -> Result<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(dir)
        .map_err(|e| fs_error::create_dir_failed(dir.display().to_string(), e.to_string()))?;
    Ok(true)
}

/// Names from [`PIECE_IMAGES`] absent from the images found
pub fn missing_piece_images(images: &BTreeSet<String>) -> Vec<String> {
    PIECE_IMAGES
        .iter()
        .filter(|name| !images.contains(**name))
        .map(ToString::to_string)
        .collect()
}

/// Found images that are not one of [`PIECE_IMAGES`], such as `King-w.png`
pub fn unrecognized_images(images: &BTreeSet<String>) -> Vec<String> {
    images
        .iter()
        .filter(|name| !PIECE_IMAGES.contains(&name.as_str()))
        .cloned()
        .collect()
}

/// File names in `dir` matching `*.png`
pub fn png_file_names(dir: &Path) -> BTreeSet<String> {
    let Ok(glob) = Glob::new("*.png") else {
        return BTreeSet::new();
    };
    let Ok(entries) = fs::read_dir(dir) else {
        return BTreeSet::new();
    };

    entries
        .filter_map(std::result::Result::ok)
        .filter(|e| e.path().is_file())
        .filter_map(|e| e.file_name().to_str().map(ToString::to_string))
        .filter(|name| glob.matched(&CandidatePath::from(name.as_str())).is_some())
        .collect()
}

/// Find a chess engine: configured path, bundled binary, then `PATH`
pub fn locate_engine(layout: &ProjectLayout, path_var: Option<&std::ffi::OsStr>) -> Option<PathBuf> {
    if let Some(ref configured) = layout.engine {
        if configured.is_file() {
            return Some(configured.clone());
        }
        ui::warning(format!(
            "Configured engine not found at {}",
            configured.display()
        ));
    }

    bundled_engine(&layout.root.join(BUNDLED_ENGINE_DIR))
        .or_else(|| path_var.and_then(|paths| find_on_path(ENGINE_NAME, paths)))
}

/// First file in the bundled engine directory whose name starts with `stockfish`
fn bundled_engine(dir: &Path) -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = fs::read_dir(dir)
        .ok()?
        .filter_map(std::result::Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.to_ascii_lowercase().starts_with(ENGINE_NAME))
        })
        .collect();
    candidates.sort();
    candidates.into_iter().next()
}

fn find_on_path(name: &str, paths: &std::ffi::OsStr) -> Option<PathBuf> {
    let file_name = if cfg!(windows) {
        format!("{name}.exe")
    } else {
        name.to_string()
    };
    env::split_paths(paths)
        .map(|dir| dir.join(&file_name))
        .find(|candidate| candidate.is_file())
}
