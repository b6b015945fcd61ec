//! Dependency installation into the isolated environment
//!
//! Whether to install is decided by comparing the manifest's hash with the
//! [`InstallStamp`] left by the last successful install, so a changed
//! manifest is always picked up, not only a missing package.

pub mod manifest;
pub mod stamp;

pub use manifest::Manifest;
pub use stamp::InstallStamp;

use crate::environment::ActiveEnvironment;
use crate::error::{Result, deps};
use crate::process::ProcessRunner;
use crate::ui;

/// How the environment's packages relate to the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyState {
    /// Never installed (or the stamp is unreadable)
    Missing,
    /// Installed from a different manifest
    Stale { recorded: String },
    Current,
}

impl DependencyState {
    pub fn needs_install(&self) -> bool {
        !matches!(self, DependencyState::Current)
    }
}

/// What [`ensure`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyOutcome {
    Installed,
    Skipped,
}

/// Compare the stamp in the environment with the manifest
pub fn check(active: &ActiveEnvironment, manifest: &Manifest) -> DependencyState {
    match InstallStamp::read(active.root()) {
        None => DependencyState::Missing,
        Some(stamp) if stamp.manifest_hash == manifest.hash => DependencyState::Current,
        Some(stamp) => DependencyState::Stale {
            recorded: stamp.manifest_hash,
        },
    }
}

/// Install the manifest into the environment and record the stamp
pub fn install(
    active: &ActiveEnvironment,
    manifest: &Manifest,
    runner: &dyn ProcessRunner,
) -> Result<()> {
    let spec = active
        .python_command()
        .args(["-m", "pip", "install", "--disable-pip-version-check", "-r"])
        .arg(&manifest.path);
    ui::debug(format!("Running {}", spec.display()));

    let completed = runner
        .run(&spec)
        .map_err(|e| deps::install_failed(format!("failed to run installer: {e}")))?;
    if !completed.outcome.success() {
        return Err(deps::install_failed(format!(
            "installer {}",
            completed.failure_reason()
        )));
    }

    InstallStamp::for_manifest(manifest, active.interpreter()).write(active.root())
}

/// Install dependencies unless the environment already matches the manifest
pub fn ensure(
    active: &ActiveEnvironment,
    manifest: &Manifest,
    force: bool,
    runner: &dyn ProcessRunner,
) -> Result<DependencyOutcome> {
    let state = check(active, manifest);
    ui::debug(format!("Dependency state: {state:?}"));

    if !force && !state.needs_install() {
        return Ok(DependencyOutcome::Skipped);
    }

    match state {
        DependencyState::Missing => ui::info(format!(
            "Installing {} dependencies from {}...",
            manifest.requirements.len(),
            manifest.path.display()
        )),
        DependencyState::Stale { recorded } => {
            ui::debug(format!("Installed from {recorded}, manifest is now {}", manifest.hash));
            ui::info(format!(
                "{} changed since the last install, updating dependencies...",
                manifest.path.display()
            ));
        }
        DependencyState::Current => ui::info("Reinstalling dependencies..."),
    }

    install(active, manifest, runner)?;
    Ok(DependencyOutcome::Installed)
}
