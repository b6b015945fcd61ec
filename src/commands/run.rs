//! Launcher run command
//!
//! Resolves the project layout and hands it to the orchestrator.

use std::path::PathBuf;

use crate::commands::helpers::resolve_project_dir;
use crate::config::{LayoutOverrides, ProjectConfig, ProjectLayout};
use crate::error::Result;
use crate::orchestrator::{RunOptions, RunOrchestrator};
use crate::process::{ProcessRunner, SystemRunner};
use crate::ui;

/// Arguments for a run, taken from the top-level CLI
#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    pub project_dir: Option<PathBuf>,
    pub python: Option<PathBuf>,
    pub reinstall: bool,
}

/// Run the launcher and return the exit code to terminate with
pub fn run(args: RunArgs) -> Result<i32> {
    run_with(args, &SystemRunner)
}

fn run_with(args: RunArgs, runner: &dyn ProcessRunner) -> Result<i32> {
    let layout = resolve_layout(&args)?;
    ui::debug(format!("Project directory: {}", layout.root.display()));

    let options = RunOptions {
        reinstall: args.reinstall,
    };
    let mut orchestrator = RunOrchestrator::new(&layout, runner, options);
    let result = orchestrator.run();
    ui::debug(format!(
        "Steps run: {}",
        orchestrator
            .report()
            .sequence()
            .iter()
            .map(|step| format!("{step:?}"))
            .collect::<Vec<_>>()
            .join(" -> ")
    ));
    result
}

fn resolve_layout(args: &RunArgs) -> Result<ProjectLayout> {
    let root = resolve_project_dir(args.project_dir.clone())?;
    let config = ProjectConfig::load(&root)?;
    let overrides = LayoutOverrides {
        python: args.python.clone(),
    };
    Ok(ProjectLayout::resolve(root, &config, &overrides))
}
