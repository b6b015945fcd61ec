//! Executing the main program inside the activated environment

use std::path::Path;

use crate::config::ProjectLayout;
use crate::environment::ActiveEnvironment;
use crate::error::{Result, program};
use crate::process::{ExitOutcome, ProcessRunner};
use crate::ui;

/// Variable telling the main program where the located chess engine is
pub const ENGINE_ENV_VAR: &str = "CHESSCAST_ENGINE";

/// Run the main program to completion and return how it exited
///
/// The program runs from the project root with the terminal attached, so
/// its own prompts (file selection, progress output) reach the user.
pub fn execute(
    active: &ActiveEnvironment,
    layout: &ProjectLayout,
    engine: Option<&Path>,
    runner: &dyn ProcessRunner,
) -> Result<ExitOutcome> {
    let main_program = &layout.main_program;
    if !main_program.is_file() {
        return Err(program::missing(main_program.display().to_string()));
    }

    let mut spec = active
        .python_command()
        .arg(main_program)
        .current_dir(&layout.root);
    if let Some(engine) = engine {
        spec = spec.env(ENGINE_ENV_VAR, engine);
    }

    ui::info(format!(
        "Starting {}...",
        layout.relative(main_program).display()
    ));
    ui::debug(format!("Running {}", spec.display()));

    let completed = runner
        .run(&spec)
        .map_err(|e| program::spawn_failed(main_program.display().to_string(), e.to_string()))?;

    Ok(completed.outcome)
}
