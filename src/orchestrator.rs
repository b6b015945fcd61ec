//! Run orchestrator
//!
//! Drives one run through a fixed, linear sequence:
//!
//! 1. Ensure the isolated environment exists (create it if absent)
//! 2. Activate it
//! 3. Ensure dependencies match the manifest (install if not)
//! 4. Preflight checks on the main program's inputs
//! 5. Execute the main program
//! 6. Deactivate the environment
//!
//! Any failure before step 5 stops the run. Once step 2 has succeeded,
//! step 6 runs exactly once whatever happens in steps 3 to 5.

use crate::config::ProjectLayout;
use crate::deps::{self, DependencyOutcome, Manifest};
use crate::environment::{ActiveEnvironment, Environment, EnvironmentStatus};
use crate::error::Result;
use crate::preflight;
use crate::process::{ExitOutcome, ProcessRunner};
use crate::program;
use crate::ui::{self, progress::Spinner};

/// Options for a run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Install dependencies even when the stamp matches the manifest
    pub reinstall: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    EnsureEnvironment,
    Activate,
    EnsureDependencies,
    Preflight,
    Execute,
    Deactivate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Created,
    Reused,
    Activated,
    Installed,
    Skipped,
    Checked {
        output_created: bool,
        missing_pieces: usize,
        unrecognized_images: usize,
        engine_found: bool,
    },
    Exited(i32),
    Deactivated,
}

/// Completed steps of a run, in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub steps: Vec<(Step, StepOutcome)>,
    pub exit_code: Option<i32>,
}

impl RunReport {
    fn record(&mut self, step: Step, outcome: StepOutcome) {
        self.steps.push((step, outcome));
    }

    /// The steps alone, in order
    pub fn sequence(&self) -> Vec<Step> {
        self.steps.iter().map(|(step, _)| *step).collect()
    }

    #[cfg(test)]
    pub fn outcome_of(&self, step: Step) -> Option<StepOutcome> {
        self.steps
            .iter()
            .find(|(s, _)| *s == step)
            .map(|(_, outcome)| *outcome)
    }

    #[cfg(test)]
    pub fn count(&self, step: Step) -> usize {
        self.steps.iter().filter(|(s, _)| *s == step).count()
    }
}

pub struct RunOrchestrator<'a> {
    layout: &'a ProjectLayout,
    runner: &'a dyn ProcessRunner,
    options: RunOptions,
    report: RunReport,
}

impl<'a> RunOrchestrator<'a> {
    pub fn new(layout: &'a ProjectLayout, runner: &'a dyn ProcessRunner, options: RunOptions) -> Self {
        Self {
            layout,
            runner,
            options,
            report: RunReport::default(),
        }
    }

    pub fn report(&self) -> &RunReport {
        &self.report
    }

    /// Run the whole sequence and return the exit code for the launcher
    pub fn run(&mut self) -> Result<i32> {
        let environment = Environment::new(&self.layout.env_dir);
        self.ensure_environment(&environment)?;

        let active = environment.activate()?;
        self.report.record(Step::Activate, StepOutcome::Activated);
        match active.python_version() {
            Some(version) => ui::debug(format!(
                "Activated {} (Python {version})",
                active.interpreter().display()
            )),
            None => ui::debug(format!("Activated {}", active.interpreter().display())),
        }

        let result = self.run_activated(&active);

        active.deactivate();
        self.report.record(Step::Deactivate, StepOutcome::Deactivated);

        let outcome = result?;
        let code = outcome.exit_code();
        self.report.exit_code = Some(code);

        let main_program = self.layout.relative(&self.layout.main_program).display();
        if outcome.success() {
            ui::success(format!("{main_program} finished successfully"));
        } else {
            ui::error(format!("{main_program} failed with {}", outcome.describe()));
        }

        Ok(code)
    }

    fn ensure_environment(&mut self, environment: &Environment) -> Result<()> {
        let display = self.layout.relative(environment.root()).display().to_string();

        let status = if environment.exists() {
            environment.ensure(self.layout.base_python.as_deref(), self.runner)?
        } else {
            ui::info(format!("Creating isolated environment in {display}..."));
            let spinner = Spinner::new(format!("Creating {display}"));
            let status = environment.ensure(self.layout.base_python.as_deref(), self.runner);
            spinner.finish();
            status?
        };

        let outcome = match status {
            EnvironmentStatus::Created => {
                ui::success(format!("Environment created in {display}"));
                StepOutcome::Created
            }
            EnvironmentStatus::Reused => StepOutcome::Reused,
        };
        self.report.record(Step::EnsureEnvironment, outcome);
        Ok(())
    }

    fn run_activated(&mut self, active: &ActiveEnvironment) -> Result<ExitOutcome> {
        let manifest = Manifest::load(&self.layout.manifest)?;
        let installed = deps::ensure(active, &manifest, self.options.reinstall, self.runner)?;
        let outcome = match installed {
            DependencyOutcome::Installed => {
                ui::success("Dependencies installed");
                StepOutcome::Installed
            }
            DependencyOutcome::Skipped => {
                ui::debug("Dependencies are up to date");
                StepOutcome::Skipped
            }
        };
        self.report.record(Step::EnsureDependencies, outcome);

        let checks = preflight::run(self.layout)?;
        self.report.record(
            Step::Preflight,
            StepOutcome::Checked {
                output_created: checks.output_created,
                missing_pieces: checks.missing_pieces.len(),
                unrecognized_images: checks.unrecognized_images.len(),
                engine_found: checks.engine.is_some(),
            },
        );

        let exit = program::execute(active, self.layout, checks.engine.as_deref(), self.runner)?;
        self.report
            .record(Step::Execute, StepOutcome::Exited(exit.exit_code()));
        Ok(exit)
    }
}
