//! chesscast - launcher for the PGN chess commentary video generator
//!
//! Keeps an isolated Python environment next to the generator, installs
//! its dependencies when the manifest changes, and runs it inside that
//! environment, exiting with the generator's own exit status.

use clap::Parser;
use miette::Diagnostic;

mod cli;
mod commands;
mod config;
mod deps;
mod environment;
mod error;
mod hash;
mod orchestrator;
mod preflight;
mod process;
mod program;
mod ui;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};
use commands::run::RunArgs;
use error::ChesscastError;

fn report(err: &ChesscastError) {
    eprintln!("Error: {err}");
    if let Some(help) = err.help() {
        eprintln!("  help: {help}");
    }
}

fn main() {
    let cli = Cli::parse();
    ui::set_verbose(cli.verbose);

    let result = match cli.command {
        Some(Commands::Version) => commands::version::run().map(|()| 0),
        Some(Commands::Completions(args)) => commands::completions::run(&args).map(|()| 0),
        None => commands::run::run(RunArgs {
            project_dir: cli.project_dir,
            python: cli.python,
            reinstall: cli.reinstall,
        }),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            report(&e);
            std::process::exit(1);
        }
    }
}
