//! Command implementations for chesscast CLI

pub mod completions;
pub mod helpers;
pub mod run;
pub mod version;
