//! Command-line interface components
//!
//! This module contains CLI-specific code: argument parsing, command
//! handlers, console rendering and the interactive rerun prompt.

pub mod args;
pub mod commands;
pub mod output;
pub mod prompt;

pub use args::{Cli, Commands, ConfigAction, ConfigArgs, GlobalArgs, RunArgs};
pub use commands::{handle_config, handle_run};
pub use prompt::RerunChoice;
