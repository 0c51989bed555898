//! Prism CLI library.
//!
//! This library provides the core functionality for the Prism command-line
//! interface: argument parsing, input file loading, command execution, and
//! output formatting.

pub mod cli;
pub mod commands;
pub mod error;
pub mod input;
pub mod output;

pub use cli::{Cli, Command};
pub use error::{CliError, Result};
pub use output::Formatter;
