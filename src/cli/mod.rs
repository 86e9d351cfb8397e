//! Command-line surface: flag parsing, env fallbacks and logger setup.

pub mod args;
pub mod commands;
pub mod logging;

pub use commands::{Cli, run};
