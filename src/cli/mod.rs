//! CLI module for tidyjoin
//!
//! Provides command-line interface for:
//! - join: Mutating and filtering joins
//! - setop: Set operations over whole rows
//! - check-key: Primary key uniqueness
//! - orphans: Foreign keys without a parent row
//! - show: Print a table

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command, JoinArgs, OutputFormat};
pub use commands::{check_key, join, orphans, run, run_cli, run_command, setop, show};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_line, write_response, write_table};
