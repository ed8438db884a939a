//! tidyjoin CLI entry point
//!
//! Parses arguments, runs the command, prints errors to stderr and exits
//! with status 1 on failure. All logic lives in the CLI module.

use tidyjoin::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
