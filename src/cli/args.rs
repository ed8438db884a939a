//! CLI argument definitions using clap
//!
//! Commands:
//! - tidyjoin join --how <type> LEFT RIGHT
//! - tidyjoin setop <op> LEFT RIGHT
//! - tidyjoin check-key --key <cols> TABLE
//! - tidyjoin orphans CHILD PARENT
//! - tidyjoin show TABLE

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::join::{JoinType, NullMatching, Relationship, Unmatched};

/// tidyjoin - relational joins and set operations over JSON tables
#[derive(Parser, Debug)]
#[command(name = "tidyjoin")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// How results are written to stdout
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Tibble-style text
    #[default]
    Table,
    /// `{"status":"ok","data":...}`
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Join two tables
    Join(JoinArgs),

    /// Apply a set operation to two tables with the same columns
    Setop {
        /// intersect, union, union-all, setdiff, symdiff or setequal
        op: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Also save the result as a JSON table
        #[arg(long)]
        output: Option<PathBuf>,

        left: PathBuf,
        right: PathBuf,
    },

    /// Check that columns form a primary key
    CheckKey {
        /// Comma-separated key columns
        #[arg(long)]
        key: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        table: PathBuf,
    },

    /// Find child rows whose foreign key has no parent row
    Orphans {
        /// Key columns: `a,b` or `a=b,c=d`; omitted for common columns
        #[arg(long)]
        by: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        child: PathBuf,
        parent: PathBuf,
    },

    /// Print a table
    Show {
        /// Maximum rows to print
        #[arg(long)]
        rows: Option<usize>,

        table: PathBuf,
    },
}

/// Options of the `join` command
#[derive(Args, Debug)]
pub struct JoinArgs {
    /// Kind of join
    #[arg(long, value_enum)]
    pub how: JoinType,

    /// Key columns: `a,b` or `a=b,c=d`; omitted for a natural join
    #[arg(long)]
    pub by: Option<String>,

    /// Suffixes for clashing column names, e.g. `.x,.y`
    #[arg(long)]
    pub suffix: Option<String>,

    /// Keep key columns from both tables
    #[arg(long)]
    pub keep: bool,

    /// Whether missing keys match; defaults to the config value
    #[arg(long, value_enum)]
    pub na_matches: Option<NullMatching>,

    /// Expected cardinality between x and y rows
    #[arg(long, value_enum)]
    pub relationship: Option<Relationship>,

    /// What to do with rows the join would drop
    #[arg(long, value_enum)]
    pub unmatched: Option<Unmatched>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Also save the result as a JSON table
    #[arg(long)]
    pub output: Option<PathBuf>,

    pub left: PathBuf,
    pub right: PathBuf,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
