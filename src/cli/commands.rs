//! CLI command implementations
//!
//! Every command:
//! 1. Loads its input tables (logging TABLE_LOADED)
//! 2. Runs inside an ObservationScope
//! 3. Writes its result to the given writer, as text or JSON

use std::io::{self, Write};
use std::path::Path;

use serde_json::json;

use crate::diagnostics::{check_primary_key, find_orphans};
use crate::join::{JoinBy, JoinOptions, Joiner};
use crate::observability::{log_event_with_fields, Event, Logger, ObservationScope};
use crate::setops::{setequal, SetOp};
use crate::table::{Table, TableLoader};

use super::args::{Cli, Command, JoinArgs, OutputFormat};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{write_line, write_response, write_table};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_cli(cli, &mut out)
}

/// Loads configuration, then runs the command
pub fn run_cli<W: Write>(cli: Cli, out: &mut W) -> CliResult<()> {
    let config = match cli.config.as_deref() {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    run_command(cli.command, &config, out)
}

/// Run the appropriate command based on CLI args
pub fn run_command<W: Write>(cmd: Command, config: &Config, out: &mut W) -> CliResult<()> {
    match cmd {
        Command::Join(args) => join(&args, config, out),
        Command::Setop {
            op,
            format,
            output,
            left,
            right,
        } => setop(&op, format, output.as_deref(), &left, &right, config, out),
        Command::CheckKey { key, format, table } => check_key(&key, format, &table, out),
        Command::Orphans {
            by,
            format,
            child,
            parent,
        } => orphans(by.as_deref(), format, &child, &parent, config, out),
        Command::Show { rows, table } => show(&table, rows, config, out),
    }
}

/// Join two tables
pub fn join<W: Write>(args: &JoinArgs, config: &Config, out: &mut W) -> CliResult<()> {
    let scope = ObservationScope::with_fields("JOIN", &[("how", args.how.as_str())]);
    observed(scope, run_join(args, config, out))
}

fn run_join<W: Write>(args: &JoinArgs, config: &Config, out: &mut W) -> CliResult<()> {
    let options = join_options(args, config)?;
    let by = parse_by(args.by.as_deref())?;

    let x = load_table(&args.left)?;
    let y = load_table(&args.right)?;
    let result = Joiner::new(options).join(args.how, &x, &y, &by)?;

    if let Some(path) = &args.output {
        save_table(&result.table, path)?;
    }

    match args.format {
        OutputFormat::Table => write_table(out, &result.table, config.max_print_rows),
        OutputFormat::Json => write_response(
            out,
            json!({
                "table": TableLoader::to_json(&result.table),
                "stats": serde_json::to_value(&result.stats)?,
            }),
        ),
    }
}

/// Config values overridden by command-line flags
fn join_options(args: &JoinArgs, config: &Config) -> CliResult<JoinOptions> {
    let mut options = config.join_options()?.with_keep(args.keep);

    if let Some(suffix) = &args.suffix {
        let (left, right) = suffix.split_once(',').ok_or_else(|| {
            CliError::invalid_argument(format!(
                "--suffix expects two comma-separated values, got '{}'",
                suffix
            ))
        })?;
        options = options.with_suffix(left.trim(), right.trim());
    }
    if let Some(na_matches) = args.na_matches {
        options = options.with_na_matches(na_matches);
    }
    if let Some(relationship) = args.relationship {
        options = options.with_relationship(relationship);
    }
    if let Some(unmatched) = args.unmatched {
        options = options.with_unmatched(unmatched);
    }

    Ok(options)
}

/// Apply a set operation
pub fn setop<W: Write>(
    op: &str,
    format: OutputFormat,
    output: Option<&Path>,
    left: &Path,
    right: &Path,
    config: &Config,
    out: &mut W,
) -> CliResult<()> {
    let scope = ObservationScope::with_fields("SETOP", &[("op", op)]);
    observed(scope, run_setop(op, format, output, left, right, config, out))
}

fn run_setop<W: Write>(
    op: &str,
    format: OutputFormat,
    output: Option<&Path>,
    left: &Path,
    right: &Path,
    config: &Config,
    out: &mut W,
) -> CliResult<()> {
    if op == "setequal" {
        let x = load_table(left)?;
        let y = load_table(right)?;
        let equal = setequal(&x, &y)?;
        return match format {
            OutputFormat::Table => write_line(out, if equal { "TRUE" } else { "FALSE" }),
            OutputFormat::Json => write_response(out, json!({ "equal": equal })),
        };
    }

    let op: SetOp = op.parse()?;
    let x = load_table(left)?;
    let y = load_table(right)?;
    let table = op.apply(&x, &y)?;

    if let Some(path) = output {
        save_table(&table, path)?;
    }

    match format {
        OutputFormat::Table => write_table(out, &table, config.max_print_rows),
        OutputFormat::Json => write_response(out, TableLoader::to_json(&table)),
    }
}

/// Check that columns form a primary key
pub fn check_key<W: Write>(
    key: &str,
    format: OutputFormat,
    path: &Path,
    out: &mut W,
) -> CliResult<()> {
    let scope = ObservationScope::with_fields("CHECK_KEY", &[("key", key)]);
    observed(scope, run_check_key(key, format, path, out))
}

fn run_check_key<W: Write>(
    key: &str,
    format: OutputFormat,
    path: &Path,
    out: &mut W,
) -> CliResult<()> {
    let columns = parse_key(key)?;
    let table = load_table(path)?;
    let report = check_primary_key(&table, &columns)?;

    match format {
        OutputFormat::Json => write_response(out, report.to_json()),
        OutputFormat::Table => {
            write_line(out, &format!("key: {}", report.key.join(", ")))?;
            write_line(
                out,
                &format!(
                    "primary key: {}",
                    if report.is_primary_key() { "TRUE" } else { "FALSE" }
                ),
            )?;
            write_line(out, &format!("rows: {}", report.total_rows))?;
            write_line(out, &format!("missing key rows: {}", report.missing_key_rows))?;
            write_line(
                out,
                &format!("duplicate keys: {}", report.duplicates.num_rows()),
            )?;
            if !report.duplicates.is_empty() {
                write_table(out, &report.duplicates, report.duplicates.num_rows())?;
            }
            Ok(())
        }
    }
}

/// Find child rows without a parent row
pub fn orphans<W: Write>(
    by: Option<&str>,
    format: OutputFormat,
    child: &Path,
    parent: &Path,
    config: &Config,
    out: &mut W,
) -> CliResult<()> {
    let scope = ObservationScope::with_fields("ORPHANS", &[("by", by.unwrap_or(""))]);
    observed(scope, run_orphans(by, format, child, parent, config, out))
}

fn run_orphans<W: Write>(
    by: Option<&str>,
    format: OutputFormat,
    child: &Path,
    parent: &Path,
    config: &Config,
    out: &mut W,
) -> CliResult<()> {
    let by = parse_by(by)?;
    let child = load_table(child)?;
    let parent = load_table(parent)?;
    let report = find_orphans(&child, &parent, &by)?;

    match format {
        OutputFormat::Json => write_response(out, report.to_json()),
        OutputFormat::Table => {
            write_line(
                out,
                &format!(
                    "orphans: {} of {} rows",
                    report.orphans.num_rows(),
                    report.child_rows
                ),
            )?;
            if report.has_orphans() {
                write_table(out, &report.orphan_keys, config.max_print_rows)?;
            }
            Ok(())
        }
    }
}

/// Print a table
pub fn show<W: Write>(
    path: &Path,
    rows: Option<usize>,
    config: &Config,
    out: &mut W,
) -> CliResult<()> {
    let path_str = path.display().to_string();
    let scope = ObservationScope::with_fields("SHOW", &[("path", path_str.as_str())]);
    observed(scope, run_show(path, rows, config, out))
}

fn run_show<W: Write>(
    path: &Path,
    rows: Option<usize>,
    config: &Config,
    out: &mut W,
) -> CliResult<()> {
    let table = load_table(path)?;
    write_table(out, &table, rows.unwrap_or(config.max_print_rows))
}

fn load_config(path: &Path) -> CliResult<Config> {
    let config = Config::load(path)?;
    Logger::set_min_severity(config.severity()?);

    let path = path.display().to_string();
    log_event_with_fields(Event::ConfigLoaded, &[("path", path.as_str())]);
    Ok(config)
}

fn parse_by(by: Option<&str>) -> CliResult<JoinBy> {
    match by {
        Some(spec) => Ok(JoinBy::parse(spec)?),
        None => Ok(JoinBy::natural()),
    }
}

/// Splits `a,b` into key column names; empty names are rejected
fn parse_key(key: &str) -> CliResult<Vec<&str>> {
    let columns: Vec<&str> = key.split(',').map(str::trim).collect();
    if columns.iter().any(|c| c.is_empty()) {
        return Err(CliError::invalid_argument(format!(
            "--key has an empty column name in '{}'",
            key
        )));
    }
    Ok(columns)
}

fn load_table(path: &Path) -> CliResult<Table> {
    let table = TableLoader::load(path)
        .map_err(|e| CliError::from(e).with_context(&path.display().to_string()))?;

    let path = path.display().to_string();
    let rows = table.num_rows().to_string();
    let columns = table.num_columns().to_string();
    log_event_with_fields(
        Event::TableLoaded,
        &[
            ("path", path.as_str()),
            ("rows", rows.as_str()),
            ("columns", columns.as_str()),
        ],
    );
    Ok(table)
}

fn save_table(table: &Table, path: &Path) -> CliResult<()> {
    TableLoader::save(table, path)?;

    let path = path.display().to_string();
    let rows = table.num_rows().to_string();
    log_event_with_fields(
        Event::TableSaved,
        &[("path", path.as_str()), ("rows", rows.as_str())],
    );
    Ok(())
}

/// Completes or fails the scope according to the result
fn observed<T>(scope: ObservationScope<'_>, result: CliResult<T>) -> CliResult<T> {
    match &result {
        Ok(_) => scope.complete(),
        Err(e) => scope.fail(e.code_str()),
    }
    result
}
