//! CLI-specific error types
//!
//! Every CLI error ends the process with status 1.

use std::fmt;
use std::io;

use crate::diagnostics::DiagnosticsError;
use crate::join::JoinError;
use crate::setops::SetOpError;
use crate::table::TableError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (files, stdout)
    IoError,
    /// Input table could not be read
    InvalidTable,
    /// Bad command-line value
    InvalidArgument,
    /// The operation rejected its inputs
    OperationFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "TIDYJOIN_CLI_CONFIG_ERROR",
            Self::IoError => "TIDYJOIN_CLI_IO_ERROR",
            Self::InvalidTable => "TIDYJOIN_CLI_INVALID_TABLE",
            Self::InvalidArgument => "TIDYJOIN_CLI_INVALID_ARGUMENT",
            Self::OperationFailed => "TIDYJOIN_CLI_OPERATION_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Unreadable input table
    pub fn invalid_table(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidTable, msg)
    }

    /// Bad argument value
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidArgument, msg)
    }

    /// Operation rejected its inputs
    pub fn operation_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::OperationFailed, msg)
    }

    /// Prefix the message with what was being processed
    pub fn with_context(mut self, context: &str) -> Self {
        self.message = format!("{}: {}", context, self.message);
        self
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<TableError> for CliError {
    fn from(e: TableError) -> Self {
        match e {
            TableError::Io(_) => Self::io_error(e.to_string()),
            other => Self::invalid_table(other.to_string()),
        }
    }
}

impl From<JoinError> for CliError {
    fn from(e: JoinError) -> Self {
        if e.code().is_data_error() {
            Self::operation_failed(e.to_string())
        } else {
            Self::invalid_argument(e.to_string())
        }
    }
}

impl From<SetOpError> for CliError {
    fn from(e: SetOpError) -> Self {
        match e {
            SetOpError::IncompatibleColumns { .. } => Self::operation_failed(e.to_string()),
            SetOpError::UnknownOperation(_) => Self::invalid_argument(e.to_string()),
            SetOpError::Table(inner) => inner.into(),
        }
    }
}

impl From<DiagnosticsError> for CliError {
    fn from(e: DiagnosticsError) -> Self {
        match e {
            DiagnosticsError::Join(inner) => inner.into(),
            DiagnosticsError::Table(inner) => Self::invalid_argument(inner.to_string()),
            other => Self::invalid_argument(other.to_string()),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
