//! Observable events
//!
//! Events are explicit and typed; the logger only ever sees their
//! string form.

use std::fmt;

use super::logger::Severity;

/// Observable events in tidyjoin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration and input
    /// Configuration file loaded
    ConfigLoaded,
    /// Table read from disk
    TableLoaded,
    /// Table written to disk
    TableSaved,

    // Joins
    /// Join key inferred from common column names
    NaturalKeyInferred,
    /// Join evaluated
    JoinComplete,
    /// Join rejected by a relationship or unmatched-rows check
    JoinRejected,
    /// Keys duplicated on both sides of a join
    ManyToManyDetected,

    // Set operations
    /// Set operation evaluated
    SetOpComplete,

    // Diagnostics
    /// Primary key check finished
    KeyCheckComplete,
    /// Declared key is not unique
    KeyNotUnique,
    /// Foreign keys without a matching primary key
    OrphansFound,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::TableLoaded => "TABLE_LOADED",
            Event::TableSaved => "TABLE_SAVED",

            Event::NaturalKeyInferred => "NATURAL_KEY_INFERRED",
            Event::JoinComplete => "JOIN_COMPLETE",
            Event::JoinRejected => "JOIN_REJECTED",
            Event::ManyToManyDetected => "MANY_TO_MANY_DETECTED",

            Event::SetOpComplete => "SETOP_COMPLETE",

            Event::KeyCheckComplete => "KEY_CHECK_COMPLETE",
            Event::KeyNotUnique => "KEY_NOT_UNIQUE",
            Event::OrphansFound => "ORPHANS_FOUND",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::ManyToManyDetected | Event::KeyNotUnique | Event::OrphansFound => {
                Severity::Warn
            }
            Event::JoinRejected => Severity::Error,
            Event::JoinComplete | Event::SetOpComplete | Event::TableSaved => Severity::Trace,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
