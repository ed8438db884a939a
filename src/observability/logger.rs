//! Structured JSON-line logger
//!
//! - One log line = one event
//! - `event` first, then `severity`, then fields sorted by key
//! - Written to stderr so stdout carries only results
//! - Events below the process-wide minimum severity are dropped

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Per-row or per-step detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Suspicious input that does not stop the operation
    Warn = 2,
    /// Operation failures
    Error = 3,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(Severity::Trace),
            "info" => Ok(Severity::Info),
            "warn" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

static MIN_SEVERITY: AtomicU8 = AtomicU8::new(Severity::Info as u8);

/// A structured logger that outputs JSON lines
pub struct Logger;

impl Logger {
    /// Sets the minimum severity that is written
    pub fn set_min_severity(severity: Severity) {
        MIN_SEVERITY.store(severity as u8, Ordering::Relaxed);
    }

    /// Whether events of this severity are currently written
    pub fn enabled(severity: Severity) -> bool {
        severity as u8 >= MIN_SEVERITY.load(Ordering::Relaxed)
    }

    /// Log an event with the given severity and fields
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        if Self::captured(severity, event, fields) {
            return;
        }
        if !Self::enabled(severity) {
            return;
        }
        Self::log_to_writer(severity, event, fields, &mut io::stderr());
    }

    #[cfg(test)]
    fn captured(severity: Severity, event: &str, fields: &[(&str, &str)]) -> bool {
        capture::record(|| Self::format_line(severity, event, fields))
    }

    #[cfg(not(test))]
    fn captured(_severity: Severity, _event: &str, _fields: &[(&str, &str)]) -> bool {
        false
    }

    fn log_to_writer<W: Write>(
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
        writer: &mut W,
    ) {
        let line = Self::format_line(severity, event, fields);

        // One write per event; a failing log sink never fails the caller
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }

    fn format_line(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut output = String::with_capacity(128);

        output.push_str("{\"event\":");
        push_json_string(&mut output, event);
        output.push_str(",\"severity\":\"");
        output.push_str(severity.as_str());
        output.push('"');

        let mut sorted: Vec<_> = fields.iter().collect();
        sorted.sort_by_key(|(k, _)| *k);

        for (key, value) in sorted {
            output.push(',');
            push_json_string(&mut output, key);
            output.push(':');
            push_json_string(&mut output, value);
        }

        output.push_str("}\n");
        output
    }

    /// Log at INFO level
    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Info, event, fields);
    }

    /// Log at WARN level
    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Warn, event, fields);
    }

    /// Log at ERROR level
    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Error, event, fields);
    }
}

fn push_json_string(output: &mut String, s: &str) {
    match serde_json::to_string(s) {
        Ok(quoted) => output.push_str(&quoted),
        // Serializing a &str cannot fail
        Err(_) => output.push_str("\"\""),
    }
}


/// Collects the log lines written by `f` on this thread
#[cfg(test)]
pub(crate) fn capture_lines(f: impl FnOnce()) -> Vec<String> {
    capture::lines_of(f)
}

/// Capture a log line for testing
#[cfg(test)]
pub fn capture_log(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let mut buffer = Vec::new();
    Logger::log_to_writer(severity, event, fields, &mut buffer);
    String::from_utf8(buffer).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Trace < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
    }

    #[test]
    fn test_severity_parse() {
        assert_eq!("WARN".parse::<Severity>().unwrap(), Severity::Warn);
        assert_eq!("trace".parse::<Severity>().unwrap(), Severity::Trace);
        assert!("loud".parse::<Severity>().is_err());
    }

    #[test]
    fn test_log_json_format() {
        let output = capture_log(Severity::Info, "JOIN_COMPLETE", &[]);

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["event"], "JOIN_COMPLETE");
        assert_eq!(parsed["severity"], "INFO");
    }

    #[test]
    fn test_log_deterministic_ordering() {
        let output1 = capture_log(
            Severity::Info,
            "TEST",
            &[("zebra", "1"), ("apple", "2"), ("mango", "3")],
        );
        let output2 = capture_log(
            Severity::Info,
            "TEST",
            &[("apple", "2"), ("mango", "3"), ("zebra", "1")],
        );
        assert_eq!(output1, output2);

        let apple = output1.find("apple").unwrap();
        let mango = output1.find("mango").unwrap();
        let zebra = output1.find("zebra").unwrap();
        assert!(apple < mango && mango < zebra);
    }

    #[test]
    fn test_log_escapes_special_chars() {
        let output = capture_log(Severity::Warn, "TEST", &[("by", "a\"b\nc")]);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["by"], "a\"b\nc");
    }

    #[test]
    fn test_capture_lines_ignores_min_severity() {
        let lines = capture_lines(|| {
            Logger::log(Severity::Trace, "STEP", &[("n", "1")]);
            Logger::warn("ODD", &[]);
        });
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("{\"event\":\"STEP\",\"severity\":\"TRACE\""));
        assert!(lines[1].contains("\"ODD\""));
    }

    #[test]
    fn test_log_one_line_event_first() {
        let output = capture_log(Severity::Info, "MY_EVENT", &[("a", "1"), ("b", "2")]);
        assert_eq!(output.matches('\n').count(), 1);
        assert!(output.ends_with('\n'));
        assert!(output.find("\"event\"").unwrap() < output.find("\"severity\"").unwrap());
    }
}
