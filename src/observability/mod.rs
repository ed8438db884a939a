//! Observability for tidyjoin
//!
//! - Structured logging (JSON lines on stderr)
//! - Typed events
//! - Begin/complete scopes around CLI commands
//!
//! Observability never changes results and never fails an operation.
//!
//! ```ignore
//! use tidyjoin::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::NaturalKeyInferred, &[("by", "key")]);
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};

#[cfg(test)]
pub(crate) use logger::capture_lines;
pub use scope::ObservationScope;

/// Log an event with fields at its own severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
