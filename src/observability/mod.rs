//! Observability subsystem
//!
//! Structured JSON logging with typed events.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on compilation results
//! 3. No async or background threads
//! 4. Deterministic output
//!
//! Compiler and sort events sit below the default threshold, so a library
//! call writes nothing unless tracing was switched on.
//!
//! # Usage
//!
//! ```ignore
//! use bbd_search::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::CriteriaFieldUnresolved, &[("field", "nickname")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log an event with fields at its default severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::logger::capture_log;
    use super::*;

    #[test]
    fn test_event_line_carries_wire_name_and_severity() {
        let event = Event::CriteriaFieldUnresolved;
        let output = capture_log(
            event.severity(),
            event.as_str(),
            &[("field", "nickname"), ("entity", "pot")],
        );

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["event"], "CRITERIA_FIELD_UNRESOLVED");
        assert_eq!(parsed["severity"], "TRACE");
        assert_eq!(parsed["entity"], "pot");
        assert_eq!(parsed["field"], "nickname");
    }

    #[test]
    fn test_default_threshold_filters_compiler_events() {
        assert_eq!(Logger::min_severity(), Severity::Info);
        assert!(!Logger::enabled(Event::CoercionFailed.severity()));
        assert!(!Logger::enabled(Event::PredicateCompiled.severity()));
        assert!(Logger::enabled(Event::ConfigLoaded.severity()));
        assert!(Logger::enabled(Event::RequestRejected.severity()));
    }
}
