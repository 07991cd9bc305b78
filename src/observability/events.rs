//! Observable events
//!
//! Events are explicit and typed; each has a fixed wire name and a default
//! severity.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,
    /// Entity definitions loaded
    EntitiesLoaded,

    // Compilation
    /// Criteria field did not resolve against the entity (recovered)
    CriteriaFieldUnresolved,
    /// Criteria field skipped by its routing rule
    CriteriaFieldRouted,
    /// Raw value could not be coerced to the field type
    CoercionFailed,
    /// Predicate compiled
    PredicateCompiled,

    // Sorting
    /// Sort token discarded
    SortTokenDropped,
    /// Sort specification parsed
    SortParsed,

    // CLI
    /// Request rejected with a client error
    RequestRejected,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::EntitiesLoaded => "ENTITIES_LOADED",
            Event::CriteriaFieldUnresolved => "CRITERIA_FIELD_UNRESOLVED",
            Event::CriteriaFieldRouted => "CRITERIA_FIELD_ROUTED",
            Event::CoercionFailed => "COERCION_FAILED",
            Event::PredicateCompiled => "PREDICATE_COMPILED",
            Event::SortTokenDropped => "SORT_TOKEN_DROPPED",
            Event::SortParsed => "SORT_PARSED",
            Event::RequestRejected => "REQUEST_REJECTED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::CriteriaFieldUnresolved
            | Event::CriteriaFieldRouted
            | Event::SortTokenDropped
            | Event::PredicateCompiled
            | Event::CoercionFailed
            | Event::SortParsed => Severity::Trace,
            Event::RequestRejected => Severity::Warn,
            Event::ConfigLoaded | Event::EntitiesLoaded => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::ConfigLoaded.as_str(), "CONFIG_LOADED");
        assert_eq!(
            Event::CriteriaFieldUnresolved.to_string(),
            "CRITERIA_FIELD_UNRESOLVED"
        );
    }

    #[test]
    fn test_recovered_misses_are_trace() {
        assert_eq!(Event::CriteriaFieldUnresolved.severity(), Severity::Trace);
        assert_eq!(Event::SortTokenDropped.severity(), Severity::Trace);
    }

    #[test]
    fn test_compiler_events_below_default_threshold() {
        for event in [
            Event::CriteriaFieldUnresolved,
            Event::CriteriaFieldRouted,
            Event::CoercionFailed,
            Event::PredicateCompiled,
            Event::SortTokenDropped,
            Event::SortParsed,
        ] {
            assert!(event.severity() < Severity::Info, "{}", event);
        }
        assert_eq!(Event::RequestRejected.severity(), Severity::Warn);
    }
}
