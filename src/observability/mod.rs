//! Observability for recordstore
//!
//! - Structured logging (one JSON object per line)
//! - Request counters
//! - Lifecycle event tracing
//!
//! ```ignore
//! use recordstore::observability::{Logger, MetricsRegistry, ObservationScope};
//!
//! Logger::info("RECORD_CREATED", &[("id", "42")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_created();
//!
//! let scope = ObservationScope::with_fields("SCHEMA_BOOTSTRAP", &[("path", "records.db")]);
//! // ... do work ...
//! scope.complete();
//! ```

mod events;
mod logger;
mod metrics;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
pub use scope::{ObservationScope, Timer};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        log_event(Event::BootStart);
        log_event(Event::ShutdownComplete);
    }

    #[test]
    fn test_log_event_with_fields() {
        log_event_with_fields(Event::ConfigLoaded, &[("database_path", "/tmp/records.db")]);
    }
}
