//! Observability subsystem for neodb
//!
//! Provides typed lifecycle events emitted through `tracing`.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on linking or query results
//! 3. The library never installs a subscriber
//!
//! # Usage
//!
//! ```ignore
//! use neodb::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::LinkComplete, &[("approaches", "406785")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{init_logging, resolve_level, LOG_LEVELS};

/// Renders fields as `key=value` pairs in key order
fn render_fields(fields: &[(&str, &str)]) -> String {
    let mut sorted: Vec<_> = fields.iter().collect();
    sorted.sort_by_key(|(k, _)| *k);
    sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let rendered = render_fields(fields);
    if event.is_fatal() {
        tracing::error!(event = event.as_str(), "{}", rendered);
    } else {
        tracing::info!(event = event.as_str(), "{}", rendered);
    }
}

/// Log a lifecycle event at debug level
pub fn trace_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    tracing::debug!(event = event.as_str(), "{}", render_fields(fields));
}
