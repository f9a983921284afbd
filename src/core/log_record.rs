//! Log record structure

use super::event_id::EventId;
use super::log_level::LogLevel;
use super::log_state::LogState;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

/// Error object attached to a record
pub type DynError = dyn std::error::Error + Send + Sync + 'static;

/// Pure function mapping (state, error) to a human-readable message.
///
/// Supplied by the call site and invoked lazily: a sink pays the formatting
/// cost only if it actually renders the record.
pub type MessageFormatter = Arc<dyn Fn(&LogState, Option<&DynError>) -> String + Send + Sync>;

/// The immutable unit of a single log event.
///
/// Constructed once per enabled `log` call and discarded after every sink
/// has consumed it. Never mutated after construction.
pub struct LogRecord {
    pub category: String,
    pub level: LogLevel,
    pub event_id: EventId,
    pub state: LogState,
    pub error: Option<Arc<DynError>>,
    pub timestamp: DateTime<Utc>,
    formatter: MessageFormatter,
}

impl LogRecord {
    pub fn new(
        category: impl Into<String>,
        level: LogLevel,
        event_id: EventId,
        state: LogState,
        error: Option<Arc<DynError>>,
        formatter: MessageFormatter,
    ) -> Self {
        Self {
            category: category.into(),
            level,
            event_id,
            state,
            error,
            timestamp: Utc::now(),
            formatter,
        }
    }

    /// Invoke the call site's formatter over this record's state and error
    pub fn message(&self) -> String {
        (self.formatter)(&self.state, self.error.as_deref())
    }

    /// The default formatter: renders the state's message template
    pub fn template_formatter() -> MessageFormatter {
        Arc::new(|state, _| state.render_message())
    }
}

impl fmt::Debug for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogRecord")
            .field("category", &self.category)
            .field("level", &self.level)
            .field("event_id", &self.event_id)
            .field("state", &self.state)
            .field("error", &self.error.as_ref().map(|e| e.to_string()))
            .field("timestamp", &self.timestamp)
            .finish_non_exhaustive()
    }
}
