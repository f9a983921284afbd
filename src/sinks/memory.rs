//! In-memory recording sink

use crate::core::{EventId, LogLevel, LogRecord, LogState, Result, ScopeSnapshot, Sink};
use parking_lot::Mutex;

/// What the memory sink keeps per rendered record
#[derive(Debug, Clone)]
pub struct RecordedLog {
    pub category: String,
    pub level: LogLevel,
    pub event_id: EventId,
    pub message: String,
    pub state: LogState,
    /// Scope frames at dispatch time, outermost first; empty unless the
    /// sink was built `with_scopes(true)`
    pub scopes: Vec<LogState>,
}

/// Sink that records every rendered record for later inspection.
///
/// Used by tests to observe exactly which records reached a sink, and
/// usable as a programmatic in-process tap.
#[derive(Default)]
pub struct MemorySink {
    records: Mutex<Vec<RecordedLog>>,
    with_scopes: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_scopes(mut self, with_scopes: bool) -> Self {
        self.with_scopes = with_scopes;
        self
    }

    /// Snapshot of everything recorded so far, in arrival order
    pub fn records(&self) -> Vec<RecordedLog> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Sink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    fn render(&self, record: &LogRecord, scopes: Option<&ScopeSnapshot>) -> Result<()> {
        let recorded = RecordedLog {
            category: record.category.clone(),
            level: record.level,
            event_id: record.event_id.clone(),
            message: record.message(),
            state: record.state.clone(),
            scopes: scopes
                .map(|s| s.iter().cloned().collect())
                .unwrap_or_default(),
        };
        self.records.lock().push(recorded);
        Ok(())
    }

    fn wants_scopes(&self) -> bool {
        self.with_scopes
    }
}
