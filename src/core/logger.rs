//! Per-category logger facade

use super::event_id::EventId;
use super::log_level::LogLevel;
use super::log_record::{DynError, LogRecord, MessageFormatter};
use super::log_state::{FieldValue, LogState};
use super::registry::RegistryCore;
use super::scope::ScopeGuard;
use std::sync::Arc;

/// The per-category entry point application code calls.
///
/// Cheap and cloneable: it is a category name plus a handle to the shared
/// registry core. All filtering and dispatch happen per call, so facades
/// for the same category are always behaviorally equivalent.
#[derive(Clone)]
pub struct CategoryLogger {
    category: String,
    core: Arc<RegistryCore>,
}

impl CategoryLogger {
    pub(crate) fn new(category: String, core: Arc<RegistryCore>) -> Self {
        Self { category, core }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// True iff at least one registered sink's filter chain enables `level`
    /// for this facade's category.
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.core.is_enabled(&self.category, level)
    }

    /// Full-fidelity log call.
    ///
    /// When no sink enables `level` for this category, this is a no-op: the
    /// record is never constructed and `formatter` is never invoked.
    /// Otherwise one immutable record is built and dispatched to the
    /// enabled sinks synchronously, in registration order.
    pub fn log(
        &self,
        level: LogLevel,
        event_id: EventId,
        state: LogState,
        error: Option<Arc<DynError>>,
        formatter: MessageFormatter,
    ) {
        let enabled = self.core.enabled_sinks(&self.category, level);
        if enabled.is_empty() {
            return;
        }

        let record = LogRecord::new(
            self.category.clone(),
            level,
            event_id,
            state,
            error,
            formatter,
        );
        self.core.dispatch(&record, &enabled);
    }

    /// Push a structured scope frame onto the calling thread's stack.
    ///
    /// Scopes nest LIFO and are visible to every scope-aware sink rendering
    /// during the frame's lifetime, across all facades of this registry.
    pub fn begin_scope(&self, state: LogState) -> ScopeGuard {
        self.core.begin_scope(state)
    }

    /// Push a scope from a `{Name}` template and positional values
    pub fn begin_scope_template(&self, template: &str, values: &[FieldValue]) -> ScopeGuard {
        self.begin_scope(LogState::from_template(template, values))
    }

    /// Log a plain message; the message doubles as its own template
    pub fn log_message(&self, level: LogLevel, message: impl Into<String>) {
        if !self.is_enabled(level) {
            return;
        }
        let message = message.into();
        let state = LogState::from_template(&message, &[]);
        self.log(
            level,
            EventId::default(),
            state,
            None,
            LogRecord::template_formatter(),
        );
    }

    /// Log a `{Name}` message template with positional values
    pub fn log_template(&self, level: LogLevel, template: &str, values: &[FieldValue]) {
        if !self.is_enabled(level) {
            return;
        }
        let state = LogState::from_template(template, values);
        self.log(
            level,
            EventId::default(),
            state,
            None,
            LogRecord::template_formatter(),
        );
    }

    /// Log a message with an attached error object
    pub fn log_error(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        error: Arc<DynError>,
    ) {
        if !self.is_enabled(level) {
            return;
        }
        let message = message.into();
        let state = LogState::from_template(&message, &[]);
        self.log(
            level,
            EventId::default(),
            state,
            Some(error),
            Arc::new(|state, error| match error {
                Some(e) => format!("{}: {}", state.render_message(), e),
                None => state.render_message(),
            }),
        );
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        self.log_message(LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log_message(LogLevel::Debug, message);
    }

    #[inline]
    pub fn information(&self, message: impl Into<String>) {
        self.log_message(LogLevel::Information, message);
    }

    #[inline]
    pub fn warning(&self, message: impl Into<String>) {
        self.log_message(LogLevel::Warning, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log_message(LogLevel::Error, message);
    }

    #[inline]
    pub fn critical(&self, message: impl Into<String>) {
        self.log_message(LogLevel::Critical, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::LoggerRegistry;
    use crate::sinks::MemorySink;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn registry_with_memory(min: LogLevel) -> (LoggerRegistry, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let registry = LoggerRegistry::builder()
            .shared_sink("Memory", Arc::clone(&sink) as Arc<dyn crate::core::Sink>)
            .min_level(min)
            .build();
        (registry, sink)
    }

    #[test]
    fn test_disabled_level_skips_formatter() {
        let (registry, sink) = registry_with_memory(LogLevel::Critical);
        let logger = registry.logger("app");

        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_formatter = Arc::clone(&calls);
        logger.log(
            LogLevel::Debug,
            EventId::default(),
            LogState::new(),
            None,
            Arc::new(move |_, _| {
                calls_in_formatter.fetch_add(1, Ordering::SeqCst);
                "never".to_string()
            }),
        );

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(sink.records().len(), 0);
    }

    #[test]
    fn test_enabled_level_invokes_formatter_once() {
        let (registry, sink) = registry_with_memory(LogLevel::Trace);
        let logger = registry.logger("app");

        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_formatter = Arc::clone(&calls);
        logger.log(
            LogLevel::Information,
            EventId::new(123),
            LogState::new().with_field("Key1", true),
            None,
            Arc::new(move |state, _| {
                calls_in_formatter.fetch_add(1, Ordering::SeqCst);
                format!("The state has {} items.", state.len())
            }),
        );

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "The state has 1 items.");
        assert_eq!(records[0].event_id, EventId::new(123));
    }

    #[test]
    fn test_level_helpers_carry_template() {
        let (registry, sink) = registry_with_memory(LogLevel::Trace);
        let logger = registry.logger("app");

        logger.warning("Warning log.");
        let records = sink.records();
        assert_eq!(records[0].level, LogLevel::Warning);
        assert_eq!(records[0].message, "Warning log.");
        assert_eq!(records[0].state.template(), Some("Warning log."));
    }

    #[test]
    fn test_log_template_renders_values() {
        let (registry, sink) = registry_with_memory(LogLevel::Trace);
        let logger = registry.logger("app");

        logger.log_template(
            LogLevel::Information,
            "The answer is '{Answer}'.",
            &[42.into()],
        );
        assert_eq!(sink.records()[0].message, "The answer is '42'.");
    }

    #[test]
    fn test_log_error_appends_error() {
        let (registry, sink) = registry_with_memory(LogLevel::Trace);
        let logger = registry.logger("app");

        let err: Arc<DynError> = Arc::new(std::io::Error::new(
            std::io::ErrorKind::Other,
            "connection reset",
        ));
        logger.log_error(LogLevel::Error, "request failed", err);
        assert_eq!(sink.records()[0].message, "request failed: connection reset");
    }
}
