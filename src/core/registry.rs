//! Registry/dispatcher: owns sinks, filter rules, and the scope provider

use super::config::LoggingConfig;
use super::error::Result;
use super::filter::{FilterPredicate, FilterRule, FilterSet};
use super::log_level::LogLevel;
use super::log_record::LogRecord;
use super::log_state::LogState;
use super::logger::CategoryLogger;
use super::scope::{ScopeGuard, ScopeProvider};
use super::sink::Sink;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One registered sink: its human-readable alias (what filter rules match)
/// and the long-lived instance.
pub struct SinkRegistration {
    pub alias: String,
    pub sink: Arc<dyn Sink>,
}

pub(crate) struct RegistryCore {
    /// Registration order preserved; fixed at build time.
    sinks: Vec<SinkRegistration>,
    filters: RwLock<FilterSet>,
    scopes: ScopeProvider,
    disposed: AtomicBool,
}

impl RegistryCore {
    pub(crate) fn is_enabled(&self, category: &str, level: LogLevel) -> bool {
        if self.disposed.load(Ordering::Acquire) {
            return false;
        }
        let filters = self.filters.read();
        self.sinks
            .iter()
            .any(|reg| filters.is_enabled(&reg.alias, category, level))
    }

    /// Indices of the sinks whose filter chain enables (category, level).
    ///
    /// One read guard for the whole computation: rules may be swapped at any
    /// time, but within one call they are read consistently.
    pub(crate) fn enabled_sinks(&self, category: &str, level: LogLevel) -> Vec<usize> {
        if self.disposed.load(Ordering::Acquire) {
            return Vec::new();
        }
        let filters = self.filters.read();
        self.sinks
            .iter()
            .enumerate()
            .filter(|(_, reg)| filters.is_enabled(&reg.alias, category, level))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Dispatch one record to the given sinks, in registration order.
    ///
    /// A sink error or panic is reported on the fallback channel (stderr)
    /// and never prevents later sinks or reaches the caller of `log`.
    pub(crate) fn dispatch(&self, record: &LogRecord, enabled: &[usize]) {
        let snapshot = enabled
            .iter()
            .any(|&idx| self.sinks[idx].sink.wants_scopes())
            .then(|| self.scopes.snapshot());

        for &idx in enabled {
            let reg = &self.sinks[idx];
            let scopes = reg.sink.wants_scopes().then_some(snapshot.as_ref()).flatten();

            let render_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                reg.sink.render(record, scopes)
            }));

            match render_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Sink '{}' failed: {}", reg.alias, e);
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Sink '{}' panicked: {}. \
                         Other sinks continue to function.",
                        reg.alias, panic_msg
                    );
                }
            }
        }
    }

    pub(crate) fn begin_scope(&self, state: LogState) -> ScopeGuard {
        self.scopes.begin_scope(state)
    }

    fn dispose_all(&self) {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        for reg in self.sinks.iter().rev() {
            if let Err(e) = reg.sink.dispose() {
                eprintln!("[LOGGER ERROR] Sink '{}' failed to dispose: {}", reg.alias, e);
            }
        }
    }
}

impl Drop for RegistryCore {
    fn drop(&mut self) {
        self.dispose_all();
    }
}

/// Owns the set of registered sinks and the current filter rules, and
/// constructs [`CategoryLogger`] facades bound to a category name.
///
/// Facades are cheap wrappers over the shared core; two facades for the
/// same category are behaviorally equivalent.
#[derive(Clone)]
pub struct LoggerRegistry {
    core: Arc<RegistryCore>,
}

impl LoggerRegistry {
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Create a facade bound to `category`. Categories are conventionally
    /// dotted module paths and must be non-empty.
    pub fn logger(&self, category: impl Into<String>) -> CategoryLogger {
        let category = category.into();
        debug_assert!(!category.is_empty(), "log category must not be empty");
        CategoryLogger::new(category, Arc::clone(&self.core))
    }

    /// Swap the entire rule set; takes effect on the next `log` call
    pub fn replace_filters(&self, filters: FilterSet) {
        *self.core.filters.write() = filters;
    }

    /// Adjust only the global minimum level
    pub fn set_min_level(&self, level: LogLevel) {
        self.core.filters.write().min_level = Some(level);
    }

    /// Dispose all sinks, exactly once, in reverse registration order.
    /// Logging after shutdown is a no-op. Also runs on drop of the last
    /// handle if never called explicitly.
    pub fn shutdown(&self) {
        self.core.dispose_all();
    }
}

/// Builder for constructing a [`LoggerRegistry`] with a fluent API
///
/// # Example
/// ```
/// use scoped_logging::prelude::*;
///
/// let registry = LoggerRegistry::builder()
///     .sink("Memory", MemorySink::new())
///     .min_level(LogLevel::Debug)
///     .rule(FilterRule::for_category("noisy", LogLevel::Critical))
///     .build();
///
/// let logger = registry.logger("app.main");
/// logger.information("started");
/// ```
pub struct RegistryBuilder {
    sinks: Vec<SinkRegistration>,
    filters: FilterSet,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            sinks: Vec::new(),
            filters: FilterSet::new(),
        }
    }

    /// Register a sink under a human-readable alias. Registration order is
    /// dispatch order.
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, alias: impl Into<String>, sink: S) -> Self {
        self.sinks.push(SinkRegistration {
            alias: alias.into(),
            sink: Arc::new(sink),
        });
        self
    }

    /// Register an already-shared sink instance
    #[must_use = "builder methods return a new value"]
    pub fn shared_sink(mut self, alias: impl Into<String>, sink: Arc<dyn Sink>) -> Self {
        self.sinks.push(SinkRegistration {
            alias: alias.into(),
            sink,
        });
        self
    }

    /// Set the global minimum level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.filters.min_level = Some(level);
        self
    }

    /// Add a filter rule
    #[must_use = "builder methods return a new value"]
    pub fn rule(mut self, rule: FilterRule) -> Self {
        self.filters.rules.push(rule);
        self
    }

    /// Register a predicate ANDed with every tiered decision
    #[must_use = "builder methods return a new value"]
    pub fn filter_fn(mut self, predicate: FilterPredicate) -> Self {
        self.filters.predicate = Some(predicate);
        self
    }

    /// Load rules from a declarative configuration document. Rules already
    /// added in code are kept; document rules are appended and a document
    /// `default` overrides the global minimum.
    pub fn config(mut self, config: &LoggingConfig) -> Result<Self> {
        let loaded = config.to_filter_set()?;
        if let Some(level) = loaded.min_level {
            self.filters.min_level = Some(level);
        }
        self.filters.rules.extend(loaded.rules);
        Ok(self)
    }

    pub fn build(self) -> LoggerRegistry {
        LoggerRegistry {
            core: Arc::new(RegistryCore {
                sinks: self.sinks,
                filters: RwLock::new(self.filters),
                scopes: ScopeProvider::new(),
                disposed: AtomicBool::new(false),
            }),
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::MemorySink;

    #[test]
    fn test_builder_basic() {
        let registry = LoggerRegistry::builder()
            .sink("Memory", MemorySink::new())
            .min_level(LogLevel::Debug)
            .build();

        let logger = registry.logger("app");
        assert!(logger.is_enabled(LogLevel::Debug));
        assert!(!logger.is_enabled(LogLevel::Trace));
    }

    #[test]
    fn test_facades_for_same_category_are_equivalent() {
        let registry = LoggerRegistry::builder()
            .sink("Memory", MemorySink::new())
            .rule(FilterRule::for_category("app", LogLevel::Error))
            .build();

        let first = registry.logger("app.worker");
        let second = registry.logger("app.worker");
        for level in LogLevel::ALL {
            assert_eq!(first.is_enabled(level), second.is_enabled(level));
        }
    }

    #[test]
    fn test_no_sinks_means_nothing_enabled() {
        let registry = LoggerRegistry::builder().build();
        assert!(!registry.logger("app").is_enabled(LogLevel::Critical));
    }

    #[test]
    fn test_replace_filters_takes_effect() {
        let sink = Arc::new(MemorySink::new());
        let registry = LoggerRegistry::builder()
            .shared_sink("Memory", Arc::clone(&sink) as Arc<dyn Sink>)
            .min_level(LogLevel::Critical)
            .build();

        let logger = registry.logger("app");
        logger.information("dropped");
        assert_eq!(sink.records().len(), 0);

        registry.replace_filters(FilterSet::new().with_min_level(LogLevel::Trace));
        logger.information("kept");
        assert_eq!(sink.records().len(), 1);
    }

    #[test]
    fn test_logging_after_shutdown_is_noop() {
        let sink = Arc::new(MemorySink::new());
        let registry = LoggerRegistry::builder()
            .shared_sink("Memory", Arc::clone(&sink) as Arc<dyn Sink>)
            .build();

        let logger = registry.logger("app");
        registry.shutdown();
        logger.critical("too late");
        assert_eq!(sink.records().len(), 0);
    }
}
