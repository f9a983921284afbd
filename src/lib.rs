//! # Scoped Logging
//!
//! A synchronous, in-process structured logging facade with per-category
//! filtering, hierarchical contextual scopes, and pluggable sinks.
//!
//! ## Features
//!
//! - **Category Facades**: Cheap per-category loggers over a shared registry
//! - **Scopes**: Thread-scoped RAII context frames visible to opted-in sinks
//! - **Filtering**: Per-sink, category-prefix, minimum-level rules with a
//!   deterministic precedence, loadable from JSON configuration
//! - **Pluggable Sinks**: Console, file, and in-memory reference sinks;
//!   failures are isolated per sink
//!
//! The logging path is synchronous and best-effort: no background worker,
//! no buffering, no delivery guarantees.

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::sinks::ConsoleSink;
    #[cfg(feature = "file")]
    pub use crate::sinks::FileSink;
    pub use crate::core::{
        CategoryLogger, EventId, FieldValue, FilterPredicate, FilterRule, FilterSet,
        LoggerError, LoggerRegistry, LoggingConfig, LogLevel, LogRecord, LogState,
        MessageFormatter, RegistryBuilder, Result, ScopeGuard, ScopeProvider, ScopeSnapshot,
        Sink, ORIGINAL_FORMAT_KEY,
    };
    pub use crate::sinks::{MemorySink, RecordedLog};
}

#[cfg(feature = "console")]
pub use crate::sinks::ConsoleSink;
#[cfg(feature = "file")]
pub use crate::sinks::FileSink;
pub use crate::core::{
    CategoryLogger, DynError, EventId, FieldValue, FilterPredicate, FilterRule, FilterSet,
    LoggerError, LoggerRegistry, LoggingConfig, LogLevel, LogRecord, LogState, MessageFormatter,
    RegistryBuilder, Result, ScopeGuard, ScopeProvider, ScopeSnapshot, Sink, SinkConfig,
    SinkRegistration, ORIGINAL_FORMAT_KEY,
};
pub use crate::sinks::{MemorySink, RecordedLog};
