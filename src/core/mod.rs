//! Core facade types and traits

pub mod config;
pub mod error;
pub mod event_id;
pub mod filter;
pub mod log_level;
pub mod log_record;
pub mod log_state;
pub mod logger;
pub mod registry;
pub mod scope;
pub mod sink;

pub use config::{LoggingConfig, SinkConfig};
pub use error::{LoggerError, Result};
pub use event_id::EventId;
pub use filter::{FilterPredicate, FilterRule, FilterSet};
pub use log_level::LogLevel;
pub use log_record::{DynError, LogRecord, MessageFormatter};
pub use log_state::{FieldValue, LogState, ORIGINAL_FORMAT_KEY};
pub use logger::CategoryLogger;
pub use registry::{LoggerRegistry, RegistryBuilder, SinkRegistration};
pub use scope::{ScopeGuard, ScopeProvider, ScopeSnapshot};
pub use sink::Sink;
