//! Logging macros for ergonomic message formatting.
//!
//! These macros provide a convenient interface over a [`CategoryLogger`],
//! with automatic string formatting similar to `println!` and `format!`.
//!
//! [`CategoryLogger`]: crate::core::CategoryLogger
//!
//! # Examples
//!
//! ```
//! use scoped_logging::prelude::*;
//! use scoped_logging::information;
//!
//! let registry = LoggerRegistry::builder()
//!     .sink("Memory", MemorySink::new())
//!     .build();
//! let logger = registry.logger("app.server");
//!
//! let port = 8080;
//! information!(logger, "Server listening on port {}", port);
//! ```

/// Log a message at an explicit level with automatic formatting.
///
/// # Examples
///
/// ```
/// # use scoped_logging::prelude::*;
/// # let registry = LoggerRegistry::builder().sink("Memory", MemorySink::new()).build();
/// # let logger = registry.logger("app");
/// use scoped_logging::log;
/// log!(logger, LogLevel::Information, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_message($level, format!($($arg)+))
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an information-level message.
#[macro_export]
macro_rules! information {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Information, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{LoggerRegistry, LogLevel};
    use crate::sinks::MemorySink;
    use std::sync::Arc;

    fn logger_with_sink() -> (crate::core::CategoryLogger, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let registry = LoggerRegistry::builder()
            .shared_sink("Memory", Arc::clone(&sink) as Arc<dyn crate::core::Sink>)
            .min_level(LogLevel::Trace)
            .build();
        (registry.logger("app"), sink)
    }

    #[test]
    fn test_log_macro() {
        let (logger, sink) = logger_with_sink();
        log!(logger, LogLevel::Information, "Test message");
        log!(logger, LogLevel::Information, "Formatted: {}", 42);
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.records()[1].message, "Formatted: 42");
    }

    #[test]
    fn test_level_macros() {
        let (logger, sink) = logger_with_sink();
        trace!(logger, "Trace message");
        debug!(logger, "Count: {}", 5);
        information!(logger, "Items: {}", 100);
        warning!(logger, "Retry {} of {}", 1, 3);
        error!(logger, "Code: {}", 500);
        critical!(logger, "Failure: {}", "system");

        let records = sink.records();
        assert_eq!(records.len(), 6);
        assert_eq!(records[0].level, LogLevel::Trace);
        assert_eq!(records[5].level, LogLevel::Critical);
    }
}
