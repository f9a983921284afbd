//! Error types for the logging facade

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON deserialization error in a filter-rule document
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details; surfaced at startup, the host
    /// refuses to start on it
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// A sink's render call failed; carried on the fallback diagnostic
    /// channel only, never to the caller of `log`
    #[error("Sink '{sink}' failed to render: {message}")]
    SinkRenderError { sink: String, message: String },

    /// File lock error
    #[error("Failed to acquire file lock on '{path}'")]
    FileLockError { path: String },

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a sink render error
    pub fn sink_render(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::SinkRenderError {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create a file lock error
    pub fn file_lock(path: impl Into<String>) -> Self {
        LoggerError::FileLockError { path: path.into() }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::config("logLevel", "unknown level 'loud'");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::sink_render("Cyan", "stream closed");
        assert!(matches!(err, LoggerError::SinkRenderError { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::config("sinks.Green", "unknown level 'loud'");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for sinks.Green: unknown level 'loud'"
        );

        let err = LoggerError::sink_render("Cyan", "stream closed");
        assert_eq!(err.to_string(), "Sink 'Cyan' failed to render: stream closed");
    }
}
