//! File sink implementation

use crate::core::{LoggerError, LogRecord, Result, ScopeSnapshot, Sink};
use chrono::SecondsFormat;
use fs2::FileExt;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Appends one formatted line per record to a file.
///
/// The file is exclusively locked for the lifetime of the sink so two
/// processes cannot interleave lines. Ignores scopes.
pub struct FileSink {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        file.try_lock_exclusive()
            .map_err(|_| LoggerError::file_lock(path.display().to_string()))?;

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path,
        })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn format_line(record: &LogRecord) -> String {
        let timestamp = record
            .timestamp
            .to_rfc3339_opts(SecondsFormat::Millis, true);

        let mut line = format!(
            "[{}] [{:11}] {} - {}",
            timestamp,
            record.level.as_str(),
            record.category,
            record.message()
        );

        if !record.event_id.is_none() {
            line.push_str(&format!(" (event {})", record.event_id));
        }
        if !record.state.is_empty() {
            line.push_str(" | ");
            line.push_str(&record.state.format_fields());
        }
        if let Some(error) = &record.error {
            line.push_str(&format!(" ! {}", error));
        }

        line.push('\n');
        line
    }
}

impl Sink for FileSink {
    fn name(&self) -> &str {
        "file"
    }

    fn render(&self, record: &LogRecord, _scopes: Option<&ScopeSnapshot>) -> Result<()> {
        let line = Self::format_line(record);
        let mut writer = self.writer.lock();
        writer.write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EventId, LogLevel, LogState};
    use tempfile::TempDir;

    #[test]
    fn test_writes_one_line_per_record() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let sink = FileSink::new(&path).unwrap();

        for message in ["first", "second"] {
            let record = LogRecord::new(
                "app",
                LogLevel::Information,
                EventId::default(),
                LogState::from_template(message, &[]),
                None,
                LogRecord::template_formatter(),
            );
            sink.render(&record, None).unwrap();
        }
        sink.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("first"));
        assert!(lines[1].contains("second"));
    }

    #[test]
    fn test_line_carries_level_and_category() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let sink = FileSink::new(&path).unwrap();

        let record = LogRecord::new(
            "app.worker",
            LogLevel::Critical,
            EventId::new(7),
            LogState::from_template("boom", &[]),
            None,
            LogRecord::template_formatter(),
        );
        sink.render(&record, None).unwrap();
        sink.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Critical"));
        assert!(content.contains("app.worker"));
        assert!(content.contains("(event 7)"));
    }
}
