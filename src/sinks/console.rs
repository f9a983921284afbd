//! Console sink implementation

use crate::core::{LogRecord, Result, ScopeSnapshot, Sink, ORIGINAL_FORMAT_KEY};
use colored::{Color, Colorize};
use parking_lot::Mutex;
use std::io::Write;

/// Colored console sink.
///
/// Each instance carries a distinguishing color. The plain form ignores
/// scopes entirely; `with_scopes(true)` opts in to scope propagation and
/// appends a `Scope:` section, outermost frame first, excluding the
/// reserved `{OriginalFormat}` pair.
pub struct ConsoleSink {
    color: Color,
    with_scopes: bool,
    /// The whole record block is one critical section: a concurrent writer
    /// must not interleave lines or observe a half-applied color.
    stdout: Mutex<()>,
}

impl ConsoleSink {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            with_scopes: false,
            stdout: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn with_scopes(mut self, with_scopes: bool) -> Self {
        self.with_scopes = with_scopes;
        self
    }

    /// Format one record as the multi-line console block.
    ///
    /// Kept separate from the actual writing so tests can assert on the
    /// exact output.
    pub fn format_record(record: &LogRecord, scopes: Option<&ScopeSnapshot>) -> String {
        let mut out = String::new();
        out.push('\n');
        out.push_str("------------------------------------------\n");
        out.push_str(&format!("Category:  {}\n", record.category));
        out.push_str(&format!("Level:     {}\n", record.level));
        if !record.event_id.is_none() {
            out.push_str(&format!("EventId:   {}\n", record.event_id));
        }
        out.push_str(&format!("Formatter: {}\n", record.message()));
        if let Some(error) = &record.error {
            out.push_str(&format!("Error:     {}\n", error));
        }
        out.push_str("State:\n");
        for (key, value) in record.state.iter() {
            out.push_str(&format!("  {}: {}\n", key, value));
        }

        if let Some(scopes) = scopes {
            out.push_str("Scope:\n");
            scopes.for_each_scope(
                |state, out: &mut String| {
                    for (key, value) in state.iter().filter(|(k, _)| k != ORIGINAL_FORMAT_KEY) {
                        out.push_str(&format!("  {}: {}\n", key, value));
                    }
                },
                &mut out,
            );
        }

        out
    }
}

impl Sink for ConsoleSink {
    fn name(&self) -> &str {
        "console"
    }

    fn render(&self, record: &LogRecord, scopes: Option<&ScopeSnapshot>) -> Result<()> {
        let block = Self::format_record(record, scopes);

        let _guard = self.stdout.lock();
        print!("{}", block.color(self.color));
        Ok(())
    }

    fn wants_scopes(&self) -> bool {
        self.with_scopes
    }

    fn flush(&self) -> Result<()> {
        let _guard = self.stdout.lock();
        std::io::stdout().flush()?;
        Ok(())
    }
}
