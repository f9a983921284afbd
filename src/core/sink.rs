//! Sink trait for log output destinations

use super::{error::Result, log_record::LogRecord, scope::ScopeSnapshot};

/// A pluggable consumer of log records.
///
/// Distinct `log` invocations may run concurrently on different threads, so
/// `render` takes `&self` and each implementation serializes access to its
/// own output stream (a console color change is a critical section:
/// save-state, set, write, restore, without interleaving).
pub trait Sink: Send + Sync {
    /// Sink kind name, for diagnostics
    fn name(&self) -> &str;

    /// Render one record. `scopes` is `Some` only when the sink opted in
    /// via [`wants_scopes`](Sink::wants_scopes); the snapshot reflects the
    /// calling thread's scope chain at dispatch time, outermost first.
    fn render(&self, record: &LogRecord, scopes: Option<&ScopeSnapshot>) -> Result<()>;

    /// Whether this sink opts in to scope propagation
    fn wants_scopes(&self) -> bool {
        false
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    /// Called exactly once at registry shutdown, in reverse registration
    /// order
    fn dispose(&self) -> Result<()> {
        self.flush()
    }
}
