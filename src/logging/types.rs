//! The [`Log`] trait shared by every logging backend.

/// Abstraction over logging backends.
///
/// Library code (the sysroot orchestrator, the server launcher) logs through
/// `&dyn Log` so tests can substitute a recording implementation.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (suppressed on console unless verbose).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
}
