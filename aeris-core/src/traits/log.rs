//! Event logging capability trait
//!
//! The deployed monitors forward events to a local collection server;
//! this trait is the seam for that channel. It replaces the earlier
//! function-pointer callback: a trait object or generic can be a real
//! transport, an in-memory test double, or [`NullLog`] when no logging
//! collaborator exists.

/// Event severity, matching the collection server's event types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

/// Event logging channel
///
/// Implementations must not block for longer than a single watchdog
/// feed interval; the procedure logs from inside time-critical loops.
pub trait EventLog {
    /// Record one event
    fn log(&mut self, severity: Severity, message: &str);

    /// Record an informational event
    fn info(&mut self, message: &str) {
        self.log(Severity::Info, message);
    }

    /// Record a warning
    fn warning(&mut self, message: &str) {
        self.log(Severity::Warning, message);
    }

    /// Record an error
    fn error(&mut self, message: &str) {
        self.log(Severity::Error, message);
    }
}

/// Logging disabled: every call is a no-op
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLog;

impl EventLog for NullLog {
    fn log(&mut self, _severity: Severity, _message: &str) {}
}
