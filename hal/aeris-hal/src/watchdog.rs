//! Watchdog keep-alive abstraction
//!
//! The recalibration procedure blocks the caller's loop for minutes at
//! a time. Systems supervised by a task watchdog must keep feeding it
//! during those waits; the procedure invokes [`Watchdog::feed`] at
//! least every few hundred milliseconds inside every blocking loop.

/// Liveness keep-alive
pub trait Watchdog {
    /// Reset the watchdog timer
    fn feed(&mut self);
}

/// No-op watchdog for systems without task supervision (and for tests)
#[derive(Debug, Default, Clone, Copy)]
pub struct NoWatchdog;

impl Watchdog for NoWatchdog {
    fn feed(&mut self) {}
}
