//! Monotonic clock abstraction
//!
//! The recalibration procedure is time-driven: hold confirmation, the
//! multi-minute warmup phase, and inter-sample idle waits are all
//! measured against a monotonic millisecond clock. Abstracting the
//! clock lets the timing logic run against a simulated clock in host
//! tests instead of real multi-minute waits.

/// Monotonic millisecond clock with blocking delay
///
/// `now_ms` must be monotonic for the lifetime of the implementation;
/// wrap-around is not handled by consumers, so implementations should
/// back it with a 64-bit counter.
pub trait Clock {
    /// Milliseconds elapsed since an arbitrary fixed epoch (e.g. boot)
    fn now_ms(&self) -> u64;

    /// Block for the given number of milliseconds
    fn delay_ms(&mut self, ms: u32);

    /// Milliseconds elapsed since `start_ms`
    fn elapsed_since(&self, start_ms: u64) -> u64 {
        self.now_ms().saturating_sub(start_ms)
    }
}
