//! Forced-recalibration (FRC) procedure
//!
//! A user-triggered, time-bounded recalibration workflow for SCD4x-class
//! CO2 sensors:
//!
//! 1. Long-press trigger confirmation ([`trigger`])
//! 2. Halt of the caller's periodic measurement session
//! 3. Multi-minute fresh-air warmup with a running average ([`warmup`])
//! 4. One-shot forced-recalibration command and correction decode
//!    ([`recal`])
//! 5. Outcome report, trigger-release wait, return of control
//!
//! [`procedure::FrcProcedure`] sequences the phases; [`feedback`] maps
//! milestones to LED flash patterns the operator can read without a
//! console.

use aeris_hal::{Clock, Watchdog};

pub mod feedback;
pub mod procedure;
pub mod recal;
pub mod trigger;
pub mod warmup;

#[cfg(test)]
pub(crate) mod testutil;

pub use feedback::{FlashPattern, Milestone};
pub use procedure::FrcProcedure;
pub use recal::CalibrationOutcome;
pub use trigger::HoldOutcome;
pub use warmup::WarmupStats;

/// Watchdog feed cadence inside blocking waits (ms)
pub(crate) const KEEPALIVE_CHUNK_MS: u32 = 100;

/// Block for `total_ms`, feeding the watchdog every chunk
///
/// Every wait longer than a trivial delay must go through this (or an
/// equivalent deadline loop): the surrounding system treats a starved
/// watchdog as a fatal liveness violation.
pub(crate) fn keepalive_delay<C: Clock, W: Watchdog>(
    clock: &mut C,
    watchdog: &mut W,
    total_ms: u32,
) {
    let deadline = clock.now_ms() + total_ms as u64;
    loop {
        watchdog.feed();
        let remaining = deadline.saturating_sub(clock.now_ms());
        if remaining == 0 {
            break;
        }
        clock.delay_ms(remaining.min(KEEPALIVE_CHUNK_MS as u64) as u32);
    }
}
