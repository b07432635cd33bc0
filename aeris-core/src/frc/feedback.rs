//! Feedback signaler
//!
//! Maps procedure milestones to LED flash patterns. The mapping is
//! fixed: operators in the field read these cadences from muscle
//! memory, so the values must not change between firmware revisions.

use aeris_hal::{Clock, OutputPin};

/// One flash cadence: `count` pulses of `on_ms`, separated by `off_ms`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlashPattern {
    /// Number of pulses
    pub count: u8,
    /// On-time per pulse (ms)
    pub on_ms: u32,
    /// Off-time between pulses (ms); not applied after the final pulse
    pub off_ms: u32,
}

/// Procedure milestones with a visible cadence
///
/// Hold-progress dots are informational and go through the log channel
/// instead, one per half-second of hold time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Milestone {
    /// Hold confirmed, procedure starting
    Acknowledged,
    /// Warmup done, FRC command about to be issued
    PreCalibration,
    /// One valid warmup reading accumulated
    ReadingOk,
    /// One warmup reading failed (skipped, not fatal)
    ReadingError,
    /// FRC command failed or sensor was not ready
    CommandFailure,
    /// Correction applied successfully
    CalibrationSuccess,
}

impl Milestone {
    /// The fixed cadence for this milestone
    pub const fn pattern(self) -> FlashPattern {
        match self {
            Milestone::Acknowledged => FlashPattern { count: 5, on_ms: 150, off_ms: 150 },
            Milestone::PreCalibration => FlashPattern { count: 3, on_ms: 400, off_ms: 300 },
            Milestone::ReadingOk => FlashPattern { count: 1, on_ms: 100, off_ms: 0 },
            Milestone::ReadingError => FlashPattern { count: 2, on_ms: 50, off_ms: 50 },
            Milestone::CommandFailure => FlashPattern { count: 10, on_ms: 80, off_ms: 80 },
            Milestone::CalibrationSuccess => FlashPattern { count: 2, on_ms: 400, off_ms: 300 },
        }
    }
}

/// Flash a pattern on the feedback pin, blocking until done
pub fn flash<O: OutputPin, C: Clock>(pin: &mut O, clock: &mut C, pattern: FlashPattern) {
    for i in 0..pattern.count {
        pin.set_high();
        clock.delay_ms(pattern.on_ms);
        pin.set_low();
        if i + 1 < pattern.count {
            clock.delay_ms(pattern.off_ms);
        }
    }
}

/// Signal a milestone on the feedback pin, blocking until done
pub fn signal<O: OutputPin, C: Clock>(pin: &mut O, clock: &mut C, milestone: Milestone) {
    flash(pin, clock, milestone.pattern());
}
