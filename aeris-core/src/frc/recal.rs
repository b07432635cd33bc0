//! Forced-recalibration command execution
//!
//! One FRC command per session, no retry: failures surface to the
//! operator, who re-triggers the whole procedure if needed. The raw
//! 16-bit response is either the reserved all-ones failure value or
//! the applied correction biased by `0x8000`.

use aeris_hal::{Clock, OutputPin};
use core::fmt::Write;
use heapless::String;

use super::{feedback, Milestone};
use crate::traits::{Co2Sensor, EventLog, SensorError};

/// Reserved response meaning the sensor was not in a measuring state
/// when the FRC command was issued
pub const FRC_FAILED_SENTINEL: u16 = 0xFFFF;

/// Bias added by the sensor to the signed correction in the response
pub const FRC_CORRECTION_BIAS: u16 = 0x8000;

/// Result of one recalibration session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationOutcome {
    /// Correction applied; signed offset in ppm (can be negative)
    Success(i16),
    /// The FRC command itself failed
    CommandFailed(SensorError),
    /// The sensor returned the failure sentinel: it was not measuring
    /// before FRC was issued
    SensorNotReady,
    /// Trigger released before hold confirmation; nothing was done
    Cancelled,
}

impl CalibrationOutcome {
    /// Check whether a correction was applied
    pub fn is_success(&self) -> bool {
        matches!(self, CalibrationOutcome::Success(_))
    }
}

/// Decode the signed ppm correction from a raw FRC response
///
/// Returns `None` for the failure sentinel. The sentinel check must
/// come first: decoded naively, `0xFFFF` would read as a plausible
/// `-1` ppm correction.
pub fn decode_correction(raw: u16) -> Option<i16> {
    if raw == FRC_FAILED_SENTINEL {
        return None;
    }
    Some(raw.wrapping_sub(FRC_CORRECTION_BIAS) as i16)
}

/// Issue the FRC command and interpret the response
///
/// Reports the outcome through both the log and the feedback pin.
pub fn execute<S, O, C, L>(
    sensor: &mut S,
    feedback_pin: &mut O,
    clock: &mut C,
    log: &mut L,
    reference_ppm: u16,
) -> CalibrationOutcome
where
    S: Co2Sensor,
    O: OutputPin,
    C: Clock,
    L: EventLog,
{
    let raw = match sensor.perform_forced_recalibration(reference_ppm) {
        Ok(raw) => raw,
        Err(e) => {
            let mut msg: String<64> = String::new();
            let _ = write!(msg, "FRC command failed: {:?}", e);
            log.error(&msg);
            feedback::signal(feedback_pin, clock, Milestone::CommandFailure);
            return CalibrationOutcome::CommandFailed(e);
        }
    };

    match decode_correction(raw) {
        None => {
            log.error("FRC failed: sensor was not measuring before the command");
            feedback::signal(feedback_pin, clock, Milestone::CommandFailure);
            CalibrationOutcome::SensorNotReady
        }
        Some(correction) => {
            let mut msg: String<80> = String::new();
            let _ = write!(
                msg,
                "FRC successful: correction {} ppm, reference {} ppm",
                correction, reference_ppm
            );
            log.info(&msg);
            feedback::signal(feedback_pin, clock, Milestone::CalibrationSuccess);
            CalibrationOutcome::Success(correction)
        }
    }
}
