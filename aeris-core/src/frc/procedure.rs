//! Procedure orchestrator
//!
//! [`FrcProcedure`] owns the trigger input, the feedback output, the
//! clock and the watchdog, and sequences one recalibration session:
//! hold confirmation, halt of periodic sampling, warmup, the FRC
//! command, outcome report, and the release wait. The whole session is
//! one blocking call from the caller's perspective.
//!
//! The orchestrator never restarts periodic measurement: `poll`
//! returning `true` is the caller's signal to do that itself, keeping
//! post-calibration configuration under the caller's control.

use aeris_hal::{Clock, InputPin, OutputPin, Watchdog};
use core::fmt::Write;
use heapless::String;

use super::{feedback, keepalive_delay, recal, trigger, warmup};
use super::{CalibrationOutcome, HoldOutcome, Milestone};
use crate::config::FrcConfig;
use crate::state::{ProcedureEvent, ProcedureState};
use crate::traits::{Co2Sensor, EventLog};

/// Trigger poll interval while waiting for release (ms)
const RELEASE_POLL_MS: u32 = 50;

/// Debounce delay after the trigger is released (ms)
const RELEASE_DEBOUNCE_MS: u32 = 200;

/// Wait after halting periodic measurement before sampling (ms)
const HALT_SETTLE_MS: u32 = 500;

/// The forced-recalibration procedure
///
/// Construct once at startup with the bound GPIO roles, then call
/// [`poll`](FrcProcedure::poll) once per iteration of the main loop.
/// The trigger input is active-low (pull-up wiring).
pub struct FrcProcedure<I, O, C, W> {
    trigger: I,
    feedback: O,
    clock: C,
    watchdog: W,
    config: FrcConfig,
    state: ProcedureState,
    last_outcome: Option<CalibrationOutcome>,
}

impl<I, O, C, W> FrcProcedure<I, O, C, W>
where
    I: InputPin,
    O: OutputPin,
    C: Clock,
    W: Watchdog,
{
    /// Bind the GPIO roles and configuration
    pub fn new(trigger: I, feedback: O, clock: C, watchdog: W, config: FrcConfig) -> Self {
        Self {
            trigger,
            feedback,
            clock,
            watchdog,
            config,
            state: ProcedureState::Idle,
            last_outcome: None,
        }
    }

    /// Current procedure state
    pub fn state(&self) -> ProcedureState {
        self.state
    }

    /// Active configuration
    pub fn config(&self) -> &FrcConfig {
        &self.config
    }

    /// Outcome of the most recent session, if any ran
    pub fn last_outcome(&self) -> Option<CalibrationOutcome> {
        self.last_outcome
    }

    /// Check the trigger and, if held for the full duration, run one
    /// complete recalibration session
    ///
    /// Returns `true` iff a session ran past the point of no return,
    /// in which case periodic measurement was halted and the caller
    /// must restart it. Blocks for the entire session (minutes);
    /// the watchdog is fed throughout.
    ///
    /// The sensor is exclusively owned by the procedure for the whole
    /// call.
    pub fn poll<S, L>(&mut self, sensor: &mut S, log: &mut L) -> bool
    where
        S: Co2Sensor,
        L: EventLog,
    {
        // Fast path: this runs every loop iteration and must stay
        // near-free.
        if self.trigger.is_high() {
            return false;
        }

        self.state = ProcedureState::Idle.transition(ProcedureEvent::TriggerAsserted);
        log.info("trigger pressed; hold to start forced recalibration");

        let hold = trigger::confirm_hold(
            &self.trigger,
            &mut self.clock,
            &mut self.watchdog,
            log,
            self.config.hold_ms,
        );
        match hold {
            HoldOutcome::Cancelled => {
                log.info("trigger released early; recalibration cancelled");
                self.state = self.state.transition(ProcedureEvent::HoldCancelled);
                self.last_outcome = Some(CalibrationOutcome::Cancelled);
                return false;
            }
            HoldOutcome::Confirmed => {
                self.state = self.state.transition(ProcedureEvent::HoldConfirmed);
            }
        }

        // Point of no return
        feedback::signal(&mut self.feedback, &mut self.clock, Milestone::Acknowledged);
        let mut msg: String<80> = String::new();
        let _ = write!(
            msg,
            "FRC started: {} min warmup, {} ppm reference",
            self.config.warmup_ms / 60_000,
            self.config.reference_ppm
        );
        log.info(&msg);

        let outcome = self.run_session(sensor, log);
        self.last_outcome = Some(outcome);

        // Finalizer: runs for every confirmed session, whichever
        // outcome branch was taken.
        if sensor.power_down().is_err() {
            log.warning("sensor power-down failed");
        }

        log.info("release trigger to resume normal operation");
        while self.trigger.is_low() {
            self.watchdog.feed();
            self.clock.delay_ms(RELEASE_POLL_MS);
        }
        self.clock.delay_ms(RELEASE_DEBOUNCE_MS);
        self.state = self.state.transition(ProcedureEvent::TriggerReleased);

        // Session state is discarded; ready for the next trigger.
        // Periodic measurement restart is the caller's contract.
        self.state = ProcedureState::Idle;
        true
    }

    /// The irreversible part of the session, from arming through the
    /// FRC outcome
    fn run_session<S, L>(&mut self, sensor: &mut S, log: &mut L) -> CalibrationOutcome
    where
        S: Co2Sensor,
        L: EventLog,
    {
        // Optional low-power extension point; failure is not fatal
        if sensor.wake_up().is_err() {
            log.warning("sensor wake failed; continuing");
        }

        // Halt any periodic session unconditionally. Absence of an
        // active session is not an error; calibration proceeds.
        if sensor.stop_periodic_measurement().is_err() {
            log.warning("halting periodic measurement failed; continuing");
        }
        keepalive_delay(&mut self.clock, &mut self.watchdog, HALT_SETTLE_MS);
        self.state = self.state.transition(ProcedureEvent::WarmupStarted);

        log.info("warmup started; keep the sensor in fresh outdoor air");
        let stats = warmup::run_warmup(
            sensor,
            &mut self.feedback,
            &mut self.clock,
            &mut self.watchdog,
            log,
            &self.config,
        );

        if stats.drift_exceeds(self.config.reference_ppm, self.config.drift_warn_ppm) {
            // Warn only: conditions may not be valid fresh air, but
            // the operator confirmed the trigger and the session
            // proceeds.
            let mut msg: String<96> = String::new();
            let _ = write!(
                msg,
                "warmup average {} ppm vs reference {} ppm (diff {} ppm); ensure fresh air",
                stats.average_ppm as i32,
                self.config.reference_ppm,
                stats.drift_from(self.config.reference_ppm) as i32
            );
            log.warning(&msg);
        }
        self.state = self.state.transition(ProcedureEvent::WarmupComplete);

        feedback::signal(&mut self.feedback, &mut self.clock, Milestone::PreCalibration);
        log.info("performing forced recalibration");
        let outcome = recal::execute(
            sensor,
            &mut self.feedback,
            &mut self.clock,
            log,
            self.config.reference_ppm,
        );
        self.state = self.state.transition(ProcedureEvent::CalibrationFinished);
        outcome
    }
}
