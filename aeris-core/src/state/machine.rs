//! State machine definition
//!
//! The procedure is strictly sequential: every transition moves
//! forward, with the single exception of an early trigger release
//! during hold confirmation, which aborts back to Idle with no side
//! effects.

use super::events::ProcedureEvent;

/// Procedure phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProcedureState {
    /// Waiting for the trigger; normal measurement runs undisturbed
    Idle,
    /// Trigger asserted, counting hold time
    AwaitingHoldConfirmation,
    /// Hold confirmed; periodic sampling being halted
    Armed,
    /// Fresh-air warmup sampling in progress
    Warmup,
    /// FRC command issued, interpreting the response
    Calibrating,
    /// Outcome reported, waiting for the operator to release the trigger
    AwaitingRelease,
    /// Procedure finished; control returns to the caller
    Done,
}

impl ProcedureState {
    /// Check whether the procedure can still be abandoned without side
    /// effects
    pub fn is_abortable(&self) -> bool {
        matches!(
            self,
            ProcedureState::Idle | ProcedureState::AwaitingHoldConfirmation
        )
    }

    /// Check whether the sensor is exclusively owned by the procedure
    /// in this state
    pub fn owns_sensor(&self) -> bool {
        matches!(
            self,
            ProcedureState::Armed
                | ProcedureState::Warmup
                | ProcedureState::Calibrating
                | ProcedureState::AwaitingRelease
        )
    }

    /// Process an event and return the next state
    ///
    /// This is the core state transition logic.
    pub fn transition(self, event: ProcedureEvent) -> Self {
        use ProcedureEvent::*;
        use ProcedureState::*;

        match (self, event) {
            (Idle, TriggerAsserted) => AwaitingHoldConfirmation,

            // The only backward edge: early release aborts the hold
            (AwaitingHoldConfirmation, HoldCancelled) => Idle,
            (AwaitingHoldConfirmation, HoldConfirmed) => Armed,

            (Armed, WarmupStarted) => Warmup,
            (Warmup, WarmupComplete) => Calibrating,
            (Calibrating, CalibrationFinished) => AwaitingRelease,
            (AwaitingRelease, TriggerReleased) => Done,

            // Default: stay in current state
            _ => self,
        }
    }
}
