//! Events that advance the recalibration procedure

/// Events that can trigger procedure state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProcedureEvent {
    /// Trigger input read asserted during an idle poll
    TriggerAsserted,
    /// Trigger released before the hold duration elapsed
    HoldCancelled,
    /// Trigger held for the full duration; procedure is now irreversible
    HoldConfirmed,
    /// Periodic sampling halted, warmup sampling begins
    WarmupStarted,
    /// Warmup duration elapsed
    WarmupComplete,
    /// FRC command issued and its outcome interpreted
    CalibrationFinished,
    /// Trigger released after the procedure ended
    TriggerReleased,
}

impl ProcedureEvent {
    /// Check if this event is driven by the operator's hands
    pub fn is_user_event(&self) -> bool {
        matches!(
            self,
            ProcedureEvent::TriggerAsserted
                | ProcedureEvent::HoldCancelled
                | ProcedureEvent::HoldConfirmed
                | ProcedureEvent::TriggerReleased
        )
    }
}
