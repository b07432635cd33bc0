//! Procedure state machine

pub mod events;
pub mod machine;

pub use events::ProcedureEvent;
pub use machine::ProcedureState;
