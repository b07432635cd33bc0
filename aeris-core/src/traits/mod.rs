//! Capability traits
//!
//! These traits define the interface between the recalibration logic
//! and its collaborators: the CO2 sensor driver and the (optional)
//! event logging channel. GPIO, clock and watchdog abstractions live
//! in `aeris-hal`.

pub mod log;
pub mod sensor;

pub use log::{EventLog, NullLog, Severity};
pub use sensor::{Co2Sensor, Measurement, SensorError};
