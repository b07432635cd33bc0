//! CO2 sensor capability trait
//!
//! Abstracts the subset of the SCD4x command set the recalibration
//! procedure needs. The concrete I2C driver lives in `aeris-drivers`;
//! tests implement this trait with scripted doubles.

/// Errors that can occur communicating with the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Bus-level read or write failed
    Bus,
    /// A received word failed its CRC check
    Crc,
    /// No measurement was available when one was expected
    NotReady,
}

/// One sensor measurement
///
/// Temperature and humidity use fixed-point units so the core stays
/// float-free outside the averaging math: milli-degrees Celsius and
/// milli-percent relative humidity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// CO2 concentration in ppm
    pub co2_ppm: u16,
    /// Temperature in milli-degrees Celsius
    pub temperature_mc: i32,
    /// Relative humidity in milli-percent
    pub humidity_mpct: i32,
}

/// Trait for SCD4x-class CO2 sensors
///
/// All commands are blocking; implementations include any fixed command
/// execution delay the datasheet mandates.
pub trait Co2Sensor {
    /// Stop an in-progress periodic measurement session
    ///
    /// Required before single-shot measurements and before forced
    /// recalibration. Succeeds trivially if no session is active on
    /// some parts; callers tolerate failure here.
    fn stop_periodic_measurement(&mut self) -> Result<(), SensorError>;

    /// Start periodic measurement mode
    ///
    /// The recalibration procedure never calls this; it exists for the
    /// caller, which owns the regular measurement cadence.
    fn start_periodic_measurement(&mut self) -> Result<(), SensorError>;

    /// Trigger one single-shot measurement cycle
    ///
    /// Returns as soon as the command is accepted; the result becomes
    /// available after the sensor's measurement time (~5 s) and is
    /// signalled via [`data_ready`](Co2Sensor::data_ready).
    fn measure_single_shot(&mut self) -> Result<(), SensorError>;

    /// Check whether a measurement result is ready to read
    fn data_ready(&mut self) -> Result<bool, SensorError>;

    /// Read the pending measurement
    fn read_measurement(&mut self) -> Result<Measurement, SensorError>;

    /// Issue a forced recalibration against the given reference
    /// concentration
    ///
    /// Returns the raw 16-bit FRC response: the applied correction
    /// biased by `0x8000`, or `0xFFFF` if the sensor was not in a
    /// measuring state beforehand. Interpretation is the caller's job
    /// (see `frc::recal`).
    fn perform_forced_recalibration(
        &mut self,
        reference_ppm: u16,
    ) -> Result<u16, SensorError>;

    /// Wake the sensor from low-power mode
    ///
    /// Optional; parts without a power-down mode leave the default
    /// no-op in place.
    fn wake_up(&mut self) -> Result<(), SensorError> {
        Ok(())
    }

    /// Put the sensor into low-power mode
    ///
    /// Optional, like [`wake_up`](Co2Sensor::wake_up).
    fn power_down(&mut self) -> Result<(), SensorError> {
        Ok(())
    }
}
