//! Shared test doubles for the procedure tests
//!
//! All fakes share a `Cell<u64>` millisecond counter: the clock
//! advances it on every delay, and the time-aware fakes (trigger,
//! recording pin, sensor) read it, so multi-minute procedures run
//! instantly with faithful timing.

use core::cell::Cell;

use aeris_hal::{Clock, InputPin, OutputPin};
use heapless::{String, Vec};

use crate::traits::{Co2Sensor, EventLog, Measurement, SensorError, Severity};

/// Simulated monotonic clock; `delay_ms` advances time instantly
pub struct TestClock<'a> {
    now: &'a Cell<u64>,
}

impl<'a> TestClock<'a> {
    pub fn new(now: &'a Cell<u64>) -> Self {
        Self { now }
    }
}

impl Clock for TestClock<'_> {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }

    fn delay_ms(&mut self, ms: u32) {
        self.now.set(self.now.get() + ms as u64);
    }
}

/// Active-low trigger input scripted against the shared clock
pub struct TimedTrigger<'a> {
    now: &'a Cell<u64>,
    released_at: Option<u64>,
}

impl<'a> TimedTrigger<'a> {
    /// Held (asserted) forever
    pub fn held(now: &'a Cell<u64>) -> Self {
        Self { now, released_at: None }
    }

    /// Held from t=0, released once the clock reaches `at_ms`
    pub fn released_at(now: &'a Cell<u64>, at_ms: u64) -> Self {
        Self { now, released_at: Some(at_ms) }
    }

    /// Never pressed at all
    pub fn unpressed(now: &'a Cell<u64>) -> Self {
        Self { now, released_at: Some(0) }
    }
}

impl InputPin for TimedTrigger<'_> {
    fn is_high(&self) -> bool {
        match self.released_at {
            Some(at_ms) => self.now.get() >= at_ms,
            None => false,
        }
    }
}

/// Output pin that records every level change with its timestamp
pub struct RecordingPin<'a> {
    now: &'a Cell<u64>,
    pub transitions: Vec<(u64, bool), 256>,
}

impl<'a> RecordingPin<'a> {
    pub fn new(now: &'a Cell<u64>) -> Self {
        Self { now, transitions: Vec::new() }
    }

    /// Number of on-pulses driven so far
    pub fn pulse_count(&self) -> usize {
        self.transitions.iter().filter(|(_, high)| *high).count()
    }
}

impl OutputPin for RecordingPin<'_> {
    fn set_high(&mut self) {
        let _ = self.transitions.push((self.now.get(), true));
    }

    fn set_low(&mut self) {
        let _ = self.transitions.push((self.now.get(), false));
    }
}

/// In-memory event log
#[derive(Default)]
pub struct MemoryLog {
    pub entries: Vec<(Severity, String<96>), 64>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_with(&self, severity: Severity) -> usize {
        self.entries.iter().filter(|(s, _)| *s == severity).count()
    }

    pub fn count_containing(&self, needle: &str) -> usize {
        self.entries
            .iter()
            .filter(|(_, m)| m.contains(needle))
            .count()
    }

    pub fn any_containing(&self, needle: &str) -> bool {
        self.count_containing(needle) > 0
    }
}

impl EventLog for MemoryLog {
    fn log(&mut self, severity: Severity, message: &str) {
        let mut stored: String<96> = String::new();
        // Truncate long messages rather than dropping them
        let take = message.len().min(stored.capacity());
        let _ = stored.push_str(&message[..take]);
        let _ = self.entries.push((severity, stored));
    }
}

/// Scripted behavior of one warmup sampling attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    /// Single shot succeeds; read returns this concentration
    Read(u16),
    /// The single-shot command itself fails
    CmdErr,
    /// Command accepted but data never becomes ready
    NotReady,
    /// Data ready but the read fails
    ReadErr,
}

/// CO2 sensor double driven by a per-attempt script
///
/// Attempts beyond the end of the script fail at the command level,
/// so a short script never silently pads the average.
pub struct ScriptedSensor<'a> {
    now: &'a Cell<u64>,
    script: Vec<Script, 32>,
    cursor: usize,
    pending: Option<Script>,
    /// Clock time of every accepted or rejected single-shot command
    pub single_shot_times: Vec<u64, 32>,
    pub stop_calls: u32,
    pub start_calls: u32,
    pub wake_calls: u32,
    pub power_down_calls: u32,
    pub frc_calls: u32,
    /// Reference ppm passed to the last FRC command
    pub frc_reference: Option<u16>,
    /// Scripted FRC response
    pub frc_response: Result<u16, SensorError>,
    pub stop_fails: bool,
    pub wake_fails: bool,
}

impl<'a> ScriptedSensor<'a> {
    pub fn new(now: &'a Cell<u64>, script: &[Script]) -> Self {
        let mut stored = Vec::new();
        for s in script {
            let _ = stored.push(*s);
        }
        Self {
            now,
            script: stored,
            cursor: 0,
            pending: None,
            single_shot_times: Vec::new(),
            stop_calls: 0,
            start_calls: 0,
            wake_calls: 0,
            power_down_calls: 0,
            frc_calls: 0,
            frc_reference: None,
            frc_response: Ok(0x8000),
            stop_fails: false,
            wake_fails: false,
        }
    }

    /// Total sensor commands issued, of any kind
    pub fn total_commands(&self) -> u32 {
        self.stop_calls
            + self.start_calls
            + self.single_shot_times.len() as u32
            + self.wake_calls
            + self.power_down_calls
            + self.frc_calls
    }
}

impl Co2Sensor for ScriptedSensor<'_> {
    fn stop_periodic_measurement(&mut self) -> Result<(), SensorError> {
        self.stop_calls += 1;
        if self.stop_fails {
            Err(SensorError::Bus)
        } else {
            Ok(())
        }
    }

    fn start_periodic_measurement(&mut self) -> Result<(), SensorError> {
        self.start_calls += 1;
        Ok(())
    }

    fn measure_single_shot(&mut self) -> Result<(), SensorError> {
        let _ = self.single_shot_times.push(self.now.get());
        let step = self.script.get(self.cursor).copied().unwrap_or(Script::CmdErr);
        self.cursor += 1;

        match step {
            Script::CmdErr => {
                self.pending = None;
                Err(SensorError::Bus)
            }
            other => {
                self.pending = Some(other);
                Ok(())
            }
        }
    }

    fn data_ready(&mut self) -> Result<bool, SensorError> {
        Ok(!matches!(self.pending, Some(Script::NotReady) | None))
    }

    fn read_measurement(&mut self) -> Result<Measurement, SensorError> {
        match self.pending.take() {
            Some(Script::Read(co2_ppm)) => Ok(Measurement {
                co2_ppm,
                temperature_mc: 23_730,
                humidity_mpct: 45_000,
            }),
            Some(Script::ReadErr) => Err(SensorError::Bus),
            _ => Err(SensorError::NotReady),
        }
    }

    fn perform_forced_recalibration(
        &mut self,
        reference_ppm: u16,
    ) -> Result<u16, SensorError> {
        self.frc_calls += 1;
        self.frc_reference = Some(reference_ppm);
        self.frc_response
    }

    fn wake_up(&mut self) -> Result<(), SensorError> {
        self.wake_calls += 1;
        if self.wake_fails {
            Err(SensorError::Bus)
        } else {
            Ok(())
        }
    }

    fn power_down(&mut self) -> Result<(), SensorError> {
        self.power_down_calls += 1;
        Ok(())
    }
}
