//! Fresh-air warmup sampling
//!
//! Before the FRC command is issued the sensor runs single-shot
//! measurements in fresh air for the configured warmup duration,
//! accumulating a running average of the valid readings. Individual
//! failures are skipped, never fatal: a session with ten attempts and
//! three good readings still calibrates.
//!
//! Sampling deadlines are indexed off the warmup start and the attempt
//! count, so a slow measure+read cycle delays only its own slot and
//! never compounds into a warmup overrun.

use aeris_hal::{Clock, OutputPin, Watchdog};
use core::fmt::Write;
use heapless::String;

use super::{feedback, keepalive_delay, Milestone, KEEPALIVE_CHUNK_MS};
use crate::config::FrcConfig;
use crate::traits::{Co2Sensor, EventLog, Measurement, SensorError};

/// Warmup accumulation state
///
/// `average_ppm` is always the arithmetic mean of exactly
/// `reading_count` valid readings; failed and zero-valued reads never
/// contribute.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WarmupStats {
    /// Sampling attempts made, successful or not
    pub attempts: u32,
    /// Valid (error-free, nonzero) readings accumulated
    pub reading_count: u32,
    /// Running arithmetic mean of the valid readings (ppm)
    pub average_ppm: f32,
}

impl WarmupStats {
    /// Fold one valid reading into the running average
    ///
    /// Incremental mean: `avg' = (avg * (n - 1) + x) / n`.
    pub fn record_valid(&mut self, co2_ppm: u16) {
        self.reading_count += 1;
        let n = self.reading_count as f32;
        self.average_ppm = (self.average_ppm * (n - 1.0) + co2_ppm as f32) / n;
    }

    /// Signed distance of the average from the reference (ppm)
    pub fn drift_from(&self, reference_ppm: u16) -> f32 {
        self.average_ppm - reference_ppm as f32
    }

    /// Check whether the average is suspiciously far from the
    /// reference
    ///
    /// Always false with zero readings; there is no average to judge.
    pub fn drift_exceeds(&self, reference_ppm: u16, threshold_ppm: u16) -> bool {
        if self.reading_count == 0 {
            return false;
        }
        let drift = self.drift_from(reference_ppm);
        drift > threshold_ppm as f32 || drift < -(threshold_ppm as f32)
    }
}

/// Run the warmup phase to completion
///
/// Blocks for the full configured warmup duration, feeding the
/// watchdog throughout. Returns the accumulated statistics; the
/// drift sanity check is the caller's decision to report.
pub fn run_warmup<S, O, C, W, L>(
    sensor: &mut S,
    feedback_pin: &mut O,
    clock: &mut C,
    watchdog: &mut W,
    log: &mut L,
    config: &FrcConfig,
) -> WarmupStats
where
    S: Co2Sensor,
    O: OutputPin,
    C: Clock,
    W: Watchdog,
    L: EventLog,
{
    let warmup_start = clock.now_ms();
    let total_ms = config.warmup_ms as u64;
    let mut stats = WarmupStats::default();

    while clock.elapsed_since(warmup_start) < total_ms {
        stats.attempts += 1;

        match sample_once(sensor, clock, watchdog, config) {
            Ok(m) if m.co2_ppm > 0 => {
                stats.record_valid(m.co2_ppm);
                feedback::signal(feedback_pin, clock, Milestone::ReadingOk);

                let remaining_s =
                    total_ms.saturating_sub(clock.elapsed_since(warmup_start)) / 1_000;
                let mut msg: String<96> = String::new();
                let _ = write!(
                    msg,
                    "warmup {}/{}: co2={} ppm (avg={} ppm), {} s remaining",
                    stats.reading_count,
                    config.warmup_attempts(),
                    m.co2_ppm,
                    stats.average_ppm as u32,
                    remaining_s
                );
                log.info(&msg);
            }
            Ok(_) => {
                // A zero concentration is a sensor artifact, not fresh
                // air at 0 ppm; it must not drag the average down.
                feedback::signal(feedback_pin, clock, Milestone::ReadingError);
                log.warning("warmup reading discarded: zero concentration");
            }
            Err(e) => {
                feedback::signal(feedback_pin, clock, Milestone::ReadingError);
                let mut msg: String<64> = String::new();
                let _ = write!(msg, "warmup measurement failed: {:?}", e);
                log.warning(&msg);
            }
        }

        // Attempt-indexed deadline for the next sample
        let next_sample =
            warmup_start + (stats.attempts as u64 + 1) * config.sample_interval_ms as u64;
        while clock.now_ms() < next_sample && clock.elapsed_since(warmup_start) < total_ms {
            watchdog.feed();
            clock.delay_ms(KEEPALIVE_CHUNK_MS);
        }
    }

    let mut msg: String<80> = String::new();
    let _ = write!(
        msg,
        "warmup complete: {} readings, average {} ppm",
        stats.reading_count, stats.average_ppm as u32
    );
    log.info(&msg);

    stats
}

/// One single-shot measurement cycle: trigger, settle, poll, read
fn sample_once<S, C, W>(
    sensor: &mut S,
    clock: &mut C,
    watchdog: &mut W,
    config: &FrcConfig,
) -> Result<Measurement, SensorError>
where
    S: Co2Sensor,
    C: Clock,
    W: Watchdog,
{
    sensor.measure_single_shot()?;
    keepalive_delay(clock, watchdog, config.settle_ms);

    if !sensor.data_ready()? {
        return Err(SensorError::NotReady);
    }
    sensor.read_measurement()
}
