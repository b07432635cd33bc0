//! Configuration type definitions
//!
//! All recalibration parameters are fixed at build time; the defaults
//! match the deployed monitors (outdoor reference for an urban site,
//! 3 second hold, 5 minute warmup sampled every 30 seconds).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Forced-recalibration procedure configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrcConfig {
    /// Known-good ambient CO2 concentration used as ground truth (ppm)
    ///
    /// Global outdoor background is ~420 ppm; urban areas run 10-50 ppm
    /// higher. Use 420 for rural sites, 450+ near traffic.
    pub reference_ppm: u16,
    /// How long the trigger must be held to confirm the procedure (ms)
    pub hold_ms: u32,
    /// Total fresh-air warmup duration before the FRC command (ms)
    ///
    /// The sensor needs at least 3 minutes of settling; 5 minutes gives
    /// better stabilization.
    pub warmup_ms: u32,
    /// Interval between warmup sampling attempts (ms)
    pub sample_interval_ms: u32,
    /// Wait after issuing a single-shot measurement before polling for
    /// the result (ms)
    pub settle_ms: u32,
    /// Warn (without blocking) when the warmup average differs from the
    /// reference by more than this many ppm
    pub drift_warn_ppm: u16,
}

impl Default for FrcConfig {
    fn default() -> Self {
        Self {
            reference_ppm: 440,
            hold_ms: 3_000,
            warmup_ms: 300_000,
            sample_interval_ms: 30_000,
            settle_ms: 5_000,
            drift_warn_ppm: 100,
        }
    }
}

impl FrcConfig {
    /// Number of sampling attempts the warmup phase will make
    pub const fn warmup_attempts(&self) -> u32 {
        self.warmup_ms / self.sample_interval_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FrcConfig::default();
        assert_eq!(config.reference_ppm, 440);
        assert_eq!(config.hold_ms, 3_000);
        assert_eq!(config.warmup_ms, 300_000);
        assert_eq!(config.sample_interval_ms, 30_000);
    }

    #[test]
    fn test_warmup_attempts() {
        let config = FrcConfig::default();
        // 5 minutes at one attempt per 30 seconds
        assert_eq!(config.warmup_attempts(), 10);
    }
}
