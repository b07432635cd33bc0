//! GPIO pin abstractions
//!
//! Provides traits for the two pin roles the recalibration procedure
//! needs: a digital input (trigger button) and a digital output
//! (feedback LED). Chip-specific HALs implement these over their own
//! register access.

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip. Electrical polarity (pull-up vs. pull-down
/// wiring) is the implementation's concern; these methods report the
/// logic level as read.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Digital output pin
///
/// Implementations should handle the actual hardware register
/// manipulation for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}
