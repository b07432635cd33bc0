//! Aeris Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits consumed by the
//! board-agnostic recalibration logic in `aeris-core`. Chip-specific
//! crates (or the host test suite) provide the implementations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application logic (aeris-core)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  aeris-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  chip HAL     │       │  test doubles │
//! │  (e.g. ESP32) │       │  (host tests) │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`], [`gpio::OutputPin`] - Digital I/O
//! - [`clock::Clock`] - Monotonic time and blocking delay
//! - [`watchdog::Watchdog`] - Liveness keep-alive during long waits

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod gpio;
pub mod watchdog;

// Re-export key traits at crate root for convenience
pub use clock::Clock;
pub use gpio::{InputPin, OutputPin};
pub use watchdog::{NoWatchdog, Watchdog};
