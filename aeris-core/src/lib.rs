//! Board-agnostic forced-recalibration logic for the Aeris CO2 monitor
//!
//! This crate contains the on-demand forced-recalibration (FRC) workflow
//! for SCD4x-class CO2 sensors, independent of any specific hardware:
//!
//! - Capability traits (CO2 sensor, event log)
//! - Procedure state machine
//! - Long-press trigger confirmation
//! - Fresh-air warmup sampling with a running average
//! - FRC command execution and correction decoding
//! - The blocking procedure orchestrator
//!
//! Hardware access goes through the traits in [`aeris_hal`] and
//! [`traits`], so the whole procedure runs against simulated hardware
//! in host tests.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod frc;
pub mod state;
pub mod traits;
