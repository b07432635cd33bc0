//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the capability
//! traits defined in aeris-core:
//!
//! - SCD4x CO2/temperature/humidity sensor (blocking I2C)

#![no_std]
#![deny(unsafe_code)]

pub mod scd4x;

pub use scd4x::{Scd4x, SCD4X_I2C_ADDR};
