//! Trait definitions for hardware abstraction.
//!
//! This module defines the abstractions that let the interlock:
//! - Run on different hardware (ESP32, any `embedded-hal` board, desktop mock)
//! - Be tested without real sleeping
//!
//! # Hardware Abstraction
//!
//! - [`VehicleIo`]: four sensor reads and two actuator writes
//! - [`Delay`]: blocking wait for one polling interval
//! - [`Clock`]: time source for diagnostics and tests

pub mod hardware;

pub use hardware::*;
