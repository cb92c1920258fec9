//! # eco-stop-starter
//!
//! A safety interlock for a vehicle's idle-stop ("Eco-Stop") bypass
//! circuit. It sits between the neutral switch and the idle-stop ECU so a
//! rider can restart a stalled engine with the ECU's own auto-restart
//! hardware, without shifting to neutral.
//!
//! ## Features
//!
//! - **Shift-position relay**: forwards neutral to the ECU, forced on when
//!   idle-stop is disabled
//! - **Manual restart**: releasing the brake with the engine stopped runs a
//!   timed cranking sequence through the bypass relay
//! - **Debounced start detection**: the engine signal must hold steady
//!   before a start is confirmed
//! - **Retry storm protection**: a failed restart disarms until the engine
//!   is seen running again
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Vehicle I/O, delay and clock abstractions
//! - `config` - Timing windows and line polarities
//! - `relay` - Shift-position relay
//! - `cranking` - Cranking sequence and start detection
//! - `controller` - Main loop that ties everything together
//! - `hal` - Concrete implementations (mock for testing, gpio/esp32 for hardware)
//!
//! ## Example
//!
//! ```rust
//! use eco_stop_starter::{CrankingOutcome, EcoStopController};
//! use eco_stop_starter::hal::{MockDelay, MockVehicle};
//!
//! let mut controller = EcoStopController::new(MockVehicle::new(), MockDelay::new());
//! controller.initialize().unwrap();
//!
//! // Ride: engine running, brake held
//! controller.io_mut().engine_running = true;
//! controller.tick().unwrap();
//!
//! // Stall, then release the brake; the ECU catches it at 600ms
//! controller.io_mut().engine_running = false;
//! controller.io_mut().brake_released = true;
//! controller.io_mut().starts_after_reads(6);
//!
//! let report = controller.tick().unwrap();
//! assert_eq!(report.cranking, Some(CrankingOutcome::Started));
//! assert!(controller.is_armed());
//!
//! // On hardware, call `controller.run()` instead, which never returns.
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Compile-time timing windows and line polarities.
pub mod config;
/// Main interlock controller.
pub mod controller;
/// Cranking sequence and start detection.
pub mod cranking;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Shift-position relay to the idle-stop ECU.
pub mod relay;
/// Core traits for hardware abstraction.
pub mod traits;

// Re-exports for convenience
pub use config::{
    Level, LinePolarity, TimingConfig, CRANKING_MAX_TIME_MS, POLLING_INTERVAL_MS,
    START_CHECK_DELAY_TIME_MS, START_THRESHOLD_TIME_MS,
};
pub use controller::{brake_released_edge, ControllerState, EcoStopController, TickReport};
pub use cranking::{CrankingOutcome, CrankingSequencer, StartDetector};
pub use relay::{compute_neutral_output, transfer_shift_position};
pub use traits::{Clock, Delay, SensorSnapshot, VehicleIo};
