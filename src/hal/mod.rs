//! Hardware Abstraction Layer implementations.
//!
//! This module contains concrete implementations of the traits
//! defined in [`crate::traits`] for various platforms.
//!
//! # Available Implementations
//!
//! - `mock`: Test implementations for desktop development
//! - `gpio`: Any board with `embedded-hal` 1.0 digital pins
//! - `host`: Real-time delay on desktop (requires `std` feature)
//! - `esp32`: ESP32-C3 SuperMini pin map and bring-up (requires `esp32` feature)

pub mod gpio;
pub mod mock;

#[cfg(feature = "std")]
pub mod host;

#[cfg(feature = "esp32")]
pub mod esp32;

pub use gpio::GpioIo;
pub use mock::*;

#[cfg(feature = "std")]
pub use host::ThreadDelay;

#[cfg(feature = "esp32")]
pub use esp32::*;
