//! Hardware abstraction traits for the vehicle signal lines and timing.
//!
//! The controller never touches port registers. Each target platform
//! provides a [`VehicleIo`] implementation covering the four input lines and
//! two output lines, plus a [`Delay`] that blocks for one polling interval.
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`VehicleIo`] | Four sensor reads, two actuator writes |
//! | [`Delay`] | Blocking fixed-duration wait |
//! | [`Clock`] | Time source for diagnostics and tests |
//!
//! # Implementation
//!
//! For testing and desktop development, use the mock implementations
//! from [`crate::hal::mock`]. For any `embedded-hal` board use
//! [`crate::hal::GpioIo`]; for ESP32 hardware see `hal::esp32`
//! (requires `esp32` feature).
//!
//! # Example
//!
//! ```rust
//! use eco_stop_starter::traits::VehicleIo;
//! use eco_stop_starter::hal::MockVehicle;
//!
//! let mut vehicle = MockVehicle::new();
//! vehicle.neutral = true;
//!
//! let snapshot = vehicle.snapshot().unwrap();
//! assert!(snapshot.is_neutral);
//! assert!(!snapshot.is_engine_running);
//! ```

/// The four vehicle inputs sampled in one read.
///
/// A snapshot is only meaningful at the instant it was taken. Fields are not
/// cross-checked: an implausible combination (every line asserted, say) is
/// still a valid sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SensorSnapshot {
    /// Idle-stop feature disabled by the rider switch.
    pub idle_stop_disabled: bool,
    /// Transmission physically in neutral.
    pub is_neutral: bool,
    /// Brake lever/pedal not held.
    pub is_brake_released: bool,
    /// Engine confirmed turning (normalized, true = running).
    pub is_engine_running: bool,
}

impl SensorSnapshot {
    /// Snapshot with every input deasserted.
    pub const IDLE: Self = Self {
        idle_stop_disabled: false,
        is_neutral: false,
        is_brake_released: false,
        is_engine_running: false,
    };
}

/// Signal-level I/O capability for the interlock.
///
/// All reads return logical values: polarity inversion of the raw wiring
/// (the engine-running line is active-low on the stock harness) is the
/// implementation's job.
///
/// # Example Implementation
///
/// ```rust,ignore
/// use eco_stop_starter::traits::VehicleIo;
///
/// struct MyBoard { /* pin handles */ }
///
/// impl VehicleIo for MyBoard {
///     type Error = ();
///
///     fn idle_stop_disabled(&mut self) -> Result<bool, ()> { Ok(read_pb0()) }
///     fn is_neutral(&mut self) -> Result<bool, ()> { Ok(read_pb1()) }
///     fn is_brake_released(&mut self) -> Result<bool, ()> { Ok(read_pb2()) }
///     fn is_engine_running(&mut self) -> Result<bool, ()> { Ok(!read_pb5()) }
///
///     fn set_neutral_signal(&mut self, in_neutral: bool) -> Result<(), ()> {
///         write_pb4(!in_neutral);
///         Ok(())
///     }
///
///     fn set_bypass_relay(&mut self, engaged: bool) -> Result<(), ()> {
///         write_pb3(engaged);
///         Ok(())
///     }
/// }
/// ```
pub trait VehicleIo {
    /// Error type for line operations.
    type Error;

    /// Returns true when the idle-stop feature is disabled.
    fn idle_stop_disabled(&mut self) -> Result<bool, Self::Error>;

    /// Returns true when the transmission is in neutral.
    fn is_neutral(&mut self) -> Result<bool, Self::Error>;

    /// Returns true when the brake is not held.
    fn is_brake_released(&mut self) -> Result<bool, Self::Error>;

    /// Returns true when the engine is running.
    fn is_engine_running(&mut self) -> Result<bool, Self::Error>;

    /// Drive the neutral signal presented to the idle-stop ECU.
    ///
    /// `true` presents "in neutral".
    fn set_neutral_signal(&mut self, in_neutral: bool) -> Result<(), Self::Error>;

    /// Engage or release the brake-held + starter-cut bypass relay.
    fn set_bypass_relay(&mut self, engaged: bool) -> Result<(), Self::Error>;

    /// Reads all four inputs back to back.
    fn snapshot(&mut self) -> Result<SensorSnapshot, Self::Error> {
        Ok(SensorSnapshot {
            idle_stop_disabled: self.idle_stop_disabled()?,
            is_neutral: self.is_neutral()?,
            is_brake_released: self.is_brake_released()?,
            is_engine_running: self.is_engine_running()?,
        })
    }
}

/// Blocking delay used for the polling interval.
///
/// This is the only suspension point in the system. Tests substitute
/// [`MockDelay`](crate::hal::MockDelay), which advances a virtual clock
/// instead of sleeping.
pub trait Delay {
    /// Block for the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

/// Monotonic time source in milliseconds.
///
/// # Example
///
/// ```rust
/// use eco_stop_starter::traits::{Clock, Delay};
/// use eco_stop_starter::hal::MockDelay;
///
/// let mut delay = MockDelay::new();
/// assert_eq!(delay.now_ms(), 0);
///
/// delay.delay_ms(100);
/// assert_eq!(delay.now_ms(), 100);
/// ```
pub trait Clock {
    /// Returns current time in milliseconds since an arbitrary epoch.
    ///
    /// Must be monotonically increasing.
    fn now_ms(&self) -> u64;
}
