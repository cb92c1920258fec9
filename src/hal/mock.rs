//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for the hardware traits, enabling
//! development and testing on desktop without a vehicle.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockVehicle`] | [`VehicleIo`] | Settable inputs, scripted engine signal, recorded writes |
//! | [`MockDelay`] | [`Delay`], [`Clock`] | Virtual clock that advances instantly |
//!
//! # Example
//!
//! ```rust
//! use eco_stop_starter::{CrankingOutcome, CrankingSequencer, TimingConfig};
//! use eco_stop_starter::hal::{MockDelay, MockVehicle};
//! use eco_stop_starter::traits::Clock;
//!
//! let mut vehicle = MockVehicle::new();
//! // ECU gets the engine going on the 6th sample of cranking (600ms)
//! vehicle.starts_after_reads(6);
//!
//! let mut delay = MockDelay::new();
//! let outcome = CrankingSequencer::new(TimingConfig::default())
//!     .run(&mut vehicle, &mut delay)
//!     .unwrap();
//!
//! assert_eq!(outcome, CrankingOutcome::Started);
//! assert_eq!(delay.now_ms(), 1100);
//! ```
//!
//! [`VehicleIo`]: crate::traits::VehicleIo
//! [`Delay`]: crate::traits::Delay
//! [`Clock`]: crate::traits::Clock

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::traits::{Clock, Delay, VehicleIo};

/// Mock vehicle wiring for testing.
///
/// Inputs are plain public fields. The engine-running input can also be
/// scripted: queued readings are returned first (FIFO), then the
/// [`engine_running`](Self::engine_running) field. Every output write is
/// recorded.
///
/// # Example
///
/// ```rust
/// use eco_stop_starter::hal::MockVehicle;
/// use eco_stop_starter::traits::VehicleIo;
///
/// let mut vehicle = MockVehicle::new();
/// vehicle.queue_engine_readings(&[true, false]);
///
/// assert!(vehicle.is_engine_running().unwrap());
/// assert!(!vehicle.is_engine_running().unwrap());
/// assert!(!vehicle.is_engine_running().unwrap()); // falls back to the field
///
/// vehicle.set_bypass_relay(true).unwrap();
/// assert_eq!(vehicle.bypass_writes, vec![true]);
/// ```
#[derive(Debug, Default)]
pub struct MockVehicle {
    /// Idle-stop disable switch.
    pub idle_stop_disabled: bool,
    /// Neutral switch.
    pub neutral: bool,
    /// Brake switch (true = released).
    pub brake_released: bool,
    /// Engine-running input once the script is exhausted.
    pub engine_running: bool,
    /// Current neutral signal output.
    pub neutral_out: bool,
    /// Current bypass relay output.
    pub bypass_out: bool,
    /// Every value written to the neutral signal output.
    pub neutral_writes: Vec<bool>,
    /// Every value written to the bypass relay output.
    pub bypass_writes: Vec<bool>,
    /// Number of engine-running reads so far.
    pub engine_reads: usize,
    /// Engine-running reads taken while the bypass relay was engaged.
    pub engine_reads_bypassed: usize,
    /// Fail the engine-running read with this 1-based index.
    pub fail_engine_read_at: Option<usize>,
    /// Fail every output write.
    pub fail_writes: bool,
    engine_script: VecDeque<bool>,
    start_after: Option<usize>,
}

impl MockVehicle {
    /// Creates a mock with every input deasserted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue engine-running readings to be returned in order
    pub fn queue_engine_readings(&mut self, readings: &[bool]) {
        self.engine_script.extend(readings.iter().copied());
    }

    /// Number of scripted readings not yet consumed
    pub fn pending_engine_readings(&self) -> usize {
        self.engine_script.len()
    }

    /// Simulate the ECU catching the engine.
    ///
    /// Once `reads` engine-running samples have been taken with the bypass
    /// engaged, [`engine_running`](Self::engine_running) latches true. The
    /// sample that reaches the count already reads running.
    pub fn starts_after_reads(&mut self, reads: usize) {
        self.start_after = Some(reads);
    }
}

impl VehicleIo for MockVehicle {
    type Error = ();

    fn idle_stop_disabled(&mut self) -> Result<bool, ()> {
        Ok(self.idle_stop_disabled)
    }

    fn is_neutral(&mut self) -> Result<bool, ()> {
        Ok(self.neutral)
    }

    fn is_brake_released(&mut self) -> Result<bool, ()> {
        Ok(self.brake_released)
    }

    fn is_engine_running(&mut self) -> Result<bool, ()> {
        self.engine_reads += 1;
        if self.bypass_out {
            self.engine_reads_bypassed += 1;
        }
        if self.fail_engine_read_at == Some(self.engine_reads) {
            return Err(());
        }

        if self.bypass_out {
            if let Some(after) = self.start_after {
                if self.engine_reads_bypassed >= after {
                    self.engine_running = true;
                    self.start_after = None;
                }
            }
        }

        Ok(self
            .engine_script
            .pop_front()
            .unwrap_or(self.engine_running))
    }

    fn set_neutral_signal(&mut self, in_neutral: bool) -> Result<(), ()> {
        if self.fail_writes {
            return Err(());
        }
        self.neutral_out = in_neutral;
        self.neutral_writes.push(in_neutral);
        Ok(())
    }

    fn set_bypass_relay(&mut self, engaged: bool) -> Result<(), ()> {
        if self.fail_writes {
            return Err(());
        }
        self.bypass_out = engaged;
        self.bypass_writes.push(engaged);
        Ok(())
    }
}

/// Mock delay with a virtual clock.
///
/// `delay_ms` returns immediately and advances the clock, so timing tests
/// run without sleeping.
///
/// # Example
///
/// ```rust
/// use eco_stop_starter::hal::MockDelay;
/// use eco_stop_starter::traits::{Clock, Delay};
///
/// let mut delay = MockDelay::new();
/// delay.delay_ms(100);
/// delay.delay_ms(250);
///
/// assert_eq!(delay.now_ms(), 350);
/// assert_eq!(delay.calls, 2);
/// ```
#[derive(Debug, Default)]
pub struct MockDelay {
    elapsed_ms: u64,
    /// Number of times `delay_ms` was called.
    pub calls: usize,
}

impl MockDelay {
    /// Creates a new mock delay at 0ms.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Delay for MockDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.elapsed_ms += u64::from(ms);
        self.calls += 1;
    }
}

impl Clock for MockDelay {
    fn now_ms(&self) -> u64 {
        self.elapsed_ms
    }
}
