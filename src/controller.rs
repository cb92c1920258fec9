//! Main interlock controller that ties everything together.
//!
//! This module provides [`EcoStopController`], which owns the only state
//! that survives between ticks:
//!
//! - the manual-start latch (armed once the engine has been seen running)
//! - the previous tick's inputs, for brake-release edge detection
//!
//! # Overview
//!
//! Every tick the controller:
//! 1. Waits one polling interval
//! 2. Samples the four inputs and latches "armed" if the engine is running
//! 3. Detects a brake-release edge
//! 4. Cranks when armed, stopped, and either the brake was just released
//!    or idle-stop is disabled
//! 5. Disarms if the engine is still not running after cranking
//! 6. Forwards the shift position to the ECU
//!
//! # Example
//!
//! ```rust
//! use eco_stop_starter::EcoStopController;
//! use eco_stop_starter::hal::{MockDelay, MockVehicle};
//!
//! let mut controller = EcoStopController::new(MockVehicle::new(), MockDelay::new());
//! controller.initialize().unwrap();
//!
//! // Engine runs: the latch arms
//! controller.io_mut().engine_running = true;
//! let report = controller.tick().unwrap();
//! assert!(report.armed);
//! assert!(report.cranking.is_none());
//!
//! // Engine stalls, rider releases the brake: manual restart
//! controller.io_mut().engine_running = false;
//! controller.io_mut().brake_released = true;
//! let report = controller.tick().unwrap();
//! assert!(report.brake_just_released);
//! assert!(report.cranking.is_some());
//! ```

use core::fmt::Debug;

use crate::config::TimingConfig;
use crate::cranking::{CrankingOutcome, CrankingSequencer};
use crate::relay;
use crate::traits::{Delay, SensorSnapshot, VehicleIo};

/// True when the brake went from held to released between two samples.
///
/// Holding the brake released produces no further edges.
#[inline]
pub const fn brake_released_edge(previous: &SensorSnapshot, current: &SensorSnapshot) -> bool {
    previous.is_brake_released != current.is_brake_released && current.is_brake_released
}

/// Main interlock controller.
///
/// # Type Parameters
///
/// - `IO`: the vehicle line implementation ([`VehicleIo`] trait)
/// - `D`: the polling wait ([`Delay`] trait)
///
/// Construct once at startup. All state is mutated only from [`tick`](Self::tick).
pub struct EcoStopController<IO: VehicleIo, D: Delay> {
    io: IO,
    delay: D,
    sequencer: CrankingSequencer,
    manual_start_armed: bool,
    previous: SensorSnapshot,
}

impl<IO: VehicleIo, D: Delay> EcoStopController<IO, D> {
    /// Create a controller with the stock timing
    pub fn new(io: IO, delay: D) -> Self {
        Self::with_timing(io, delay, TimingConfig::DEFAULT)
    }

    /// Create a controller with custom timing
    pub fn with_timing(io: IO, delay: D, timing: TimingConfig) -> Self {
        Self {
            io,
            delay,
            sequencer: CrankingSequencer::new(timing),
            manual_start_armed: false,
            previous: SensorSnapshot::IDLE,
        }
    }

    /// Boot step: seed the previous inputs and make the first relay write.
    ///
    /// Seeding from a real sample means a brake already released at power-on
    /// is not mistaken for a release edge on the first tick.
    pub fn initialize(&mut self) -> Result<SensorSnapshot, IO::Error> {
        let snapshot = self.io.snapshot()?;
        self.previous = snapshot;
        let in_neutral = relay::transfer_shift_position(&mut self.io, &snapshot)?;
        log::info!("Interlock ready: {:?}, neutral_out={}", snapshot, in_neutral);
        Ok(snapshot)
    }

    /// Run one polling tick.
    pub fn tick(&mut self) -> Result<TickReport, IO::Error> {
        self.delay.delay_ms(self.sequencer.timing().polling_interval_ms);

        let snapshot = self.io.snapshot()?;
        if snapshot.is_engine_running && !self.manual_start_armed {
            log::info!("Engine running: manual start armed");
            self.manual_start_armed = true;
        }

        let brake_just_released = brake_released_edge(&self.previous, &snapshot);
        let triggered = self.manual_start_armed
            && !snapshot.is_engine_running
            && (brake_just_released || snapshot.idle_stop_disabled);
        self.previous = snapshot;

        log::trace!(
            "Tick: {:?} edge={} armed={}",
            snapshot,
            brake_just_released,
            self.manual_start_armed
        );

        let cranking = if triggered {
            if brake_just_released {
                log::info!("Brake released with engine stopped: restarting");
            } else {
                log::info!("Idle-stop disabled with engine stopped: restarting");
            }
            Some(self.crank())
        } else {
            None
        };

        // Runs after a failed crank too; the first error wins.
        let relayed = relay::transfer_shift_position(&mut self.io, &snapshot);
        let cranking = cranking.transpose()?;
        let neutral_output = relayed?;

        Ok(TickReport {
            snapshot,
            brake_just_released,
            cranking,
            neutral_output,
            armed: self.manual_start_armed,
        })
    }

    /// Run the control loop forever.
    ///
    /// Calls [`initialize`](Self::initialize) first. Errors never stop the
    /// loop; they are logged and the next tick proceeds.
    pub fn run(&mut self) -> !
    where
        IO::Error: Debug,
    {
        if let Err(e) = self.initialize() {
            log::warn!("Initial relay write failed: {:?}", e);
        }
        loop {
            if let Err(e) = self.tick() {
                log::warn!("Tick failed: {:?}", e);
            }
        }
    }

    /// Crank, then re-check the engine and disarm if it is not running.
    fn crank(&mut self) -> Result<CrankingOutcome, IO::Error> {
        let checked = match self.sequencer.run(&mut self.io, &mut self.delay) {
            Ok(outcome) => self
                .io
                .is_engine_running()
                .map(|running| (outcome, running)),
            Err(e) => Err(e),
        };

        match checked {
            Ok((outcome, true)) => Ok(outcome),
            Ok((outcome, false)) => {
                self.disarm();
                Ok(outcome)
            }
            Err(e) => {
                self.disarm();
                Err(e)
            }
        }
    }

    fn disarm(&mut self) {
        log::info!("Engine not running after cranking: manual start disarmed");
        self.manual_start_armed = false;
    }

    /// Get the current state for diagnostics
    pub fn state(&self) -> ControllerState {
        ControllerState {
            manual_start_armed: self.manual_start_armed,
            previous_inputs: self.previous,
        }
    }

    /// Check whether a manual restart may be attempted
    pub fn is_armed(&self) -> bool {
        self.manual_start_armed
    }

    /// Timing windows in use
    pub fn timing(&self) -> &TimingConfig {
        self.sequencer.timing()
    }

    /// Borrow the I/O implementation
    pub fn io(&self) -> &IO {
        &self.io
    }

    /// Mutably borrow the I/O implementation
    pub fn io_mut(&mut self) -> &mut IO {
        &mut self.io
    }

    /// Borrow the delay implementation
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Consume the controller, returning the I/O and delay
    pub fn into_parts(self) -> (IO, D) {
        (self.io, self.delay)
    }
}

/// Persistent controller state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControllerState {
    /// Engine has been seen running since the last failed restart.
    pub manual_start_armed: bool,
    /// Inputs sampled on the previous tick.
    pub previous_inputs: SensorSnapshot,
}

/// What happened during one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    /// Inputs sampled this tick.
    pub snapshot: SensorSnapshot,
    /// Brake went from held to released since the previous tick.
    pub brake_just_released: bool,
    /// Outcome of the cranking sequence, if one ran.
    pub cranking: Option<CrankingOutcome>,
    /// Neutral signal written to the ECU at the end of the tick.
    pub neutral_output: bool,
    /// Manual-start latch after the tick.
    pub armed: bool,
}
