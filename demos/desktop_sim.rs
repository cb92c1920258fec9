//! Desktop simulation of a stall and manual restart.
//!
//! Runs the real controller in real time (100ms ticks) against a simulated
//! motorcycle whose idle-stop ECU cranks the engine when it sees "brake
//! held, in neutral" through the bypass relay.
//!
//! # Usage
//!
//! ```sh
//! RUST_LOG=info cargo run --example desktop_sim
//! RUST_LOG=debug cargo run --example desktop_sim   # sustain-window marks
//! ```

use eco_stop_starter::hal::ThreadDelay;
use eco_stop_starter::traits::{Clock, VehicleIo};
use eco_stop_starter::EcoStopController;

/// Cranking samples before the simulated engine catches (700ms).
const CATCH_AFTER_SAMPLES: u32 = 7;

/// Simulated harness and idle-stop ECU.
#[derive(Debug, Default)]
struct SimVehicle {
    idle_stop_disabled: bool,
    neutral: bool,
    brake_released: bool,
    engine_running: bool,
    neutral_out: bool,
    bypass_out: bool,
    cranking_samples: u32,
}

impl SimVehicle {
    /// The ECU only cranks while it believes the brake is held in neutral.
    fn ecu_cranking(&self) -> bool {
        self.bypass_out && self.neutral_out && !self.engine_running
    }
}

impl VehicleIo for SimVehicle {
    type Error = core::convert::Infallible;

    fn idle_stop_disabled(&mut self) -> Result<bool, Self::Error> {
        Ok(self.idle_stop_disabled)
    }

    fn is_neutral(&mut self) -> Result<bool, Self::Error> {
        Ok(self.neutral)
    }

    fn is_brake_released(&mut self) -> Result<bool, Self::Error> {
        Ok(self.brake_released)
    }

    fn is_engine_running(&mut self) -> Result<bool, Self::Error> {
        if self.ecu_cranking() {
            self.cranking_samples += 1;
            if self.cranking_samples >= CATCH_AFTER_SAMPLES {
                self.engine_running = true;
            }
        }
        Ok(self.engine_running)
    }

    fn set_neutral_signal(&mut self, in_neutral: bool) -> Result<(), Self::Error> {
        self.neutral_out = in_neutral;
        Ok(())
    }

    fn set_bypass_relay(&mut self, engaged: bool) -> Result<(), Self::Error> {
        if !engaged {
            self.cranking_samples = 0;
        }
        self.bypass_out = engaged;
        Ok(())
    }
}

/// One scripted rider action applied before a tick.
enum Action {
    Wait,
    EngineOn,
    Stall,
    HoldBrake,
    ReleaseBrake,
    ShiftNeutral(bool),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let script = [
        Action::EngineOn,
        Action::Wait,
        Action::HoldBrake,
        Action::ShiftNeutral(true),
        Action::ShiftNeutral(false),
        Action::Stall,
        Action::Wait,
        Action::ReleaseBrake,
        Action::Wait,
        Action::Wait,
        Action::HoldBrake,
        Action::Wait,
    ];

    let mut controller = EcoStopController::new(SimVehicle::default(), ThreadDelay::new());
    let boot = controller.initialize().unwrap_or_else(|e| match e {});
    log::info!("Boot inputs: {:?}", boot);

    for action in script {
        let vehicle = controller.io_mut();
        match action {
            Action::Wait => {}
            Action::EngineOn => vehicle.engine_running = true,
            Action::Stall => {
                log::info!("-- engine stalls");
                vehicle.engine_running = false;
            }
            Action::HoldBrake => vehicle.brake_released = false,
            Action::ReleaseBrake => {
                log::info!("-- rider releases the brake");
                vehicle.brake_released = true;
            }
            Action::ShiftNeutral(neutral) => vehicle.neutral = neutral,
        }

        let report = controller.tick().unwrap_or_else(|e| match e {});
        log::info!(
            "[{:>5}ms] engine={} armed={} neutral_out={} cranking={:?}",
            controller.delay().now_ms(),
            report.snapshot.is_engine_running,
            report.armed,
            report.neutral_output,
            report.cranking
        );
    }
}
