//! ESP32-C3 SuperMini idle-stop interlock.
//!
//! This is the main entry point for the physical hardware controller.
//! It runs a 10Hz control loop that:
//! - Forwards the neutral switch to the idle-stop ECU (forced neutral when
//!   idle-stop is disabled)
//! - Watches for a brake release with the engine stalled
//! - Drives the bypass relay through a cranking sequence to restart
//!
//! # Build
//!
//! ```bash
//! cargo build --release --features esp32 --bin esp32_main
//! espflash flash --monitor target/riscv32imc-esp-espidf/release/esp32_main
//! ```

use eco_stop_starter::hal::esp32::{init_io, pins, Esp32Delay, Esp32Pins};
use eco_stop_starter::{EcoStopController, LinePolarity, TimingConfig};
use esp_idf_hal::gpio::{IOPin, InputPin, OutputPin};
use esp_idf_hal::peripherals::Peripherals;

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_hal::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    log::info!("eco-stop-starter v{}", env!("CARGO_PKG_VERSION"));

    let peripherals = Peripherals::take()?;

    // =========================================================================
    // Initialize Vehicle Lines
    // =========================================================================
    // Peripheral fields must match the `pins` map
    let io = init_io(
        Esp32Pins {
            idle_stop_disable: peripherals.pins.gpio4.downgrade(),
            neutral: peripherals.pins.gpio5.downgrade(),
            brake: peripherals.pins.gpio6.downgrade(),
            l_terminal: peripherals.pins.gpio7.downgrade_input(),
            neutral_out: peripherals.pins.gpio10.downgrade_output(),
            bypass_out: peripherals.pins.gpio3.downgrade_output(),
        },
        LinePolarity::default(),
    )?;
    log::info!(
        "Vehicle lines initialized: disable={} neutral={} brake={} L={} -> bypass={} neutral_out={}",
        pins::IN_DISABLE,
        pins::IN_NEUTRAL,
        pins::IN_BRAKE,
        pins::IN_L,
        pins::OUT_BYPASS,
        pins::OUT_NEUTRAL
    );

    // =========================================================================
    // Main Control Loop
    // =========================================================================
    let timing = TimingConfig::default();
    log::info!(
        "Starting control loop ({}ms tick, {}ms max crank)",
        timing.polling_interval_ms,
        timing.cranking_max_ms
    );

    let mut controller = EcoStopController::with_timing(io, Esp32Delay::new(), timing);
    controller.run()
}
