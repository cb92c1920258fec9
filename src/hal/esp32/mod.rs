//! ESP32-C3 SuperMini hardware abstraction layer for the interlock.
//!
//! This module wires the vehicle harness to an ESP32-C3 SuperMini through
//! opto-isolated inputs and a relay driver.
//!
//! # Hardware Configuration
//!
//! - **MCU**: ESP32-C3 SuperMini (RISC-V 160MHz, 4MB Flash)
//! - **Inputs**: idle-stop disable switch, neutral switch, brake switch,
//!   alternator "L" terminal (all 12V, level-shifted)
//! - **Outputs**: neutral signal to the idle-stop ECU, bypass relay coil
//!   (via low-side driver)
//!
//! # Pin Assignments
//!
//! See the [`pins`] module for GPIO assignments matching the SuperMini layout.

mod delay;
mod io;

pub use delay::Esp32Delay;
pub use io::{init_io, Esp32Io, Esp32Pins};

/// Pin assignments for SuperMini ESP32-C3.
///
/// Strapping pins (GPIO2, 8, 9) are avoided so the relay cannot chatter
/// during boot.
pub mod pins {
    // =========================================================================
    // Inputs
    // =========================================================================

    /// Idle-stop disable switch (pulled up, high = disabled)
    pub const IN_DISABLE: i32 = 4;

    /// Neutral switch (pulled up, high = neutral)
    pub const IN_NEUTRAL: i32 = 5;

    /// Brake switch (pulled up, high = released)
    pub const IN_BRAKE: i32 = 6;

    /// Alternator "L" terminal (low = engine running, no pull-up)
    pub const IN_L: i32 = 7;

    // =========================================================================
    // Outputs
    // =========================================================================

    /// Brake + starter-cut bypass relay (high = engaged)
    pub const OUT_BYPASS: i32 = 3;

    /// Neutral signal to the idle-stop ECU (low = neutral)
    pub const OUT_NEUTRAL: i32 = 10;
}
