//! GPIO bring-up for the vehicle lines.

use esp_idf_hal::gpio::{AnyIOPin, AnyInputPin, AnyOutputPin, Input, Output, PinDriver, Pull};
use esp_idf_hal::sys::EspError;

use crate::config::LinePolarity;
use crate::hal::GpioIo;

/// Vehicle lines on ESP32 pin drivers.
pub type Esp32Io<'d> = GpioIo<
    PinDriver<'d, AnyIOPin, Input>,
    PinDriver<'d, AnyIOPin, Input>,
    PinDriver<'d, AnyIOPin, Input>,
    PinDriver<'d, AnyInputPin, Input>,
    PinDriver<'d, AnyOutputPin, Output>,
    PinDriver<'d, AnyOutputPin, Output>,
>;

/// Pins to claim for the interlock.
///
/// The three switch inputs need pull-ups, hence I/O-capable pins.
pub struct Esp32Pins {
    /// Idle-stop disable switch
    pub idle_stop_disable: AnyIOPin,
    /// Neutral switch
    pub neutral: AnyIOPin,
    /// Brake switch
    pub brake: AnyIOPin,
    /// Alternator "L" terminal
    pub l_terminal: AnyInputPin,
    /// Neutral signal output
    pub neutral_out: AnyOutputPin,
    /// Bypass relay output
    pub bypass_out: AnyOutputPin,
}

/// Configure directions and pull-ups, and park the outputs.
///
/// The bypass relay is driven to released before anything else so a reset
/// mid-crank cannot leave it engaged. The neutral output is parked at
/// "not neutral" until the controller's first relay write.
///
/// # Example
///
/// ```ignore
/// use esp_idf_hal::gpio::{IOPin, InputPin, OutputPin};
/// use eco_stop_starter::hal::esp32::{init_io, Esp32Pins};
///
/// let peripherals = Peripherals::take()?;
/// let io = init_io(
///     Esp32Pins {
///         idle_stop_disable: peripherals.pins.gpio4.downgrade(),
///         neutral: peripherals.pins.gpio5.downgrade(),
///         brake: peripherals.pins.gpio6.downgrade(),
///         l_terminal: peripherals.pins.gpio7.downgrade_input(),
///         neutral_out: peripherals.pins.gpio10.downgrade_output(),
///         bypass_out: peripherals.pins.gpio3.downgrade_output(),
///     },
///     LinePolarity::default(),
/// )?;
/// ```
///
/// # Errors
///
/// Returns an error if GPIO initialization fails.
pub fn init_io<'d>(pins: Esp32Pins, polarity: LinePolarity) -> Result<Esp32Io<'d>, EspError> {
    let mut bypass_out = PinDriver::output(pins.bypass_out)?;
    drive(&mut bypass_out, polarity.bypass_out.pin_high(false))?;

    let mut neutral_out = PinDriver::output(pins.neutral_out)?;
    drive(&mut neutral_out, polarity.neutral_out.pin_high(false))?;

    let mut disable = PinDriver::input(pins.idle_stop_disable)?;
    disable.set_pull(Pull::Up)?;
    let mut neutral = PinDriver::input(pins.neutral)?;
    neutral.set_pull(Pull::Up)?;
    let mut brake = PinDriver::input(pins.brake)?;
    brake.set_pull(Pull::Up)?;

    // "L" terminal is driven by the regulator; no pull
    let l_terminal = PinDriver::input(pins.l_terminal)?;

    log::info!("GPIO configured with {:?}", polarity);

    Ok(GpioIo::new(
        disable,
        neutral,
        brake,
        l_terminal,
        neutral_out,
        bypass_out,
        polarity,
    ))
}

fn drive(pin: &mut PinDriver<'_, AnyOutputPin, Output>, high: bool) -> Result<(), EspError> {
    if high {
        pin.set_high()
    } else {
        pin.set_low()
    }
}
