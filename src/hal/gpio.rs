//! [`VehicleIo`] over `embedded-hal` digital pins.
//!
//! Works with any board whose HAL implements the `embedded-hal` 1.0
//! [`InputPin`] / [`OutputPin`] traits. Raw levels are translated through a
//! [`LinePolarity`], so the stock active-low "L" terminal and active-low ECU
//! neutral input need no special casing in the controller.
//!
//! Pin errors are reduced to [`ErrorKind`] so the six pins may come from
//! different driver types.
//!
//! # Example
//!
//! ```rust,ignore
//! use eco_stop_starter::hal::GpioIo;
//! use eco_stop_starter::LinePolarity;
//!
//! let io = GpioIo::new(
//!     disable_pin, neutral_pin, brake_pin, l_terminal_pin,
//!     neutral_out_pin, bypass_out_pin,
//!     LinePolarity::default(),
//! );
//! ```

use embedded_hal::digital::{Error, ErrorKind, InputPin, OutputPin, PinState};

use crate::config::LinePolarity;
use crate::traits::VehicleIo;

/// Vehicle lines on six GPIO pins.
pub struct GpioIo<DIS, NEU, BRK, RUN, NOUT, BOUT> {
    idle_stop_disable: DIS,
    neutral: NEU,
    brake: BRK,
    engine_running: RUN,
    neutral_out: NOUT,
    bypass_out: BOUT,
    polarity: LinePolarity,
}

impl<DIS, NEU, BRK, RUN, NOUT, BOUT> GpioIo<DIS, NEU, BRK, RUN, NOUT, BOUT>
where
    DIS: InputPin,
    NEU: InputPin,
    BRK: InputPin,
    RUN: InputPin,
    NOUT: OutputPin,
    BOUT: OutputPin,
{
    /// Wrap already-configured pins.
    ///
    /// Pin direction and pull-ups are the caller's responsibility.
    pub fn new(
        idle_stop_disable: DIS,
        neutral: NEU,
        brake: BRK,
        engine_running: RUN,
        neutral_out: NOUT,
        bypass_out: BOUT,
        polarity: LinePolarity,
    ) -> Self {
        Self {
            idle_stop_disable,
            neutral,
            brake,
            engine_running,
            neutral_out,
            bypass_out,
            polarity,
        }
    }

    /// Polarity in use.
    #[inline]
    pub fn polarity(&self) -> &LinePolarity {
        &self.polarity
    }

    /// Release the pins.
    pub fn release(self) -> (DIS, NEU, BRK, RUN, NOUT, BOUT) {
        (
            self.idle_stop_disable,
            self.neutral,
            self.brake,
            self.engine_running,
            self.neutral_out,
            self.bypass_out,
        )
    }
}

fn read<P: InputPin>(pin: &mut P) -> Result<bool, ErrorKind> {
    pin.is_high().map_err(|e| e.kind())
}

fn write<P: OutputPin>(pin: &mut P, high: bool) -> Result<(), ErrorKind> {
    pin.set_state(PinState::from(high)).map_err(|e| e.kind())
}

impl<DIS, NEU, BRK, RUN, NOUT, BOUT> VehicleIo for GpioIo<DIS, NEU, BRK, RUN, NOUT, BOUT>
where
    DIS: InputPin,
    NEU: InputPin,
    BRK: InputPin,
    RUN: InputPin,
    NOUT: OutputPin,
    BOUT: OutputPin,
{
    type Error = ErrorKind;

    fn idle_stop_disabled(&mut self) -> Result<bool, ErrorKind> {
        let high = read(&mut self.idle_stop_disable)?;
        Ok(self.polarity.idle_stop_disabled.is_asserted(high))
    }

    fn is_neutral(&mut self) -> Result<bool, ErrorKind> {
        let high = read(&mut self.neutral)?;
        Ok(self.polarity.neutral.is_asserted(high))
    }

    fn is_brake_released(&mut self) -> Result<bool, ErrorKind> {
        let high = read(&mut self.brake)?;
        Ok(self.polarity.brake_released.is_asserted(high))
    }

    fn is_engine_running(&mut self) -> Result<bool, ErrorKind> {
        let high = read(&mut self.engine_running)?;
        Ok(self.polarity.engine_running.is_asserted(high))
    }

    fn set_neutral_signal(&mut self, in_neutral: bool) -> Result<(), ErrorKind> {
        write(
            &mut self.neutral_out,
            self.polarity.neutral_out.pin_high(in_neutral),
        )
    }

    fn set_bypass_relay(&mut self, engaged: bool) -> Result<(), ErrorKind> {
        write(
            &mut self.bypass_out,
            self.polarity.bypass_out.pin_high(engaged),
        )
    }
}
