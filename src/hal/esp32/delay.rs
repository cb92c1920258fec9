//! ESP32 polling delay using the FreeRTOS scheduler.

use esp_idf_hal::delay::FreeRtos;

use crate::traits::{Clock, Delay};

/// Blocking delay that yields to FreeRTOS.
///
/// Also provides millisecond time via `esp_timer_get_time()`, which returns
/// microseconds since boot.
///
/// # Example
///
/// ```ignore
/// use eco_stop_starter::hal::esp32::Esp32Delay;
/// use eco_stop_starter::traits::{Clock, Delay};
///
/// let mut delay = Esp32Delay::new();
/// let start = delay.now_ms();
/// delay.delay_ms(100);
/// let elapsed = delay.now_ms() - start;
/// ```
pub struct Esp32Delay;

impl Esp32Delay {
    /// Creates a new ESP32 delay instance.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Default for Esp32Delay {
    fn default() -> Self {
        Self::new()
    }
}

impl Delay for Esp32Delay {
    #[inline]
    fn delay_ms(&mut self, ms: u32) {
        FreeRtos::delay_ms(ms);
    }
}

impl Clock for Esp32Delay {
    #[inline]
    fn now_ms(&self) -> u64 {
        // esp_timer runs from boot and is never reset, so the count is >= 0
        let since_boot_us = unsafe { esp_idf_hal::sys::esp_timer_get_time() };
        since_boot_us.unsigned_abs() / 1000
    }
}
