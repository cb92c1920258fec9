//! Desktop delay and clock backed by `std`.

use std::thread;
use std::time::{Duration, Instant};

use crate::traits::{Clock, Delay};

/// Real-time delay using `std::thread::sleep`.
///
/// [`Clock::now_ms`] reports milliseconds since construction.
#[derive(Debug)]
pub struct ThreadDelay {
    epoch: Instant,
}

impl ThreadDelay {
    /// Creates a delay whose clock starts now.
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for ThreadDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl Delay for ThreadDelay {
    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

impl Clock for ThreadDelay {
    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }
}
