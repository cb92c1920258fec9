//! Compile-time configuration: timing windows and raw line polarities.
//!
//! Nothing here is adjustable at runtime. A [`TimingConfig`] is handed to
//! the controller at construction and stays fixed for the life of the loop.
//! The defaults are empirical values from the stock hardware and should not
//! change without a reason rooted in the vehicle.
//!
//! # Example
//!
//! ```rust
//! use eco_stop_starter::config::{TimingConfig, POLLING_INTERVAL_MS};
//!
//! // Use defaults
//! let timing = TimingConfig::default();
//! assert_eq!(timing.polling_interval_ms, POLLING_INTERVAL_MS);
//!
//! // Or customize (bench rigs with a slower starter, for instance)
//! let timing = TimingConfig::default().with_cranking_max_ms(6000);
//! assert_eq!(timing.cranking_max_ms, 6000);
//! ```

/// Polling interval of both the main loop and the cranking sub-loop (ms).
pub const POLLING_INTERVAL_MS: u32 = 100;

/// Maximum time to wait for the engine to start while cranking (ms).
pub const CRANKING_MAX_TIME_MS: u32 = 4000;

/// Time after cranking begins before engine-running readings count (ms).
pub const START_CHECK_DELAY_TIME_MS: u32 = 500;

/// Continuous engine-running time required to confirm a start (ms).
pub const START_THRESHOLD_TIME_MS: u32 = 500;

// ============================================================================
// Timing
// ============================================================================

/// Timing windows for the polling loop and cranking sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimingConfig {
    /// Wait between ticks, in milliseconds.
    pub polling_interval_ms: u32,
    /// Upper bound on a cranking sequence, in milliseconds.
    pub cranking_max_ms: u32,
    /// Readings before this point in a sequence are ignored.
    pub start_check_delay_ms: u32,
    /// Sustained running time that confirms a start.
    pub start_threshold_ms: u32,
}

impl TimingConfig {
    /// The stock timing.
    pub const DEFAULT: Self = Self {
        polling_interval_ms: POLLING_INTERVAL_MS,
        cranking_max_ms: CRANKING_MAX_TIME_MS,
        start_check_delay_ms: START_CHECK_DELAY_TIME_MS,
        start_threshold_ms: START_THRESHOLD_TIME_MS,
    };

    /// Set the polling interval (clamped to at least 1ms)
    pub const fn with_polling_interval_ms(mut self, ms: u32) -> Self {
        self.polling_interval_ms = if ms == 0 { 1 } else { ms };
        self
    }

    /// Set the maximum cranking duration
    pub const fn with_cranking_max_ms(mut self, ms: u32) -> Self {
        self.cranking_max_ms = ms;
        self
    }

    /// Set the start-check delay
    pub const fn with_start_check_delay_ms(mut self, ms: u32) -> Self {
        self.start_check_delay_ms = ms;
        self
    }

    /// Set the sustained-running threshold
    pub const fn with_start_threshold_ms(mut self, ms: u32) -> Self {
        self.start_threshold_ms = ms;
        self
    }

    /// Same windows with the polling interval raised to at least 1ms.
    ///
    /// Struct literals skip the builder clamp; sequencers and detectors
    /// store the result of this instead.
    pub(crate) const fn clamped(self) -> Self {
        self.with_polling_interval_ms(self.polling_interval_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ============================================================================
// Line polarity
// ============================================================================

/// Electrical level at which a line is considered asserted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// Asserted when the pin is high.
    ActiveHigh,
    /// Asserted when the pin is low.
    ActiveLow,
}

impl Level {
    /// Convert a raw pin level to the logical value.
    #[inline]
    pub const fn is_asserted(self, pin_high: bool) -> bool {
        match self {
            Level::ActiveHigh => pin_high,
            Level::ActiveLow => !pin_high,
        }
    }

    /// Raw pin level that represents `asserted`.
    #[inline]
    pub const fn pin_high(self, asserted: bool) -> bool {
        match self {
            Level::ActiveHigh => asserted,
            Level::ActiveLow => !asserted,
        }
    }
}

/// Polarity of each of the six lines.
///
/// Defaults match the stock harness: the disable switch, neutral switch and
/// brake switch are pulled up and read high when asserted, the alternator
/// "L" terminal pulls low while the engine runs, the ECU reads neutral when
/// its input is pulled low, and the bypass relay coil is driven high.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinePolarity {
    /// Idle-stop disable switch input
    pub idle_stop_disabled: Level,
    /// Neutral switch input
    pub neutral: Level,
    /// Brake switch input (asserted = released)
    pub brake_released: Level,
    /// Engine-running ("L" terminal) input
    pub engine_running: Level,
    /// Neutral signal output to the idle-stop ECU
    pub neutral_out: Level,
    /// Brake + starter-cut bypass relay output
    pub bypass_out: Level,
}

impl LinePolarity {
    /// Stock harness polarities.
    pub const DEFAULT: Self = Self {
        idle_stop_disabled: Level::ActiveHigh,
        neutral: Level::ActiveHigh,
        brake_released: Level::ActiveHigh,
        engine_running: Level::ActiveLow,
        neutral_out: Level::ActiveLow,
        bypass_out: Level::ActiveHigh,
    };

    /// Set the engine-running input polarity
    pub const fn with_engine_running(mut self, level: Level) -> Self {
        self.engine_running = level;
        self
    }

    /// Set the neutral output polarity
    pub const fn with_neutral_out(mut self, level: Level) -> Self {
        self.neutral_out = level;
        self
    }

    /// Set the bypass relay output polarity
    pub const fn with_bypass_out(mut self, level: Level) -> Self {
        self.bypass_out = level;
        self
    }
}

impl Default for LinePolarity {
    fn default() -> Self {
        Self::DEFAULT
    }
}
