//! Timed cranking sequence for a manual restart.
//!
//! The interlock does not drive the starter itself. It engages the bypass
//! relay (brake held, starter cut bridged) and presents "in neutral", so the
//! vehicle's idle-stop ECU believes an auto-restart is allowed and cranks
//! the engine with its own hardware. Meanwhile the sequencer watches the
//! engine-running input:
//!
//! - readings in the first [`start_check_delay_ms`] are ignored
//! - the signal must then stay true for [`start_threshold_ms`]
//! - the whole sequence gives up after [`cranking_max_ms`]
//!
//! The bypass is released before returning, whatever the outcome.
//!
//! # Hazard
//!
//! After the bypass is released the ECU may still be cranking. Shifting to
//! neutral during that window spins the starter. Nothing here can prevent
//! that; callers must not re-trigger while it may be happening.
//!
//! # Example
//!
//! ```rust
//! use eco_stop_starter::{CrankingOutcome, CrankingSequencer, TimingConfig};
//! use eco_stop_starter::hal::{MockDelay, MockVehicle};
//! use eco_stop_starter::traits::Clock;
//!
//! let mut vehicle = MockVehicle::new();
//! let mut delay = MockDelay::new();
//! let sequencer = CrankingSequencer::new(TimingConfig::default());
//!
//! // Engine never catches
//! let outcome = sequencer.run(&mut vehicle, &mut delay).unwrap();
//! assert_eq!(outcome, CrankingOutcome::TimedOut);
//! assert_eq!(delay.now_ms(), 4000);
//! assert!(!vehicle.bypass_out);
//! ```
//!
//! [`start_check_delay_ms`]: crate::TimingConfig::start_check_delay_ms
//! [`start_threshold_ms`]: crate::TimingConfig::start_threshold_ms
//! [`cranking_max_ms`]: crate::TimingConfig::cranking_max_ms

use crate::config::TimingConfig;
use crate::traits::{Delay, VehicleIo};

/// Terminal state of one cranking sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrankingOutcome {
    /// Sustained engine-running signal observed.
    Started,
    /// Maximum duration elapsed without a sustained signal.
    TimedOut,
}

/// Debounce window over engine-running samples.
///
/// Pure timing state machine, one [`step`](Self::step) per polling tick.
/// Split out from [`CrankingSequencer`] so the windows can be checked
/// sample by sample.
///
/// # Example
///
/// ```rust
/// use eco_stop_starter::{CrankingOutcome, StartDetector, TimingConfig};
///
/// let mut detector = StartDetector::new(TimingConfig::default());
///
/// // Engine catches at 600ms and keeps running
/// for _ in 0..5 {
///     assert_eq!(detector.step(false), None);
/// }
/// for _ in 0..5 {
///     assert_eq!(detector.step(true), None);
/// }
/// assert_eq!(detector.run_start_ms(), Some(600));
/// assert_eq!(detector.step(true), Some(CrankingOutcome::Started));
/// assert_eq!(detector.elapsed_ms(), 1100);
/// ```
#[derive(Clone, Debug)]
pub struct StartDetector {
    timing: TimingConfig,
    elapsed_ms: u32,
    run_start_ms: Option<u32>,
}

impl StartDetector {
    /// Create a detector at the start of a sequence
    pub const fn new(timing: TimingConfig) -> Self {
        Self {
            timing: timing.clamped(),
            elapsed_ms: 0,
            run_start_ms: None,
        }
    }

    /// Account for one polling interval and the reading taken at its end.
    ///
    /// Returns the terminal outcome once one is reached.
    pub fn step(&mut self, engine_running: bool) -> Option<CrankingOutcome> {
        self.elapsed_ms = self
            .elapsed_ms
            .saturating_add(self.timing.polling_interval_ms);

        if self.elapsed_ms < self.timing.start_check_delay_ms || !engine_running {
            if let Some(start) = self.run_start_ms.take() {
                log::debug!(
                    "Engine signal dropped at {}ms (held since {}ms)",
                    self.elapsed_ms,
                    start
                );
            }
        } else {
            let elapsed = self.elapsed_ms;
            let start = *self.run_start_ms.get_or_insert_with(|| {
                log::debug!("Engine signal seen at {}ms", elapsed);
                elapsed
            });
            if elapsed - start >= self.timing.start_threshold_ms {
                return Some(CrankingOutcome::Started);
            }
        }

        if self.elapsed_ms >= self.timing.cranking_max_ms {
            return Some(CrankingOutcome::TimedOut);
        }
        None
    }

    /// Milliseconds since the sequence began.
    #[inline]
    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    /// When the current continuous running signal began, if any.
    #[inline]
    pub fn run_start_ms(&self) -> Option<u32> {
        self.run_start_ms
    }
}

/// Drives the bypass relay through one cranking sequence.
#[derive(Clone, Copy, Debug, Default)]
pub struct CrankingSequencer {
    timing: TimingConfig,
}

impl CrankingSequencer {
    /// Create a sequencer with the given timing
    pub const fn new(timing: TimingConfig) -> Self {
        Self {
            timing: timing.clamped(),
        }
    }

    /// Timing windows in use.
    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Run one sequence to completion.
    ///
    /// Blocks for at most `cranking_max_ms` plus one polling interval. The
    /// bypass relay is released on every path out, including I/O errors;
    /// the first error encountered is returned after the release attempt.
    pub fn run<IO, D>(&self, io: &mut IO, delay: &mut D) -> Result<CrankingOutcome, IO::Error>
    where
        IO: VehicleIo,
        D: Delay,
    {
        log::info!("Cranking: bypass engaged");

        let result = io
            .set_bypass_relay(true)
            .and_then(|()| io.set_neutral_signal(true))
            .and_then(|()| self.wait_for_start(io, delay));

        let released = io.set_bypass_relay(false);
        let outcome = result?;
        released?;

        match outcome {
            CrankingOutcome::Started => log::info!("Cranking: engine started"),
            CrankingOutcome::TimedOut => log::info!(
                "Cranking: no start within {}ms",
                self.timing.cranking_max_ms
            ),
        }
        Ok(outcome)
    }

    fn wait_for_start<IO, D>(&self, io: &mut IO, delay: &mut D) -> Result<CrankingOutcome, IO::Error>
    where
        IO: VehicleIo,
        D: Delay,
    {
        let mut detector = StartDetector::new(self.timing);
        loop {
            delay.delay_ms(self.timing.polling_interval_ms);
            let running = io.is_engine_running()?;
            log::trace!(
                "Cranking {}ms: engine_running={}",
                detector.elapsed_ms() + self.timing.polling_interval_ms,
                running
            );
            if let Some(outcome) = detector.step(running) {
                return Ok(outcome);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{MockDelay, MockVehicle};
    use crate::traits::Clock;

    /// Feed `running(t)` for t = 100, 200, ... until an outcome.
    fn detect(running: impl Fn(u32) -> bool) -> (CrankingOutcome, u32) {
        let mut detector = StartDetector::new(TimingConfig::default());
        loop {
            let t = detector.elapsed_ms() + 100;
            if let Some(outcome) = detector.step(running(t)) {
                return (outcome, detector.elapsed_ms());
            }
        }
    }

    // =========================================================================
    // StartDetector Tests
    // =========================================================================

    #[test]
    fn never_running_times_out_at_max() {
        assert_eq!(detect(|_| false), (CrankingOutcome::TimedOut, 4000));
    }

    #[test]
    fn running_from_600_starts_at_1100() {
        assert_eq!(detect(|t| t >= 600), (CrankingOutcome::Started, 1100));
    }

    #[test]
    fn flicker_restarts_window() {
        assert_eq!(
            detect(|t| (600..800).contains(&t) || t >= 900),
            (CrankingOutcome::Started, 1400)
        );
    }

    #[test]
    fn readings_inside_check_delay_are_ignored() {
        // Running from the very first sample: window opens at 500ms
        assert_eq!(detect(|_| true), (CrankingOutcome::Started, 1000));
    }

    #[test]
    fn short_blip_does_not_start() {
        assert_eq!(
            detect(|t| (1000..1400).contains(&t)),
            (CrankingOutcome::TimedOut, 4000)
        );
    }

    #[test]
    fn run_start_tracks_and_resets() {
        let mut detector = StartDetector::new(TimingConfig::default());
        for _ in 0..5 {
            detector.step(false);
        }
        assert_eq!(detector.run_start_ms(), None);

        detector.step(true);
        assert_eq!(detector.run_start_ms(), Some(600));
        detector.step(true);
        assert_eq!(detector.run_start_ms(), Some(600));

        detector.step(false);
        assert_eq!(detector.run_start_ms(), None);

        detector.step(true);
        assert_eq!(detector.run_start_ms(), Some(900));
    }

    #[test]
    fn late_start_on_final_tick_wins_over_timeout() {
        // Sustained from 3500ms reaches the threshold exactly at 4000ms
        assert_eq!(detect(|t| t >= 3500), (CrankingOutcome::Started, 4000));
    }

    #[test]
    fn zero_threshold_starts_on_first_qualifying_sample() {
        let timing = TimingConfig::default().with_start_threshold_ms(0);
        let mut detector = StartDetector::new(timing);
        for _ in 0..4 {
            assert_eq!(detector.step(true), None);
        }
        assert_eq!(detector.step(true), Some(CrankingOutcome::Started));
        assert_eq!(detector.elapsed_ms(), 500);
    }

    #[test]
    fn zero_interval_still_advances() {
        let timing = TimingConfig {
            polling_interval_ms: 0,
            ..TimingConfig::DEFAULT
        };
        let mut detector = StartDetector::new(timing);
        detector.step(false);
        assert_eq!(detector.elapsed_ms(), 1);
        assert_eq!(CrankingSequencer::new(timing).timing().polling_interval_ms, 1);
    }

    // =========================================================================
    // CrankingSequencer Tests
    // =========================================================================

    #[test]
    fn sequence_engages_then_releases_bypass() {
        let mut vehicle = MockVehicle::new();
        let mut delay = MockDelay::new();
        let sequencer = CrankingSequencer::new(TimingConfig::default());

        sequencer.run(&mut vehicle, &mut delay).unwrap();

        assert_eq!(vehicle.bypass_writes, vec![true, false]);
        assert!(!vehicle.bypass_out);
    }

    #[test]
    fn sequence_presents_neutral_while_cranking() {
        let mut vehicle = MockVehicle::new();
        let mut delay = MockDelay::new();
        let sequencer = CrankingSequencer::new(TimingConfig::default());

        sequencer.run(&mut vehicle, &mut delay).unwrap();

        // Neutral line is left asserted for the next relay write
        assert_eq!(vehicle.neutral_writes, vec![true]);
        assert!(vehicle.neutral_out);
    }

    #[test]
    fn sequence_samples_once_per_tick() {
        let mut vehicle = MockVehicle::new();
        let mut delay = MockDelay::new();
        let sequencer = CrankingSequencer::new(TimingConfig::default());

        sequencer.run(&mut vehicle, &mut delay).unwrap();

        assert_eq!(delay.calls, 40);
        assert_eq!(vehicle.engine_reads, 40);
        assert_eq!(delay.now_ms(), 4000);
    }

    #[test]
    fn read_error_still_releases_bypass() {
        let mut vehicle = MockVehicle::new();
        vehicle.fail_engine_read_at = Some(3);
        let mut delay = MockDelay::new();
        let sequencer = CrankingSequencer::new(TimingConfig::default());

        let result = sequencer.run(&mut vehicle, &mut delay);

        assert_eq!(result, Err(()));
        assert!(!vehicle.bypass_out);
        assert_eq!(vehicle.bypass_writes, vec![true, false]);
        assert_eq!(delay.now_ms(), 300);
    }
}
