//! Edge case and boundary condition tests for the interlock

use eco_stop_starter::{
    compute_neutral_output,
    hal::{MockDelay, MockVehicle},
    traits::Clock,
    CrankingOutcome, CrankingSequencer, EcoStopController, SensorSnapshot, StartDetector,
    TimingConfig,
};

// ============================================================================
// Boundary Value Tests
// ============================================================================

#[test]
fn sample_exactly_at_check_delay_counts() {
    let mut detector = StartDetector::new(TimingConfig::default());
    for _ in 0..4 {
        detector.step(true);
    }
    assert_eq!(detector.run_start_ms(), None);

    detector.step(true);
    assert_eq!(detector.elapsed_ms(), 500);
    assert_eq!(detector.run_start_ms(), Some(500));
}

#[test]
fn threshold_reached_exactly() {
    let mut detector = StartDetector::new(TimingConfig::default());
    for _ in 0..5 {
        detector.step(false);
    }
    // 600..=1000 running: 400ms held, not yet
    for _ in 0..5 {
        assert_eq!(detector.step(true), None);
    }
    assert_eq!(detector.elapsed_ms(), 1000);
    assert_eq!(detector.step(true), Some(CrankingOutcome::Started));
}

#[test]
fn drop_on_last_sample_before_threshold() {
    let mut detector = StartDetector::new(TimingConfig::default());
    for _ in 0..5 {
        detector.step(false);
    }
    for _ in 0..5 {
        detector.step(true);
    }
    // 1100ms: signal lost one tick before confirmation
    assert_eq!(detector.step(false), None);
    assert_eq!(detector.run_start_ms(), None);
}

#[test]
fn max_shorter_than_check_delay_always_times_out() {
    let timing = TimingConfig::default().with_cranking_max_ms(300);
    let mut vehicle = MockVehicle::new();
    vehicle.engine_running = true;
    let mut delay = MockDelay::new();

    let outcome = CrankingSequencer::new(timing)
        .run(&mut vehicle, &mut delay)
        .unwrap();

    assert_eq!(outcome, CrankingOutcome::TimedOut);
    assert_eq!(vehicle.engine_reads, 3);
}

#[test]
fn max_not_multiple_of_interval() {
    let timing = TimingConfig::default().with_cranking_max_ms(450);
    let mut vehicle = MockVehicle::new();
    let mut delay = MockDelay::new();

    CrankingSequencer::new(timing)
        .run(&mut vehicle, &mut delay)
        .unwrap();

    // 500ms is the first tick at or beyond 450ms
    assert_eq!(delay.calls, 5);
}

#[test]
fn literal_zero_interval_sequence_is_bounded() {
    let timing = TimingConfig {
        polling_interval_ms: 0,
        ..TimingConfig::DEFAULT
    };
    let mut vehicle = MockVehicle::new();
    let mut delay = MockDelay::new();

    let outcome = CrankingSequencer::new(timing)
        .run(&mut vehicle, &mut delay)
        .unwrap();

    // Interval treated as 1ms: one sample per millisecond up to the max
    assert_eq!(outcome, CrankingOutcome::TimedOut);
    assert_eq!(delay.calls, 4000);
    assert!(!vehicle.bypass_out);
}

#[test]
fn literal_zero_interval_controller_tick_waits() {
    let timing = TimingConfig {
        polling_interval_ms: 0,
        ..TimingConfig::DEFAULT
    };
    let mut controller =
        EcoStopController::with_timing(MockVehicle::new(), MockDelay::new(), timing);
    controller.initialize().unwrap();
    controller.tick().unwrap();

    assert_eq!(controller.timing().polling_interval_ms, 1);
    assert_eq!(controller.delay().now_ms(), 1);
}

// ============================================================================
// Implausible Inputs
// ============================================================================

#[test]
fn all_inputs_asserted_is_accepted() {
    let all = SensorSnapshot {
        idle_stop_disabled: true,
        is_neutral: true,
        is_brake_released: true,
        is_engine_running: true,
    };
    assert!(compute_neutral_output(&all));

    let mut vehicle = MockVehicle::new();
    vehicle.idle_stop_disabled = true;
    vehicle.neutral = true;
    vehicle.brake_released = true;
    vehicle.engine_running = true;
    let mut controller = EcoStopController::new(vehicle, MockDelay::new());
    controller.initialize().unwrap();

    let report = controller.tick().unwrap();
    assert_eq!(report.snapshot, all);
    assert!(report.neutral_output);
    assert!(report.armed);
    assert_eq!(report.cranking, None);
}

#[test]
fn engine_running_read_on_same_tick_as_release() {
    // Engine still turning over when the brake is released: no restart
    let mut controller = EcoStopController::new(MockVehicle::new(), MockDelay::new());
    controller.initialize().unwrap();
    controller.io_mut().engine_running = true;
    controller.io_mut().brake_released = true;

    let report = controller.tick().unwrap();

    assert!(report.brake_just_released);
    assert_eq!(report.cranking, None);
}

// ============================================================================
// Error Paths
// ============================================================================

#[test]
fn snapshot_error_leaves_state_untouched() {
    let mut controller = EcoStopController::new(MockVehicle::new(), MockDelay::new());
    controller.initialize().unwrap();
    controller.io_mut().engine_running = true;
    // Boot read was #1; fail the next tick's snapshot
    controller.io_mut().fail_engine_read_at = Some(2);

    assert!(controller.tick().is_err());
    assert!(!controller.is_armed());

    // Next tick recovers
    assert!(controller.tick().unwrap().armed);
}

#[test]
fn failed_crank_still_restores_in_gear_signal() {
    let mut controller = EcoStopController::new(MockVehicle::new(), MockDelay::new());
    controller.initialize().unwrap();
    controller.io_mut().engine_running = true;
    controller.tick().unwrap();

    controller.io_mut().engine_running = false;
    controller.io_mut().brake_released = true;
    // Reads so far: boot, first tick; #3 is this tick, #4 the first cranking sample
    controller.io_mut().fail_engine_read_at = Some(4);

    assert_eq!(controller.tick(), Err(()));
    let vehicle = controller.io();
    assert!(!vehicle.bypass_out);
    assert!(!vehicle.neutral_out);
    let n = vehicle.neutral_writes.len();
    assert_eq!(&vehicle.neutral_writes[n - 2..], &[true, false]);
}

#[test]
fn relay_write_error_after_successful_sense() {
    let mut controller = EcoStopController::new(MockVehicle::new(), MockDelay::new());
    controller.initialize().unwrap();
    controller.io_mut().engine_running = true;
    controller.io_mut().fail_writes = true;

    assert!(controller.tick().is_err());
    // Sensing happened before the failed write
    assert!(controller.is_armed());
}

#[test]
fn initialize_error_propagates() {
    let mut vehicle = MockVehicle::new();
    vehicle.fail_writes = true;
    let mut controller = EcoStopController::new(vehicle, MockDelay::new());

    assert_eq!(controller.initialize(), Err(()));
}
