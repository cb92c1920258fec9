//! Shift-position relay from the vehicle switches to the idle-stop ECU.
//!
//! With idle-stop disabled the ECU must always see neutral, which matches
//! stock behaviour with the feature removed. Otherwise the real neutral
//! switch is passed through.

use crate::traits::{SensorSnapshot, VehicleIo};

/// Neutral signal to present to the ECU for this snapshot.
///
/// Depends only on `idle_stop_disabled` and `is_neutral`.
///
/// # Example
///
/// ```rust
/// use eco_stop_starter::{compute_neutral_output, SensorSnapshot};
///
/// let mut snapshot = SensorSnapshot::default();
/// assert!(!compute_neutral_output(&snapshot));
///
/// snapshot.idle_stop_disabled = true;
/// assert!(compute_neutral_output(&snapshot));
/// ```
#[inline]
pub const fn compute_neutral_output(snapshot: &SensorSnapshot) -> bool {
    snapshot.idle_stop_disabled || snapshot.is_neutral
}

/// Forward the shift position for `snapshot` to the ECU.
///
/// Returns the value that was written.
pub fn transfer_shift_position<IO: VehicleIo>(
    io: &mut IO,
    snapshot: &SensorSnapshot,
) -> Result<bool, IO::Error> {
    let in_neutral = compute_neutral_output(snapshot);
    io.set_neutral_signal(in_neutral)?;
    Ok(in_neutral)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::MockVehicle;

    fn all_snapshots() -> impl Iterator<Item = SensorSnapshot> {
        (0u8..16).map(|bits| SensorSnapshot {
            idle_stop_disabled: bits & 0b0001 != 0,
            is_neutral: bits & 0b0010 != 0,
            is_brake_released: bits & 0b0100 != 0,
            is_engine_running: bits & 0b1000 != 0,
        })
    }

    #[test]
    fn output_is_disabled_or_neutral() {
        for snapshot in all_snapshots() {
            assert_eq!(
                compute_neutral_output(&snapshot),
                snapshot.idle_stop_disabled || snapshot.is_neutral,
                "{snapshot:?}"
            );
        }
    }

    #[test]
    fn brake_and_engine_do_not_affect_output() {
        for snapshot in all_snapshots() {
            let mut flipped = snapshot;
            flipped.is_brake_released = !flipped.is_brake_released;
            flipped.is_engine_running = !flipped.is_engine_running;
            assert_eq!(
                compute_neutral_output(&snapshot),
                compute_neutral_output(&flipped)
            );
        }
    }

    #[test]
    fn transfer_writes_exactly_one_output() {
        let mut vehicle = MockVehicle::new();
        let snapshot = SensorSnapshot {
            is_neutral: true,
            ..SensorSnapshot::default()
        };

        let written = transfer_shift_position(&mut vehicle, &snapshot).unwrap();

        assert!(written);
        assert!(vehicle.neutral_out);
        assert_eq!(vehicle.neutral_writes, vec![true]);
        assert!(vehicle.bypass_writes.is_empty());
    }

    #[test]
    fn transfer_in_gear_presents_not_neutral() {
        let mut vehicle = MockVehicle::new();
        vehicle.neutral_out = true;

        let written = transfer_shift_position(&mut vehicle, &SensorSnapshot::IDLE).unwrap();

        assert!(!written);
        assert!(!vehicle.neutral_out);
    }

    #[test]
    fn transfer_propagates_write_error() {
        let mut vehicle = MockVehicle::new();
        vehicle.fail_writes = true;

        assert_eq!(
            transfer_shift_position(&mut vehicle, &SensorSnapshot::IDLE),
            Err(())
        );
    }
}
