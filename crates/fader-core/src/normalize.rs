//! Value normalization for the volume knob
//!
//! The potentiometer hangs off a 3.3 V divider read through the ADC, and
//! the raw voltage is noisy at both ends of the travel: a fully-closed knob
//! hovers a little above zero and a fully-open one a little under (or
//! occasionally over) the rail. The calibration thresholds snap those
//! regions to exact 0 % and 100 % so the extremes stay reachable.
//!
//! All functions here are pure; the calibration constants live in the
//! config so different boards can tune them.

use crate::config::CalibrationConfig;

/// Clamp an arbitrary reading into the 0-100 percent range.
pub fn clamp_percent(value: i32) -> u8 {
    value.clamp(0, 100) as u8
}

/// Convert a raw single-ended ADC reading to volts.
pub fn volts_from_raw(raw: u16, calibration: &CalibrationConfig) -> f32 {
    raw as f32 * calibration.full_scale_volts / 32767.0
}

/// Convert a knob voltage to a volume percent, applying the end-of-travel
/// snapping before scaling against the reference rail.
pub fn percent_from_volts(volts: f32, calibration: &CalibrationConfig) -> u8 {
    let volts = if volts > calibration.ceiling_volts {
        calibration.reference_volts
    } else if volts < calibration.floor_volts {
        0.0
    } else {
        volts
    };
    clamp_percent((volts / calibration.reference_volts * 100.0).round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_bounds() {
        assert_eq!(clamp_percent(-5), 0);
        assert_eq!(clamp_percent(0), 0);
        assert_eq!(clamp_percent(42), 42);
        assert_eq!(clamp_percent(100), 100);
        assert_eq!(clamp_percent(150), 100);
    }

    #[test]
    fn test_clamp_idempotent() {
        for value in -20..=220 {
            let once = clamp_percent(value);
            assert_eq!(clamp_percent(once as i32), once);
        }
    }

    #[test]
    fn test_floor_snaps_to_mute() {
        let cal = CalibrationConfig::default();
        assert_eq!(percent_from_volts(0.005, &cal), 0);
        assert_eq!(percent_from_volts(0.0, &cal), 0);
    }

    #[test]
    fn test_ceiling_snaps_to_full() {
        let cal = CalibrationConfig::default();
        // Readings above the ceiling, including over-rail ones, hit 100
        assert_eq!(percent_from_volts(3.26, &cal), 100);
        assert_eq!(percent_from_volts(3.4, &cal), 100);
    }

    #[test]
    fn test_midpoint_scales_linearly() {
        let cal = CalibrationConfig::default();
        assert_eq!(percent_from_volts(1.65, &cal), 50);
        assert_eq!(percent_from_volts(0.33, &cal), 10);
    }

    #[test]
    fn test_volts_from_raw_full_scale() {
        let cal = CalibrationConfig::default();
        assert!((volts_from_raw(32767, &cal) - cal.full_scale_volts).abs() < 1e-4);
        assert_eq!(volts_from_raw(0, &cal), 0.0);
    }
}
