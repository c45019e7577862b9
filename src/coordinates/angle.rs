//! # Angle Normalization Module
//!
//! Every hour-valued quantity in this crate (right ascension, hour angle,
//! sidereal time) lives in `[0, 24)` and every azimuth-like angle in
//! `[0, 360)`. The helpers here are the only place where that wrapping happens.
//!
//! ## Floored Modulo
//!
//! Wrapping uses floored modulo (`rem_euclid`), not truncating `%`, so that
//! negative inputs wrap forward: `-1h` becomes `23h`, `-30°` becomes `330°`.
//! A second application never changes the value:
//!
//! ```rust
//! use skywatch::coordinates::angle::normalize_hours;
//!
//! let once = normalize_hours(-1.0);
//! assert_eq!(once, 23.0);
//! assert_eq!(normalize_hours(once), once);
//! ```

use crate::constants::{DEG360, DEG_PER_HOUR, HOURS_PER_DAY};

/// Wraps a value into `[0, period)`.
///
/// `rem_euclid` can return exactly `period` when `value` is a tiny negative
/// number that rounds up; that case is folded back to zero.
fn wrap(value: f64, period: f64) -> f64 {
    let wrapped = value.rem_euclid(period);
    if wrapped >= period {
        0.0
    } else {
        wrapped
    }
}

/// Normalizes hours into `[0, 24)`.
pub fn normalize_hours(hours: f64) -> f64 {
    wrap(hours, HOURS_PER_DAY)
}

/// Normalizes degrees into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    wrap(degrees, DEG360)
}

/// Wraps hours into `[-12, 12)`, the signed offset from the meridian.
///
/// Negative values are east of the meridian (rising), positive values west.
pub fn wrap_signed_hours(hours: f64) -> f64 {
    let h = normalize_hours(hours);
    if h >= HOURS_PER_DAY / 2.0 {
        h - HOURS_PER_DAY
    } else {
        h
    }
}

/// Clamps a sine or cosine into `[-1, 1]` before it is fed to `asin`/`acos`.
///
/// NaN is returned unchanged. Non-finite coordinates are rejected by
/// `Equatorial::try_new`, and `rise_transit_set` reports them as
/// `HorizonStatus::Undefined`.
pub fn clamp_unit(value: f64) -> f64 {
    value.clamp(-1.0, 1.0)
}

/// Converts hours of arc to radians.
pub fn hours_to_radians(hours: f64) -> f64 {
    (hours * DEG_PER_HOUR).to_radians()
}

/// Converts degrees to hours of arc.
pub fn degrees_to_hours(degrees: f64) -> f64 {
    degrees / DEG_PER_HOUR
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;
    use rstest::rstest;
    use std::f64::consts::PI;

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(23.5, 23.5)]
    #[case(24.0, 0.0)]
    #[case(25.5, 1.5)]
    #[case(-1.0, 23.0)]
    #[case(-24.0, 0.0)]
    #[case(-49.0, 23.0)]
    fn test_normalize_hours(#[case] input: f64, #[case] expected: f64) {
        assert_abs_diff_eq!(normalize_hours(input), expected, epsilon = 1e-12);
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(360.0, 0.0)]
    #[case(-30.0, 330.0)]
    #[case(725.0, 5.0)]
    #[case(-720.0, 0.0)]
    fn test_normalize_degrees(#[case] input: f64, #[case] expected: f64) {
        assert_abs_diff_eq!(normalize_degrees(input), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_tiny_negative_does_not_reach_period() {
        let h = normalize_hours(-1e-18);
        assert!((0.0..24.0).contains(&h), "got {h}");
        let d = normalize_degrees(-1e-18);
        assert!((0.0..360.0).contains(&d), "got {d}");
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(11.0, 11.0)]
    #[case(12.0, -12.0)]
    #[case(13.0, -11.0)]
    #[case(-3.0, -3.0)]
    #[case(23.0, -1.0)]
    fn test_wrap_signed_hours(#[case] input: f64, #[case] expected: f64) {
        assert_abs_diff_eq!(wrap_signed_hours(input), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_clamp_unit() {
        assert_eq!(clamp_unit(1.000_000_000_1), 1.0);
        assert_eq!(clamp_unit(-1.000_000_000_1), -1.0);
        assert_eq!(clamp_unit(0.25), 0.25);
        assert!(clamp_unit(f64::NAN).is_nan());
    }

    #[test]
    fn test_hour_conversions() {
        assert_abs_diff_eq!(hours_to_radians(12.0), PI, epsilon = 1e-15);
        assert_abs_diff_eq!(hours_to_radians(6.0), PI / 2.0, epsilon = 1e-15);
        assert_abs_diff_eq!(degrees_to_hours(90.0), 6.0, epsilon = 1e-15);
    }

    proptest! {
        #[test]
        fn prop_normalize_hours_range(hours in -1e6..1e6f64) {
            let h = normalize_hours(hours);
            prop_assert!((0.0..24.0).contains(&h));
        }

        #[test]
        fn prop_normalize_hours_idempotent(hours in -1e6..1e6f64) {
            let once = normalize_hours(hours);
            prop_assert_eq!(normalize_hours(once), once);
        }

        #[test]
        fn prop_normalize_degrees_idempotent(degrees in -1e7..1e7f64) {
            let once = normalize_degrees(degrees);
            prop_assert!((0.0..360.0).contains(&once));
            prop_assert_eq!(normalize_degrees(once), once);
        }

        #[test]
        fn prop_wrap_signed_range(hours in -1e6..1e6f64) {
            let h = wrap_signed_hours(hours);
            prop_assert!((-12.0..12.0).contains(&h));
        }
    }
}
