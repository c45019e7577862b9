//! Time module for sidereal time calculations
//!
//! This module provides an immutable UTC instant, its Julian Date, and the
//! Greenwich and local mean sidereal times derived from it. Every operation
//! returns a new value; nothing here mutates an instant in place.

use crate::constants::{
    DAY_MS, DEG_PER_HOUR, GMST_J2000_DEG, GMST_RATE_DEG_PER_DAY, GMST_T2_DEG, GMST_T3_DIVISOR,
    HOUR_MS, J2000, JULIAN_CENTURY_DAYS, UNIX_EPOCH_JD,
};
use crate::coordinates::angle::{normalize_degrees, normalize_hours};
use chrono::{DateTime, Duration, NaiveTime, SecondsFormat, TimeZone, Utc};
use std::fmt;
use std::ops::{Add, Sub};
use thiserror::Error;

/// Error type for time operations
#[derive(Debug, Error)]
pub enum TimeError {
    #[error("Time out of range: {0}")]
    OutOfRange(String),

    #[error("Parsing error: {0}")]
    ParseError(String),
}

/// Result type for time operations
pub type Result<T> = std::result::Result<T, TimeError>;

/// An instant on the UTC time axis
///
/// `Time` is a plain value: it is `Copy`, and every derived instant
/// (start of day, offsets) is a fresh value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time {
    utc: DateTime<Utc>,
}

impl Time {
    /// Earliest representable instant
    pub const MIN: Time = Time {
        utc: DateTime::<Utc>::MIN_UTC,
    };

    /// Latest representable instant
    pub const MAX: Time = Time {
        utc: DateTime::<Utc>::MAX_UTC,
    };

    /// Create a new time from a UTC datetime
    pub fn new(utc: DateTime<Utc>) -> Self {
        Self { utc }
    }

    /// Get the current time
    pub fn now() -> Self {
        Self::new(Utc::now())
    }

    /// Create a time from milliseconds since the Unix epoch
    pub fn from_epoch_millis(millis: i64) -> Result<Self> {
        Utc.timestamp_millis_opt(millis)
            .single()
            .map(Self::new)
            .ok_or_else(|| TimeError::OutOfRange(format!("epoch millis {millis}")))
    }

    /// Create a time from a UTC Julian Date, rounded to the nearest millisecond
    pub fn from_julian_date(jd: f64) -> Result<Self> {
        let millis = ((jd - UNIX_EPOCH_JD) * DAY_MS).round();
        if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
            return Err(TimeError::OutOfRange(format!("Julian date {jd}")));
        }
        Self::from_epoch_millis(millis as i64)
    }

    /// Parse an RFC 3339 timestamp such as `2024-03-20T12:00:00Z`
    pub fn parse_rfc3339(s: &str) -> Result<Self> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self::new(dt.with_timezone(&Utc)))
            .map_err(|e| TimeError::ParseError(format!("{s}: {e}")))
    }

    /// Get the UTC datetime
    pub fn utc_datetime(&self) -> DateTime<Utc> {
        self.utc
    }

    /// Milliseconds since the Unix epoch
    pub fn epoch_millis(&self) -> i64 {
        self.utc.timestamp_millis()
    }

    /// Get the Julian Date
    ///
    /// `JD = epoch_millis / 86_400_000 + 2440587.5`
    pub fn julian_date(&self) -> f64 {
        self.epoch_millis() as f64 / DAY_MS + UNIX_EPOCH_JD
    }

    /// A new instant at 00:00:00 UTC on the same calendar date
    pub fn start_of_day(&self) -> Self {
        let midnight = self.utc.date_naive().and_time(NaiveTime::MIN);
        Self::new(Utc.from_utc_datetime(&midnight))
    }

    /// A new instant offset by a (possibly negative, fractional) number of hours.
    ///
    /// Saturates at [`Time::MIN`] / [`Time::MAX`]; a non-finite offset leaves
    /// the instant unchanged. Use [`Time::checked_add_hours`] to detect either.
    pub fn add_hours(&self, hours: f64) -> Self {
        match hours_to_duration(hours) {
            Some(duration) => *self + duration,
            None if hours.is_nan() => *self,
            None if hours < 0.0 => Self::MIN,
            None => Self::MAX,
        }
    }

    /// Like [`Time::add_hours`], but `None` when the offset is not finite or the
    /// result falls outside the representable calendar range
    pub fn checked_add_hours(&self, hours: f64) -> Option<Self> {
        let duration = hours_to_duration(hours)?;
        self.utc.checked_add_signed(duration).map(Self::new)
    }

    /// Greenwich mean sidereal time at this instant
    pub fn gmst(&self) -> SiderealTime {
        greenwich_sidereal_time(self)
    }

    /// Local mean sidereal time at this instant for an east-positive longitude
    pub fn local_sidereal_time(&self, longitude_deg: f64) -> SiderealTime {
        local_sidereal_time(self, longitude_deg)
    }
}

/// Converts fractional hours into a millisecond-resolution duration,
/// or `None` for non-finite or out-of-range offsets
pub fn hours_to_duration(hours: f64) -> Option<Duration> {
    let millis = (hours * HOUR_MS).round();
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return None;
    }
    Duration::try_milliseconds(millis as i64)
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.utc.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl Add<Duration> for Time {
    type Output = Time;

    /// Saturates at [`Time::MIN`] / [`Time::MAX`] instead of overflowing
    fn add(self, duration: Duration) -> Self::Output {
        match self.utc.checked_add_signed(duration) {
            Some(utc) => Time::new(utc),
            None if duration < Duration::zero() => Time::MIN,
            None => Time::MAX,
        }
    }
}

impl Sub<Duration> for Time {
    type Output = Time;

    /// Saturates at [`Time::MIN`] / [`Time::MAX`] instead of overflowing
    fn sub(self, duration: Duration) -> Self::Output {
        match self.utc.checked_sub_signed(duration) {
            Some(utc) => Time::new(utc),
            None if duration < Duration::zero() => Time::MAX,
            None => Time::MIN,
        }
    }
}

impl Sub<Time> for Time {
    type Output = Duration;

    fn sub(self, other: Time) -> Self::Output {
        self.utc - other.utc
    }
}

impl From<DateTime<Utc>> for Time {
    fn from(dt: DateTime<Utc>) -> Self {
        Time::new(dt)
    }
}

/// Sidereal time in hours, always within `[0, 24)`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SiderealTime {
    hours: f64,
}

impl SiderealTime {
    pub fn from_hours(hours: f64) -> Self {
        Self {
            hours: normalize_hours(hours),
        }
    }

    pub fn from_degrees(degrees: f64) -> Self {
        Self::from_hours(degrees / DEG_PER_HOUR)
    }

    pub fn hours(&self) -> f64 {
        self.hours
    }

    pub fn degrees(&self) -> f64 {
        self.hours * DEG_PER_HOUR
    }

    pub fn radians(&self) -> f64 {
        self.degrees().to_radians()
    }
}

impl fmt::Display for SiderealTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}h", self.hours)
    }
}

/// Julian centuries elapsed since J2000.0
pub fn julian_centuries(jd: f64) -> f64 {
    (jd - J2000) / JULIAN_CENTURY_DAYS
}

/// Greenwich mean sidereal time in degrees, `[0, 360)`
///
/// IAU 1982 expression evaluated directly in degrees:
/// `280.46061837 + 360.98564736629·d + 0.000387933·T² − T³/38710000`
/// with `d = JD − 2451545.0` and `T = d / 36525`.
pub fn gmst_degrees(jd: f64) -> f64 {
    let d = jd - J2000;
    let t = julian_centuries(jd);
    normalize_degrees(
        GMST_J2000_DEG + GMST_RATE_DEG_PER_DAY * d + GMST_T2_DEG * t * t
            - t * t * t / GMST_T3_DIVISOR,
    )
}

/// Greenwich mean sidereal time in hours, `[0, 24)`
pub fn gmst_hours(jd: f64) -> f64 {
    normalize_hours(gmst_degrees(jd) / DEG_PER_HOUR)
}

/// Greenwich mean sidereal time at an instant
pub fn greenwich_sidereal_time(time: &Time) -> SiderealTime {
    SiderealTime::from_hours(gmst_hours(time.julian_date()))
}

/// Local mean sidereal time for an east-positive longitude in degrees
///
/// East longitudes run ahead of Greenwich: `LST = GMST + longitude / 15`.
pub fn local_sidereal_time(time: &Time, longitude_deg: f64) -> SiderealTime {
    SiderealTime::from_hours(gmst_hours(time.julian_date()) + longitude_deg / DEG_PER_HOUR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::angle::wrap_signed_hours;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use chrono::TimeZone;
    use proptest::prelude::*;
    use rstest::rstest;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Time {
        Time::new(Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap())
    }

    #[test]
    fn test_julian_date_unix_epoch() {
        let t = Time::from_epoch_millis(0).unwrap();
        assert_eq!(t.julian_date(), UNIX_EPOCH_JD);
    }

    #[test]
    fn test_julian_date_j2000() {
        let t = utc(2000, 1, 1, 12, 0, 0);
        assert_relative_eq!(t.julian_date(), J2000, epsilon = 1e-9);
    }

    #[test]
    fn test_from_julian_date_round_trip() {
        let t = utc(2024, 3, 20, 12, 0, 0);
        let back = Time::from_julian_date(t.julian_date()).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn test_from_julian_date_rejects_non_finite() {
        assert!(Time::from_julian_date(f64::NAN).is_err());
        assert!(Time::from_julian_date(f64::INFINITY).is_err());
        assert!(Time::from_julian_date(1e30).is_err());
    }

    #[test]
    fn test_parse_rfc3339() {
        let t = Time::parse_rfc3339("2024-03-20T08:00:00-04:00").unwrap();
        assert_eq!(t, utc(2024, 3, 20, 12, 0, 0));
        assert!(Time::parse_rfc3339("yesterday").is_err());
    }

    #[test]
    fn test_start_of_day_is_a_new_value() {
        let t = utc(2024, 3, 20, 17, 45, 12);
        let midnight = t.start_of_day();
        assert_eq!(midnight, utc(2024, 3, 20, 0, 0, 0));
        // The source instant keeps its time of day
        assert_eq!(t, utc(2024, 3, 20, 17, 45, 12));
        assert_eq!(midnight.start_of_day(), midnight);
    }

    #[test]
    fn test_time_math() {
        let t1 = utc(2024, 1, 1, 0, 0, 0);
        let t2 = t1.add_hours(1.5);
        assert_eq!(t2, utc(2024, 1, 1, 1, 30, 0));
        assert_eq!(t2 - t1, Duration::minutes(90));
        assert_eq!(t2 - Duration::minutes(90), t1);
        assert_eq!(t1.add_hours(-0.5), utc(2023, 12, 31, 23, 30, 0));
    }

    #[test]
    fn test_offsets_saturate_at_calendar_bounds() {
        assert_eq!(Time::MAX.add_hours(1.0), Time::MAX);
        assert_eq!(Time::MIN.add_hours(-1.0), Time::MIN);
        assert_eq!(Time::MAX + Duration::days(1), Time::MAX);
        assert_eq!(Time::MIN - Duration::days(1), Time::MIN);
        assert_eq!(Time::MIN + Duration::hours(2), Time::MIN.add_hours(2.0));

        assert!(Time::MAX.checked_add_hours(1.0).is_none());
        assert!(Time::MIN.checked_add_hours(-1.0).is_none());
        assert!(Time::MAX.checked_add_hours(-1.0).is_some());
    }

    #[test]
    fn test_non_finite_offsets() {
        let t = utc(2024, 1, 1, 0, 0, 0);
        assert_eq!(t.add_hours(f64::NAN), t);
        assert_eq!(t.add_hours(f64::INFINITY), Time::MAX);
        assert_eq!(t.add_hours(f64::NEG_INFINITY), Time::MIN);
        assert!(t.checked_add_hours(f64::NAN).is_none());
        assert!(hours_to_duration(f64::INFINITY).is_none());
        assert_eq!(hours_to_duration(0.5), Some(Duration::minutes(30)));
    }

    #[test]
    fn test_display() {
        assert_eq!(utc(2024, 3, 20, 12, 0, 0).to_string(), "2024-03-20T12:00:00.000Z");
    }

    #[test]
    fn test_gmst_at_j2000() {
        assert_abs_diff_eq!(gmst_degrees(J2000), GMST_J2000_DEG, epsilon = 1e-9);
        assert_abs_diff_eq!(gmst_hours(J2000), 18.697_374_558, epsilon = 1e-8);
    }

    #[test]
    fn test_gmst_j2000_midnight() {
        // 2000-01-01 0h UT, GMST ≈ 6h 39m 52s
        let t = utc(2000, 1, 1, 0, 0, 0);
        let gmst = t.gmst();
        assert_abs_diff_eq!(gmst.hours(), 6.664_52, epsilon = 1e-4);
        assert_abs_diff_eq!(gmst.degrees(), 99.967_8, epsilon = 1e-3);
    }

    #[test]
    fn test_gmst_negative_wraps_forward() {
        // Far before J2000 the raw polynomial is hugely negative
        let jd = J2000 - 36_525.0 * 3.0 - 0.123;
        let deg = gmst_degrees(jd);
        assert!((0.0..360.0).contains(&deg), "got {deg}");
    }

    #[test]
    fn test_gmst_one_second_step() {
        let t0 = utc(2024, 3, 20, 12, 0, 0);
        let t1 = t0 + Duration::seconds(1);
        let step_hours = wrap_signed_hours(t1.gmst().hours() - t0.gmst().hours());
        // One solar second is 1.0027379 sidereal seconds, i.e. ~0.004178 degrees
        assert_abs_diff_eq!(step_hours * 15.0, 0.004_178, epsilon = 1e-5);
        assert_abs_diff_eq!(step_hours, 0.000_278_5, epsilon = 1e-6);
    }

    #[test]
    fn test_gmst_gains_about_four_minutes_per_day() {
        let t0 = utc(2024, 3, 20, 0, 0, 0);
        let t1 = t0 + Duration::days(1);
        let gain = wrap_signed_hours(t1.gmst().hours() - t0.gmst().hours());
        assert_abs_diff_eq!(gain * 60.0, 3.943, epsilon = 0.01);
    }

    #[rstest]
    #[case(15.0, 1.0)]
    #[case(-74.0, -74.0 / 15.0)]
    #[case(90.0, 6.0)]
    #[case(0.0, 0.0)]
    fn test_lst_longitude_offset(#[case] longitude: f64, #[case] offset_hours: f64) {
        let t = utc(2024, 3, 20, 12, 0, 0);
        let gmst = t.gmst().hours();
        let lst = t.local_sidereal_time(longitude).hours();
        assert_abs_diff_eq!(
            wrap_signed_hours(lst - gmst),
            wrap_signed_hours(offset_hours),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_sidereal_time_accessors() {
        let st = SiderealTime::from_hours(-6.0);
        assert_eq!(st.hours(), 18.0);
        assert_eq!(st.degrees(), 270.0);
        assert_abs_diff_eq!(st.radians(), 1.5 * std::f64::consts::PI, epsilon = 1e-12);
        assert_eq!(SiderealTime::from_degrees(90.0).hours(), 6.0);
        assert_eq!(st.to_string(), "18.000000h");
    }

    proptest! {
        #[test]
        fn prop_lst_in_range(
            millis in -4_000_000_000_000i64..8_000_000_000_000i64,
            longitude in -180.0..=180.0f64,
        ) {
            let t = Time::from_epoch_millis(millis).unwrap();
            let lst = local_sidereal_time(&t, longitude).hours();
            prop_assert!((0.0..24.0).contains(&lst));
        }
    }
}
