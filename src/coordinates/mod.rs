//! Equatorial and horizontal coordinates and the transforms between them
//!
//! Angles at this level follow observing conventions rather than radians:
//! right ascension and hour angle are in hours, declination, altitude and
//! azimuth in degrees. Azimuth is measured from true north, increasing east.

pub mod angle;
pub mod cartesian;

pub use cartesian::Cartesian3;

use crate::constants::{DEG_PER_HOUR, SINGULARITY_EPS};
use crate::time::SiderealTime;
use crate::{Result, SkyError};
use angle::{clamp_unit, degrees_to_hours, hours_to_radians, normalize_degrees, normalize_hours};
use serde::{Deserialize, Serialize};

/// Equatorial coordinates (RA/Dec)
///
/// Deserialization goes through [`Equatorial::try_new`], so ephemeris data
/// cannot carry an out-of-range declination or unnormalized right ascension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEquatorial")]
pub struct Equatorial {
    /// Right ascension in hours, `[0, 24)`
    pub ra_hours: f64,
    /// Declination in degrees, `[-90, 90]`
    pub dec_degrees: f64,
}

#[derive(Deserialize)]
struct RawEquatorial {
    ra_hours: f64,
    dec_degrees: f64,
}

impl TryFrom<RawEquatorial> for Equatorial {
    type Error = SkyError;

    fn try_from(raw: RawEquatorial) -> Result<Self> {
        Equatorial::try_new(raw.ra_hours, raw.dec_degrees)
    }
}

impl Equatorial {
    /// Right ascension is wrapped into `[0, 24)`, declination clamped to `[-90, 90]`.
    ///
    /// Non-finite values are kept as given; use [`Equatorial::try_new`] for
    /// input that has not been checked yet.
    pub fn new(ra_hours: f64, dec_degrees: f64) -> Self {
        Equatorial {
            ra_hours: normalize_hours(ra_hours),
            dec_degrees: dec_degrees.clamp(-90.0, 90.0),
        }
    }

    /// Checked constructor for boundary input.
    ///
    /// Rejects non-finite values and declinations outside `[-90, 90]`; right
    /// ascension is wrapped into `[0, 24)`.
    pub fn try_new(ra_hours: f64, dec_degrees: f64) -> Result<Self> {
        if !ra_hours.is_finite() || !dec_degrees.is_finite() {
            return Err(SkyError::InvalidCoordinates(format!(
                "non-finite RA/Dec ({ra_hours}, {dec_degrees})"
            )));
        }
        if !(-90.0..=90.0).contains(&dec_degrees) {
            return Err(SkyError::InvalidCoordinates(format!(
                "declination {dec_degrees} outside -90..=90"
            )));
        }
        Ok(Self::new(ra_hours, dec_degrees))
    }

    /// Create a new Equatorial coordinate with right ascension in degrees
    pub fn from_degrees(ra_deg: f64, dec_deg: f64) -> Self {
        Self::new(degrees_to_hours(ra_deg), dec_deg)
    }

    /// Get right ascension in degrees
    pub fn ra_degrees(&self) -> f64 {
        self.ra_hours * DEG_PER_HOUR
    }

    /// Project onto the fixed celestial sphere used for sky-sphere rendering.
    ///
    /// This placement ignores the observer and the clock: a star always lands
    /// on the same point, with the north celestial pole at +y. Use
    /// [`Horizontal::to_cartesian`] for the horizon-relative (local sky) view.
    ///
    /// With `phi = 90° − dec` and `theta = ra·15°`:
    /// `x = r·sin(phi)·sin(theta)`, `y = r·cos(phi)`, `z = r·sin(phi)·cos(theta)`.
    pub fn to_sky_sphere(&self, radius: f64) -> Cartesian3 {
        let phi = (90.0 - self.dec_degrees).to_radians();
        let theta = hours_to_radians(self.ra_hours);
        Cartesian3::new(
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
            radius * phi.sin() * theta.cos(),
        )
    }
}

/// Horizontal coordinates (Alt/Az)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHorizontal")]
pub struct Horizontal {
    /// Altitude above the horizon in degrees, `[-90, 90]`
    pub altitude: f64,
    /// Azimuth from true north, increasing eastward, in degrees, `[0, 360)`
    pub azimuth: f64,
}

#[derive(Deserialize)]
struct RawHorizontal {
    altitude: f64,
    azimuth: f64,
}

impl TryFrom<RawHorizontal> for Horizontal {
    type Error = SkyError;

    fn try_from(raw: RawHorizontal) -> Result<Self> {
        Horizontal::try_new(raw.altitude, raw.azimuth)
    }
}

impl Horizontal {
    pub fn new(altitude: f64, azimuth: f64) -> Self {
        Horizontal {
            altitude: altitude.clamp(-90.0, 90.0),
            azimuth: normalize_degrees(azimuth),
        }
    }

    /// Rejects non-finite values and altitudes outside `[-90, 90]`; azimuth is
    /// wrapped into `[0, 360)`
    pub fn try_new(altitude: f64, azimuth: f64) -> Result<Self> {
        if !altitude.is_finite() || !azimuth.is_finite() {
            return Err(SkyError::InvalidCoordinates(format!(
                "non-finite Alt/Az ({altitude}, {azimuth})"
            )));
        }
        if !(-90.0..=90.0).contains(&altitude) {
            return Err(SkyError::InvalidCoordinates(format!(
                "altitude {altitude} outside -90..=90"
            )));
        }
        Ok(Self::new(altitude, azimuth))
    }

    /// Whether the object is above the geometric horizon
    pub fn is_above_horizon(&self) -> bool {
        self.altitude > 0.0
    }

    /// Place the direction in the horizon-relative render frame (+y up).
    ///
    /// `x = r·cos(alt)·sin(az)`, `y = r·sin(alt)`, `z = r·cos(alt)·cos(az)`,
    /// so north is +z and east is +x.
    pub fn to_cartesian(&self, radius: f64) -> Cartesian3 {
        let alt = self.altitude.to_radians();
        let az = self.azimuth.to_radians();
        Cartesian3::new(
            radius * alt.cos() * az.sin(),
            radius * alt.sin(),
            radius * alt.cos() * az.cos(),
        )
    }
}

/// Local hour angle in hours, `[0, 24)`
///
/// Values past 12h are east of the meridian (the object is still rising).
pub fn hour_angle(ra_hours: f64, lst: SiderealTime) -> f64 {
    normalize_hours(lst.hours() - ra_hours)
}

/// Convert equatorial coordinates to horizontal ones for an observer latitude.
///
/// The raw `acos` azimuth only spans `[0°, 180°]`; the sign of `sin(HA)`
/// decides east or west of the meridian. When `cos(lat)·cos(alt)` vanishes
/// (observer at a pole, object at zenith or nadir) the azimuth is undefined
/// and reported as 0.
pub fn equatorial_to_horizontal(
    position: &Equatorial,
    lst: SiderealTime,
    latitude_deg: f64,
) -> Horizontal {
    let ha = hours_to_radians(hour_angle(position.ra_hours, lst));
    let dec = position.dec_degrees.to_radians();
    let lat = latitude_deg.to_radians();

    let sin_alt = clamp_unit(dec.sin() * lat.sin() + dec.cos() * lat.cos() * ha.cos());
    let alt = sin_alt.asin();

    let denominator = lat.cos() * alt.cos();
    let azimuth = if denominator.abs() < SINGULARITY_EPS {
        log::debug!(
            "azimuth undefined at latitude {latitude_deg}, altitude {}; using 0",
            alt.to_degrees()
        );
        0.0
    } else {
        let cos_az = clamp_unit((dec.sin() - lat.sin() * sin_alt) / denominator);
        let az = cos_az.acos().to_degrees();
        if ha.sin() > 0.0 {
            360.0 - az
        } else {
            az
        }
    };

    Horizontal::new(alt.to_degrees(), azimuth)
}
