//! Celestial objects and what an observer sees of them

use crate::almanac::horizontal_position;
use crate::coordinates::{Cartesian3, Equatorial, Horizontal};
use crate::observer::Observer;
use crate::planetlib::{Body, EphemerisProvider};
use crate::time::Time;
use crate::Result;
use serde::{Deserialize, Serialize};

/// A trait for objects that have a position in the sky
pub trait CelestialObject {
    /// Get the position of the object at a specific time
    fn position_at(&self, time: &Time) -> Result<Equatorial>;
}

/// A fixed star
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    /// Name of the star
    pub name: String,
    pub equatorial: Equatorial,
    /// Apparent visual magnitude
    pub magnitude: f64,
}

impl Star {
    /// Create a new star from right ascension in hours and declination in degrees
    pub fn new(name: &str, ra_hours: f64, dec_degrees: f64, magnitude: f64) -> Self {
        Self {
            name: name.to_string(),
            equatorial: Equatorial::new(ra_hours, dec_degrees),
            magnitude,
        }
    }
}

impl CelestialObject for Star {
    fn position_at(&self, _time: &Time) -> Result<Equatorial> {
        Ok(self.equatorial)
    }
}

/// Where an object appears for one observer at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub equatorial: Equatorial,
    pub horizontal: Horizontal,
    /// Horizon-relative render point
    pub point: Cartesian3,
    pub above_horizon: bool,
}

impl Observation {
    pub fn of(equatorial: &Equatorial, observer: &Observer, time: &Time, radius: f64) -> Self {
        let horizontal = horizontal_position(equatorial, observer, time);
        Self {
            equatorial: *equatorial,
            horizontal,
            point: horizontal.to_cartesian(radius),
            above_horizon: horizontal.is_above_horizon(),
        }
    }

    /// Observe anything that can report its own position
    pub fn of_object<O: CelestialObject + ?Sized>(
        object: &O,
        observer: &Observer,
        time: &Time,
        radius: f64,
    ) -> Result<Self> {
        let equatorial = object.position_at(time)?;
        Ok(Self::of(&equatorial, observer, time, radius))
    }
}

/// Observe each requested body, failing on the first provider error
pub fn observe_bodies<P: EphemerisProvider + ?Sized>(
    provider: &P,
    bodies: &[Body],
    observer: &Observer,
    time: &Time,
    radius: f64,
) -> Result<Vec<(Body, Observation)>> {
    bodies
        .iter()
        .map(|&body| {
            let position = provider.position(body, time, observer)?;
            Ok((body, Observation::of(&position.equatorial, observer, time, radius)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planetlib::{BodyPosition, FixedEphemeris};
    use crate::time::local_sidereal_time;
    use crate::SkyError;
    use approx::assert_abs_diff_eq;
    use chrono::{TimeZone, Utc};

    fn noon() -> Time {
        Time::new(Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_star_position_is_fixed() {
        let vega = Star::new("Vega", 18.615_6, 38.783_7, 0.03);
        assert_eq!(vega.name, "Vega");
        let a = vega.position_at(&noon()).unwrap();
        let b = vega.position_at(&noon().add_hours(1000.0)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_observation_on_meridian() {
        let observer = Observer::new(40.0, -74.0).unwrap();
        let time = noon();
        // Put the star on the meridian right now
        let lst = local_sidereal_time(&time, observer.longitude()).hours();
        let star = Star::new("Test", lst, 20.0, 2.0);

        let obs = Observation::of_object(&star, &observer, &time, 100.0).unwrap();
        assert!(obs.above_horizon);
        assert_abs_diff_eq!(obs.horizontal.altitude, 70.0, epsilon = 1e-6);
        assert_abs_diff_eq!(obs.point.magnitude(), 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(obs.point.y, 100.0 * 70f64.to_radians().sin(), epsilon = 1e-6);
    }

    #[test]
    fn test_observe_bodies() {
        let observer = Observer::new(-33.9, 18.4).unwrap();
        let sun = BodyPosition {
            equatorial: Equatorial::new(0.0, 0.0),
            distance_au: 1.0,
            magnitude: -26.7,
        };
        let moon = BodyPosition {
            equatorial: Equatorial::new(12.0, 5.0),
            distance_au: 0.0026,
            magnitude: -12.0,
        };
        let provider = FixedEphemeris::new()
            .with_body(Body::Sun, sun)
            .with_body(Body::Moon, moon);

        let seen = observe_bodies(&provider, &[Body::Sun, Body::Moon], &observer, &noon(), 1.0).unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0, Body::Sun);
        assert_eq!(seen[1].1.equatorial, moon.equatorial);

        let missing = observe_bodies(&provider, &[Body::Mars], &observer, &noon(), 1.0);
        assert!(matches!(missing, Err(SkyError::ObjectNotFound(_))));
    }

    #[test]
    fn test_observation_with_dyn_provider() {
        let provider: Box<dyn EphemerisProvider> = Box::new(FixedEphemeris::new());
        let observer = Observer::new(0.0, 0.0).unwrap();
        let seen = observe_bodies(provider.as_ref(), &[], &observer, &noon(), 1.0).unwrap();
        assert!(seen.is_empty());
    }
}
