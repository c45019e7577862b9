//! Skywatch: where things are in the sky, and when they rise and set
//!
//! This crate turns equatorial coordinates supplied by an ephemeris into what
//! an observer actually sees: altitude and azimuth, a point on a render
//! sphere, and the rise, transit and set times of the day.
//!
//! It is organized leaf to root:
//!
//! - [`time`]: Julian Date, Greenwich and local mean sidereal time
//! - [`coordinates`]: equatorial to horizontal conversion and the two
//!   Cartesian projections (horizon-relative and fixed sky sphere)
//! - [`almanac`]: rise/transit/set and quick visibility checks
//!
//! Everything is a pure function over `Copy` values; there is no shared state
//! and every call may run on any thread.
//!
//! ```rust
//! use skywatch::almanac::{rise_transit_set, RiseSetConfig};
//! use skywatch::{Equatorial, Observer, Time};
//!
//! let observer = Observer::new(40.0, -74.0)?;
//! let date = Time::parse_rfc3339("2024-03-20T12:00:00Z")?;
//! let result = rise_transit_set(&Equatorial::new(6.0, 20.0), &observer, &date, &RiseSetConfig::default());
//! assert!(result.rise.unwrap() < result.transit);
//! # Ok::<(), skywatch::SkyError>(())
//! ```

use thiserror::Error;

pub mod almanac;
pub mod celestial;
pub mod config;
pub mod constants;
pub mod coordinates;
pub mod observer;
pub mod planetlib;
pub mod time;

// Re-export commonly used types
pub use almanac::{HorizonStatus, RiseSetConfig, TransitSolver, VisibilityResult};
pub use coordinates::{Cartesian3, Equatorial, Horizontal};
pub use observer::Observer;
pub use planetlib::{Body, EphemerisProvider};
pub use time::{SiderealTime, Time, TimeError};

/// Main error type for the skywatch library
///
/// Only caller mistakes and I/O surface here. Degenerate geometry (poles,
/// zenith, circumpolar objects) is represented in the returned values instead.
#[derive(Debug, Error)]
pub enum SkyError {
    #[error("Invalid latitude: {0} (expected -90..=90 degrees)")]
    InvalidLatitude(f64),

    #[error("Invalid longitude: {0} (expected -180..=180 degrees)")]
    InvalidLongitude(f64),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Time error: {0}")]
    Time(#[from] TimeError),

    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for skywatch operations
pub type Result<T> = std::result::Result<T, SkyError>;

// Re-export CelestialObject trait from celestial module
pub use celestial::CelestialObject;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SkyError::InvalidLatitude(95.0).to_string(),
            "Invalid latitude: 95 (expected -90..=90 degrees)"
        );
        let err: SkyError = TimeError::OutOfRange("x".into()).into();
        assert!(matches!(err, SkyError::Time(_)));
    }

    #[test]
    fn test_value_types_are_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Time>();
        assert_send_sync::<Observer>();
        assert_send_sync::<Equatorial>();
        assert_send_sync::<Horizontal>();
        assert_send_sync::<Cartesian3>();
        assert_send_sync::<VisibilityResult>();
        assert_send_sync::<Box<dyn EphemerisProvider>>();
    }
}
