//! Observer location on the Earth's surface

use crate::{Result, SkyError};
use serde::{Deserialize, Serialize};

/// Geographic location of an observer, in degrees
///
/// Latitude is north-positive, longitude east-positive. Values are checked
/// once, at construction; everything downstream trusts them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawObserver")]
pub struct Observer {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawObserver {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawObserver> for Observer {
    type Error = SkyError;

    fn try_from(raw: RawObserver) -> Result<Self> {
        Observer::new(raw.latitude, raw.longitude)
    }
}

impl Observer {
    /// Create an observer, rejecting latitude outside `[-90, 90]` or
    /// longitude outside `[-180, 180]`
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(SkyError::InvalidLatitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(SkyError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees, north positive
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees, east positive
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}
